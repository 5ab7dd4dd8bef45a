//! Aggregated holdings entries returned for a title

use std::fmt;

use serde::{Serialize, Serializer};

/// Location string of the summary entry; never a real location name
pub const SUMMARY_LOCATION: &str = "__HOLDINGSSUMMARYLOCATION__";

/// Identity of the item behind an entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemIdentity {
    /// A real circulating item
    Item(String),
    /// Placeholder for a holding record without items
    Holding(String),
    /// Placeholder for a serial subscription, numbered by position
    Serial(usize),
}

impl ItemIdentity {
    /// True for `HLD_` entries; serial placeholders still count as holdings
    pub fn is_holding_placeholder(&self) -> bool {
        matches!(self, ItemIdentity::Holding(_))
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemIdentity::Item(id) => write!(f, "{}", id),
            ItemIdentity::Holding(id) => write!(f, "HLD_{}", id),
            ItemIdentity::Serial(n) => write!(f, "SERIAL_{}", n),
        }
    }
}

impl Serialize for ItemIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fields read from the MARC holdings record of the parent holding
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarcDetails {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supplements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    pub holdings_id: String,
}

/// One received serial issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseIssue {
    pub issue: String,
}

/// Hold and storage-retrieval options, only present for a logged-in patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holdability {
    pub is_holdable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<&'static str>,
    #[serde(rename = "addLink", skip_serializing_if = "Option::is_none")]
    pub add_link: Option<&'static str>,
    #[serde(rename = "storageRetrievalRequest", skip_serializing_if = "Option::is_none")]
    pub storage_retrieval_request: Option<&'static str>,
    #[serde(
        rename = "addStorageRetrievalRequestLink",
        skip_serializing_if = "Option::is_none"
    )]
    pub add_storage_retrieval_request_link: Option<&'static str>,
}

impl Holdability {
    /// No hold and no storage retrieval
    pub fn denied() -> Self {
        Self {
            is_holdable: false,
            level: None,
            add_link: None,
            storage_retrieval_request: None,
            add_storage_retrieval_request_link: None,
        }
    }
}

/// Physical holdings line: a real item, a holding placeholder or a serial
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingsEntry {
    pub id: String,
    pub item_id: ItemIdentity,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub availability: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status_array: Vec<String>,
    pub use_unknown_message: bool,
    pub duedate: Option<String>,
    pub callnumber: String,
    /// Serial enumeration/chronology label
    pub number: Option<String>,
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_placed: Option<u32>,
    #[serde(rename = "branchId")]
    pub branch_id: Option<String>,
    #[serde(rename = "locationId")]
    pub location_id: Option<String>,
    /// Fetch-order position
    pub sort: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_notes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_history: Option<Vec<PurchaseIssue>>,
    #[serde(flatten)]
    pub holdability: Option<Holdability>,
    #[serde(flatten)]
    pub marc: Option<MarcDetails>,
}

impl HoldingsEntry {
    /// Whether a hold may be placed; false without a patron
    pub fn is_holdable(&self) -> bool {
        self.holdability.as_ref().is_some_and(|h| h.is_holdable)
    }
}

/// Online access link taken from holding metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectronicHoldingsEntry {
    pub id: String,
    pub item_id: ItemIdentity,
    pub location: String,
    pub status: String,
    pub availability: bool,
    #[serde(rename = "locationhref")]
    pub location_href: String,
    pub use_unknown_message: bool,
    #[serde(rename = "branchId")]
    pub branch_id: Option<String>,
    #[serde(rename = "locationId")]
    pub location_id: Option<String>,
    pub sort: usize,
}

/// Synthetic last line of the physical list carrying aggregate counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub available: usize,
    pub total: usize,
    pub locations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations: Option<u32>,
    pub availability: Option<bool>,
    pub callnumber: Option<String>,
    pub location: &'static str,
}

impl SummaryEntry {
    pub fn new(available: usize, total: usize, locations: usize, reservations: Option<u32>) -> Self {
        Self {
            available,
            total,
            locations,
            reservations,
            availability: None,
            callnumber: None,
            location: SUMMARY_LOCATION,
        }
    }
}

/// Element of the physical holdings list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PhysicalEntry {
    Item(HoldingsEntry),
    Summary(SummaryEntry),
}

impl PhysicalEntry {
    pub fn as_item(&self) -> Option<&HoldingsEntry> {
        match self {
            PhysicalEntry::Item(entry) => Some(entry),
            PhysicalEntry::Summary(_) => None,
        }
    }

    pub fn as_summary(&self) -> Option<&SummaryEntry> {
        match self {
            PhysicalEntry::Summary(summary) => Some(summary),
            PhysicalEntry::Item(_) => None,
        }
    }
}

/// Everything known about the availability of one title
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TitleHoldings {
    pub holdings: Vec<PhysicalEntry>,
    pub electronic_holdings: Vec<ElectronicHoldingsEntry>,
}

impl TitleHoldings {
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty() && self.electronic_holdings.is_empty()
    }

    /// Physical entries that are not the summary
    pub fn items(&self) -> impl Iterator<Item = &HoldingsEntry> {
        self.holdings.iter().filter_map(PhysicalEntry::as_item)
    }

    pub fn summary(&self) -> Option<&SummaryEntry> {
        self.holdings.last().and_then(PhysicalEntry::as_summary)
    }
}

/// Element of a brief status list (physical and electronic merged)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatusEntry {
    Holding(HoldingsEntry),
    Electronic(ElectronicHoldingsEntry),
}

/// Outcome of one title in a batch status lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TitleStatus {
    Available { id: String, entries: Vec<StatusEntry> },
    Unavailable { id: String, message: String },
}
