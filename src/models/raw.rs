//! Raw records as delivered by the record fetcher

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One reason an item is currently unavailable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unavailability {
    /// Due date of a checkout, RFC 3339 or `YYYY-MM-DD`
    #[serde(default)]
    pub date_due: Option<String>,
    /// Library-specific reason code (e.g. a not-for-loan value)
    #[serde(default)]
    pub code: Option<String>,
}

/// Availability block of an item
///
/// The keys of `unavailabilities` (`Item::CheckedOut`, `Hold::NotHoldable`, ...)
/// are the machine status codes; their order is the order the fetcher returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    #[serde(default)]
    pub unavailabilities: IndexMap<String, Unavailability>,
    #[serde(default)]
    pub notes: IndexMap<String, serde_json::Value>,
}

impl Availability {
    pub fn has(&self, code: &str) -> bool {
        self.unavailabilities.contains_key(code)
    }
}

/// Item-level availability record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItemAvailability {
    #[serde(rename = "itemnumber")]
    pub item_id: String,
    #[serde(default)]
    pub holding_id: Option<String>,
    #[serde(default, rename = "holdingbranch")]
    pub holding_branch: Option<String>,
    #[serde(default, rename = "homebranch")]
    pub home_branch: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
    #[serde(default)]
    pub sub_description: Option<String>,
    #[serde(default)]
    pub ccode: Option<String>,
    #[serde(default)]
    pub ccode_description: Option<String>,
    #[serde(default, rename = "itemcallnumber")]
    pub call_number: Option<String>,
    #[serde(default, rename = "itemcallnumber_display")]
    pub call_number_display: Option<String>,
    #[serde(default)]
    pub availability: Availability,
    /// Serial enumeration/chronology label
    #[serde(default)]
    pub enumchron: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default, rename = "itemnotes")]
    pub item_notes: Option<String>,
    #[serde(default)]
    pub hold_queue_length: u32,
    /// Holds placed on the whole title
    #[serde(default)]
    pub title_hold_queue_length: u32,
}

/// Metadata blob attached to a holding record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingMetadata {
    pub format: String,
    #[serde(default)]
    pub marcflavour: String,
    pub metadata: String,
}

impl HoldingMetadata {
    /// Only MARC21 in MARCXML can be read
    pub fn is_supported(&self) -> bool {
        self.format == "marcxml" && self.marcflavour == "MARC21"
    }
}

/// Holding-only record (no item-level detail)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHoldingRecord {
    pub holding_id: String,
    #[serde(default)]
    pub biblionumber: Option<String>,
    #[serde(default, rename = "suppress")]
    pub suppressed: bool,
    #[serde(default, rename = "holdingbranch")]
    pub holding_branch: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
    #[serde(default)]
    pub callnumber: Option<String>,
    #[serde(default)]
    pub ccode: Option<String>,
    #[serde(default)]
    pub ccode_description: Option<String>,
    #[serde(default)]
    pub holdings_metadata: Option<Vec<HoldingMetadata>>,
    #[serde(default)]
    pub metadata: Option<HoldingMetadata>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

impl RawHoldingRecord {
    /// Metadata blobs in preference order
    pub fn metadata_blobs(&self) -> Vec<&HoldingMetadata> {
        match &self.holdings_metadata {
            Some(list) => list.iter().collect(),
            None => self.metadata.iter().collect(),
        }
    }
}

/// One issue of a serial subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// `YYYY-MM-DD`
    #[serde(default, rename = "publisheddate")]
    pub published_date: String,
    #[serde(default)]
    pub received: bool,
    #[serde(default, rename = "serialseq")]
    pub sequence: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Issue {
    /// Year of publication, if the date starts with one. `0000-00-00` gives year 0.
    pub fn year(&self) -> Option<i32> {
        self.published_date
            .split('-')
            .next()
            .and_then(|y| y.trim().parse().ok())
    }

    /// Label shown in purchase history
    pub fn display(&self) -> String {
        match self.notes.as_deref() {
            Some(notes) if !notes.is_empty() => format!("{} {}", self.sequence, notes),
            _ => self.sequence.clone(),
        }
    }
}

/// Serial subscription with its issues
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSerialSubscription {
    #[serde(default, rename = "branchcode")]
    pub branch: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
    #[serde(default)]
    pub callnumber: Option<String>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_json_keeps_unavailability_order() {
        let item: RawItemAvailability = serde_json::from_value(serde_json::json!({
            "itemnumber": "42",
            "holdingbranch": "MAIN",
            "availability": {
                "available": false,
                "unavailabilities": {
                    "Item::Transfer": {},
                    "Item::CheckedOut": { "date_due": "2026-01-01" },
                    "Hold::NotHoldable": {}
                }
            },
            "hold_queue_length": 2
        }))
        .unwrap();

        let codes: Vec<&str> = item
            .availability
            .unavailabilities
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(codes, ["Item::Transfer", "Item::CheckedOut", "Hold::NotHoldable"]);
        assert_eq!(item.hold_queue_length, 2);
        assert_eq!(item.title_hold_queue_length, 0);
    }

    #[test]
    fn test_issue_year_and_display() {
        let issue = Issue {
            published_date: "2023-04-01".to_string(),
            received: true,
            sequence: "4/2023".to_string(),
            notes: Some("supplement".to_string()),
        };
        assert_eq!(issue.year(), Some(2023));
        assert_eq!(issue.display(), "4/2023 supplement");

        let unknown = Issue {
            published_date: "0000-00-00".to_string(),
            ..issue.clone()
        };
        assert_eq!(unknown.year(), Some(0));

        let undated = Issue {
            published_date: String::new(),
            ..issue
        };
        assert_eq!(undated.year(), None);
    }

    #[test]
    fn test_metadata_support() {
        let xml = HoldingMetadata {
            format: "marcxml".to_string(),
            marcflavour: "MARC21".to_string(),
            metadata: String::new(),
        };
        assert!(xml.is_supported());
        let unimarc = HoldingMetadata {
            marcflavour: "UNIMARC".to_string(),
            ..xml
        };
        assert!(!unimarc.is_supported());
    }
}
