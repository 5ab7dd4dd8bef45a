//! Data models for the holdings aggregator

pub mod holdings;
pub mod raw;

// Re-export commonly used types
pub use holdings::{
    ElectronicHoldingsEntry, Holdability, HoldingsEntry, ItemIdentity, MarcDetails,
    PhysicalEntry, PurchaseIssue, StatusEntry, SummaryEntry, TitleHoldings, TitleStatus,
    SUMMARY_LOCATION,
};
pub use raw::{
    Availability, HoldingMetadata, Issue, RawHoldingRecord, RawItemAvailability,
    RawSerialSubscription, Unavailability,
};

/// Logged-in patron on whose behalf holdings are looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patron {
    pub id: String,
}
