//! Record access layer
//!
//! The engine never performs I/O itself: a [`RecordFetcher`] delivers every raw
//! record of a title before aggregation starts.

pub mod json_file;

use async_trait::async_trait;

use crate::{
    error::HoldingsResult,
    models::{RawHoldingRecord, RawItemAvailability, RawSerialSubscription},
};

pub use json_file::JsonFileFetcher;

/// Result of a fetch that distinguishes an unknown title from an empty one
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Found(Vec<T>),
    NotFound,
}

impl<T> FetchOutcome<T> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchOutcome::NotFound)
    }

    /// Records, or `None` when the title is unknown
    pub fn found(self) -> Option<Vec<T>> {
        match self {
            FetchOutcome::Found(records) => Some(records),
            FetchOutcome::NotFound => None,
        }
    }
}

/// Source of raw title records (REST client, fixture files, ...)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    async fn fetch_item_availabilities(
        &self,
        title_id: &str,
    ) -> HoldingsResult<FetchOutcome<RawItemAvailability>>;

    async fn fetch_holding_records(&self, title_id: &str) -> HoldingsResult<FetchOutcome<RawHoldingRecord>>;

    async fn fetch_serial_subscriptions(
        &self,
        title_id: &str,
    ) -> HoldingsResult<FetchOutcome<RawSerialSubscription>>;
}
