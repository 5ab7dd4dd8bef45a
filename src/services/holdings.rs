//! Holdings lookups: fetch raw records, then aggregate

use std::sync::Arc;

use chrono::Utc;

use crate::{
    engine::{HoldingsEngine, LookupContext, TitleRecords},
    error::HoldingsResult,
    models::{Patron, PhysicalEntry, StatusEntry, TitleHoldings, TitleStatus},
    repository::{FetchOutcome, RecordFetcher},
};

#[derive(Clone)]
pub struct HoldingsService {
    fetcher: Arc<dyn RecordFetcher>,
    engine: HoldingsEngine,
}

impl HoldingsService {
    pub fn new(fetcher: Arc<dyn RecordFetcher>, engine: HoldingsEngine) -> Self {
        Self { fetcher, engine }
    }

    /// Holdings of a title with summary and electronic links
    pub async fn get_holding(&self, title_id: &str, patron: Option<&Patron>) -> HoldingsResult<TitleHoldings> {
        let ctx = LookupContext {
            patron,
            brief: false,
            now: Utc::now(),
        };
        let Some(records) = self.fetch_records(title_id, ctx.brief).await? else {
            return Ok(TitleHoldings::default());
        };
        Ok(self.engine.lookup(title_id, records, &ctx))
    }

    /// Physical holdings of a title with summary
    pub async fn get_status(&self, title_id: &str) -> HoldingsResult<Vec<PhysicalEntry>> {
        let ctx = LookupContext {
            patron: None,
            brief: false,
            now: Utc::now(),
        };
        let Some(records) = self.fetch_records(title_id, ctx.brief).await? else {
            return Ok(Vec::new());
        };
        Ok(self.engine.status(title_id, records, &ctx))
    }

    /// Brief status of several titles. A failing title is reported as
    /// unavailable and does not affect the others.
    pub async fn get_statuses(&self, title_ids: &[String]) -> Vec<TitleStatus> {
        let mut statuses = Vec::with_capacity(title_ids.len());
        for title_id in title_ids {
            match self.brief_status(title_id).await {
                Ok(entries) => statuses.push(TitleStatus::Available {
                    id: title_id.clone(),
                    entries,
                }),
                Err(e) => {
                    tracing::warn!("Status lookup failed for title {} ({:?}): {}", title_id, e.code(), e);
                    statuses.push(TitleStatus::Unavailable {
                        id: title_id.clone(),
                        message: e.user_message().to_string(),
                    });
                }
            }
        }
        statuses
    }

    async fn brief_status(&self, title_id: &str) -> HoldingsResult<Vec<StatusEntry>> {
        let ctx = LookupContext {
            patron: None,
            brief: true,
            now: Utc::now(),
        };
        let Some(records) = self.fetch_records(title_id, ctx.brief).await? else {
            return Ok(Vec::new());
        };
        let (physical, electronic) = self.engine.aggregate(title_id, records, &ctx);
        Ok(physical
            .into_iter()
            .map(StatusEntry::Holding)
            .chain(electronic.into_iter().map(StatusEntry::Electronic))
            .collect())
    }

    /// All raw records of a title, or `None` when any fetch reports the title unknown
    async fn fetch_records(&self, title_id: &str, brief: bool) -> HoldingsResult<Option<TitleRecords>> {
        let config = &self.engine.settings().config;

        let holdings = if config.use_holding_records {
            match self.fetcher.fetch_holding_records(title_id).await? {
                FetchOutcome::Found(holdings) => holdings,
                FetchOutcome::NotFound => return Ok(not_found(title_id, "holding records")),
            }
        } else {
            Vec::new()
        };

        let items = match self.fetcher.fetch_item_availabilities(title_id).await? {
            FetchOutcome::Found(items) => items,
            FetchOutcome::NotFound => return Ok(not_found(title_id, "item availability")),
        };

        let serials = if !brief && config.use_serial_subscriptions {
            match self.fetcher.fetch_serial_subscriptions(title_id).await? {
                FetchOutcome::Found(serials) => Some(serials),
                FetchOutcome::NotFound => return Ok(not_found(title_id, "serial subscriptions")),
            }
        } else {
            None
        };

        tracing::debug!(
            "Fetched title {}: {} items, {} holdings, {} subscriptions",
            title_id,
            items.len(),
            holdings.len(),
            serials.as_ref().map_or(0, Vec::len)
        );
        Ok(Some(TitleRecords {
            items,
            holdings,
            serials,
        }))
    }
}

fn not_found(title_id: &str, what: &str) -> Option<TitleRecords> {
    tracing::debug!("Title {} not found while fetching {}", title_id, what);
    None
}
