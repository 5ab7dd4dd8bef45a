//! Holdings aggregation engine
//!
//! Synchronous: every record is fetched before the engine runs. Lookups share
//! one immutable [`EngineSettings`] snapshot.

pub mod electronic;
pub mod index;
pub mod items;
pub mod location;
pub mod orphans;
pub mod serials;
pub mod sort;
pub mod status;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Utc};

use crate::config::{HoldingsConfig, Translations, DEFAULT_DATE_FORMAT};
use crate::models::{
    ElectronicHoldingsEntry, HoldingsEntry, Patron, PhysicalEntry, RawHoldingRecord, RawItemAvailability,
    RawSerialSubscription, TitleHoldings,
};

use self::index::HoldingIndex;
use self::location::{Labels, LocationFormatter};
use self::sort::SortOrder;
use self::status::{StatusResolver, DEFAULT_RANKINGS};

/// Configuration compiled into lookup tables
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub config: HoldingsConfig,
    pub labels: Labels,
    pub order: SortOrder,
    pub statuses: StatusResolver,
}

impl EngineSettings {
    pub fn new(mut config: HoldingsConfig, translations: &Translations) -> Self {
        if !is_valid_date_format(&config.date_format) {
            tracing::warn!(
                "Invalid due date format '{}', using '{}'",
                config.date_format,
                DEFAULT_DATE_FORMAT
            );
            config.date_format = DEFAULT_DATE_FORMAT.to_string();
        }

        let mut rankings: HashMap<String, u32> = DEFAULT_RANKINGS
            .iter()
            .map(|(status, rank)| (status.to_string(), *rank))
            .collect();
        for ranking in &config.status_rankings {
            rankings.insert(ranking.status.clone(), ranking.rank);
        }
        let mappings = config
            .item_status_mappings
            .iter()
            .map(|m| (m.code.clone(), m.status.clone()))
            .collect();

        let order = SortOrder::parse(
            config.holdings_branch_order.as_deref(),
            config.holdings_location_order.as_deref(),
            config.sort_items_by_enumchron,
        );

        Self {
            labels: Labels::new(translations),
            order,
            statuses: StatusResolver::new(rankings, mappings),
            config,
        }
    }

    pub fn formatter(&self) -> LocationFormatter<'_> {
        LocationFormatter::new(&self.config, &self.labels)
    }
}

fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Raw records of one title
#[derive(Debug, Clone, Default)]
pub struct TitleRecords {
    pub items: Vec<RawItemAvailability>,
    pub holdings: Vec<RawHoldingRecord>,
    /// `None` when subscriptions were not fetched
    pub serials: Option<Vec<RawSerialSubscription>>,
}

/// Per-lookup inputs that are not records
#[derive(Debug, Clone, Copy)]
pub struct LookupContext<'a> {
    pub patron: Option<&'a Patron>,
    /// Brief lookups skip serial subscriptions
    pub brief: bool,
    pub now: DateTime<Utc>,
}

/// Fetch-order positions shared by orphan, serial and electronic entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionCounter {
    next: usize,
}

impl PositionCounter {
    pub fn starting_at(next: usize) -> Self {
        Self { next }
    }

    /// Hand out the current position and advance
    pub fn take(&mut self) -> usize {
        let position = self.next;
        self.next += 1;
        position
    }

    pub fn peek(&self) -> usize {
        self.next
    }
}

#[derive(Debug, Clone)]
pub struct HoldingsEngine {
    settings: Arc<EngineSettings>,
}

impl HoldingsEngine {
    pub fn new(settings: Arc<EngineSettings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Sorted physical and electronic entries, without summary
    pub fn aggregate(
        &self,
        title_id: &str,
        records: TitleRecords,
        ctx: &LookupContext<'_>,
    ) -> (Vec<HoldingsEntry>, Vec<ElectronicHoldingsEntry>) {
        let settings = self.settings.as_ref();
        let config = &settings.config;

        let index = HoldingIndex::build(records.holdings, config);
        let built = items::build_item_entries(title_id, &records.items, &index, settings, ctx);
        let mut physical = built.entries;
        let mut counter = PositionCounter::starting_at(records.items.len());

        physical.extend(orphans::build_orphan_entries(
            title_id,
            &index,
            &built.holdings_with_items,
            settings,
            &mut counter,
        ));

        if !ctx.brief && config.use_serial_subscriptions {
            if let Some(subscriptions) = records.serials.as_deref() {
                serials::merge_serial_entries(
                    title_id,
                    &mut physical,
                    subscriptions,
                    settings,
                    ctx.now.year(),
                    &mut counter,
                );
            }
        }

        let mut electronic = electronic::extract_electronic_entries(title_id, &index, &mut counter);

        settings.order.sort(&mut physical);
        settings.order.sort(&mut electronic);

        tracing::debug!(
            "Aggregated title {}: {} physical, {} electronic entries",
            title_id,
            physical.len(),
            electronic.len()
        );
        (physical, electronic)
    }

    /// Full lookup: physical list with summary, item hold counts stripped when
    /// configured, and electronic links
    pub fn lookup(&self, title_id: &str, records: TitleRecords, ctx: &LookupContext<'_>) -> TitleHoldings {
        let (physical, electronic) = self.aggregate(title_id, records, ctx);
        TitleHoldings {
            holdings: summary::with_summary(physical, &self.settings.config, true),
            electronic_holdings: electronic,
        }
    }

    /// Physical list with summary; hold counts are left in place
    pub fn status(&self, title_id: &str, records: TitleRecords, ctx: &LookupContext<'_>) -> Vec<PhysicalEntry> {
        let (physical, _) = self.aggregate(title_id, records, ctx);
        summary::with_summary(physical, &self.settings.config, false)
    }
}
