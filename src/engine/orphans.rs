//! Placeholder entries for holdings without items

use std::collections::HashSet;

use crate::engine::index::HoldingIndex;
use crate::engine::{EngineSettings, PositionCounter};
use crate::models::{HoldingsEntry, ItemIdentity};

pub fn build_orphan_entries(
    title_id: &str,
    index: &HoldingIndex,
    holdings_with_items: &HashSet<String>,
    settings: &EngineSettings,
    counter: &mut PositionCounter,
) -> Vec<HoldingsEntry> {
    let formatter = settings.formatter();
    let entries: Vec<HoldingsEntry> = index
        .visible()
        .filter(|h| !holdings_with_items.contains(&h.record.holding_id))
        .map(|holding| {
            let record = &holding.record;
            HoldingsEntry {
                id: title_id.to_string(),
                item_id: ItemIdentity::Holding(record.holding_id.clone()),
                location: formatter.holding_location(record),
                department: None,
                availability: false,
                status: String::new(),
                status_array: Vec::new(),
                use_unknown_message: true,
                duedate: None,
                callnumber: formatter.holding_call_number(record),
                number: None,
                barcode: None,
                requests_placed: Some(0),
                branch_id: record.holding_branch.clone(),
                location_id: record.location.clone(),
                sort: counter.take(),
                item_notes: None,
                purchase_history: None,
                holdability: None,
                marc: holding.details.clone(),
            }
        })
        .collect();

    tracing::debug!("Built {} holding entries without items for title {}", entries.len(), title_id);
    entries
}
