//! Item entries built from raw item availability records

use std::collections::HashSet;

use crate::config::HoldingsConfig;
use crate::engine::index::HoldingIndex;
use crate::engine::location::Shelf;
use crate::engine::status::due_date;
use crate::engine::{EngineSettings, LookupContext};
use crate::models::{Holdability, HoldingsEntry, ItemIdentity, RawItemAvailability};

const NOT_HOLDABLE: &str = "Hold::NotHoldable";
const ARTICLE_REQUEST_NOT_ALLOWED: &str = "ArticleRequest::NotAllowed";
const CHECKED_OUT: &str = "Item::CheckedOut";

/// Item entries plus the holdings that turned out to have items
#[derive(Debug, Default)]
pub struct ItemEntries {
    pub entries: Vec<HoldingsEntry>,
    pub holdings_with_items: HashSet<String>,
}

/// One entry per item, in fetch order. The position of an item is its index in
/// `items`, so items skipped under suppressed holdings leave a gap.
pub fn build_item_entries(
    title_id: &str,
    items: &[RawItemAvailability],
    index: &HoldingIndex,
    settings: &EngineSettings,
    ctx: &LookupContext<'_>,
) -> ItemEntries {
    let config = &settings.config;
    let formatter = settings.formatter();
    let mut result = ItemEntries {
        entries: Vec::with_capacity(items.len()),
        holdings_with_items: HashSet::new(),
    };

    for (position, item) in items.iter().enumerate() {
        let holding = item
            .holding_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .and_then(|id| index.get(id));
        if let Some(holding) = holding {
            if holding.is_suppressed() {
                tracing::debug!(
                    "Skipping item {} of suppressed holding {}",
                    item.item_id,
                    holding.record.holding_id
                );
                continue;
            }
            result
                .holdings_with_items
                .insert(holding.record.holding_id.clone());
        }

        let status_array = settings.statuses.status_codes(&item.availability, ctx.now);
        let status = settings.statuses.pick_status(&status_array);
        let shelf = Shelf::of_item(item, config.use_home_branch);

        let holdability = ctx.patron.map(|_| item_holdability(item, config));

        result.entries.push(HoldingsEntry {
            id: title_id.to_string(),
            item_id: ItemIdentity::Item(item.item_id.clone()),
            location: formatter.shelf_location(&shelf),
            department: Some(item.sub_description.clone().unwrap_or_default()),
            availability: item.availability.available,
            status,
            status_array,
            use_unknown_message: false,
            duedate: due_date(&item.availability, &config.date_format),
            callnumber: formatter.shelf_call_number(&shelf),
            number: item.enumchron.clone(),
            barcode: item.barcode.clone(),
            requests_placed: Some(item.hold_queue_length.max(item.title_hold_queue_length)),
            branch_id: shelf.branch.map(str::to_string),
            location_id: item.location.clone(),
            sort: position,
            item_notes: item
                .item_notes
                .clone()
                .filter(|n| !n.is_empty())
                .map(|n| vec![n]),
            purchase_history: None,
            holdability: Some(holdability.unwrap_or_else(Holdability::denied)),
            marc: holding.and_then(|h| h.details.clone()),
        });
    }

    tracing::debug!(
        "Built {} item entries for title {} ({} holdings with items)",
        result.entries.len(),
        title_id,
        result.holdings_with_items.len()
    );
    result
}

/// Hold and storage-retrieval options of an item for a logged-in patron
fn item_holdability(item: &RawItemAvailability, config: &HoldingsConfig) -> Holdability {
    let availability = &item.availability;
    let holdable = !availability.has(NOT_HOLDABLE);
    let retrievable = !availability.has(ARTICLE_REQUEST_NOT_ALLOWED)
        && (config.allow_checked_out_storage_retrieval || !availability.has(CHECKED_OUT));

    Holdability {
        is_holdable: holdable,
        level: holdable.then_some("copy"),
        add_link: holdable.then_some("check"),
        storage_retrieval_request: retrievable.then_some("auto"),
        add_storage_retrieval_request_link: retrievable.then_some("check"),
    }
}
