//! Serial subscriptions folded into the physical holdings list

use crate::config::SerialFilter;
use crate::engine::location::Shelf;
use crate::engine::sort::natural_cmp;
use crate::engine::{EngineSettings, PositionCounter};
use crate::models::{HoldingsEntry, Issue, ItemIdentity, PurchaseIssue, RawSerialSubscription};

/// Attach each subscription's received issues to the first entry shelved at the
/// same location, or append a `SERIAL_<n>` entry when there is none.
pub fn merge_serial_entries(
    title_id: &str,
    entries: &mut Vec<HoldingsEntry>,
    subscriptions: &[RawSerialSubscription],
    settings: &EngineSettings,
    current_year: i32,
    counter: &mut PositionCounter,
) {
    let formatter = settings.formatter();
    let filter = settings.config.serial_subscription_filter;

    for subscription in subscriptions {
        let position = counter.take();
        let history: Vec<PurchaseIssue> = received_issues(&subscription.issues, filter, current_year)
            .into_iter()
            .map(|issue| PurchaseIssue { issue })
            .collect();

        let shelf = Shelf::of_subscription(subscription);
        let location = formatter.shelf_location(&shelf);

        if let Some(existing) = entries.iter_mut().find(|e| e.location == location) {
            tracing::debug!(
                "Attaching {} issues to existing entry at '{}'",
                history.len(),
                location
            );
            existing.purchase_history = Some(history);
            continue;
        }

        entries.push(HoldingsEntry {
            id: title_id.to_string(),
            item_id: ItemIdentity::Serial(position),
            location,
            department: None,
            availability: false,
            status: String::new(),
            status_array: Vec::new(),
            use_unknown_message: true,
            duedate: None,
            callnumber: formatter.shelf_call_number(&shelf),
            number: None,
            barcode: None,
            requests_placed: Some(0),
            branch_id: subscription.branch.clone(),
            location_id: subscription.location.clone(),
            sort: position,
            item_notes: None,
            purchase_history: Some(history),
            holdability: None,
            marc: None,
        });
    }
}

/// Issue labels within the filter window, newest first
pub fn received_issues(issues: &[Issue], filter: SerialFilter, current_year: i32) -> Vec<String> {
    let received = || issues.iter().filter(|issue| issue.received);

    let latest_year = match filter {
        SerialFilter::LastYear => received().filter_map(Issue::year).max(),
        _ => None,
    };

    let mut labels: Vec<String> = Vec::new();
    for issue in received() {
        let keep = match filter {
            SerialFilter::None => true,
            // undated issues are kept, `0000` is a year outside the window
            SerialFilter::CurrentPlusOne => issue
                .year()
                .map_or(true, |year| year == current_year || year == current_year - 1),
            SerialFilter::LastYear => latest_year.map_or(true, |latest| issue.year() == Some(latest)),
        };
        if !keep {
            continue;
        }
        let label = issue.display();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    labels.sort_by(|a, b| natural_cmp(a, b));
    labels.reverse();
    labels
}
