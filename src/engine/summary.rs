//! Aggregate counts appended to the physical holdings list

use std::collections::HashSet;

use crate::config::HoldingsConfig;
use crate::models::{HoldingsEntry, PhysicalEntry, SummaryEntry};

pub fn summarize(entries: &[HoldingsEntry], config: &HoldingsConfig) -> SummaryEntry {
    let available = entries.iter().filter(|e| e.availability).count();
    let total = entries.iter().filter(|e| !e.item_id.is_holding_placeholder()).count();
    let locations = entries
        .iter()
        .map(|e| e.location.as_str())
        .collect::<HashSet<_>>()
        .len();
    let reservations = config.display_total_hold_count.then(|| {
        entries
            .iter()
            .filter_map(|e| e.requests_placed)
            .max()
            .unwrap_or(0)
    });
    SummaryEntry::new(available, total, locations, reservations)
}

/// Physical list with the summary as its last element. An empty list stays empty.
pub fn with_summary(
    mut entries: Vec<HoldingsEntry>,
    config: &HoldingsConfig,
    strip_hold_counts: bool,
) -> Vec<PhysicalEntry> {
    if entries.is_empty() {
        return Vec::new();
    }
    let summary = summarize(&entries, config);
    if strip_hold_counts && !config.display_item_hold_counts {
        for entry in &mut entries {
            entry.requests_placed = None;
        }
    }
    entries
        .into_iter()
        .map(PhysicalEntry::Item)
        .chain(std::iter::once(PhysicalEntry::Summary(summary)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::entry;
    use crate::models::ItemIdentity;

    fn sample() -> Vec<HoldingsEntry> {
        let mut checked_out = entry(1, "Main", None, None);
        checked_out.availability = false;
        checked_out.requests_placed = Some(4);
        let mut orphan = entry(2, "East", None, None);
        orphan.item_id = ItemIdentity::Holding("H1".to_string());
        orphan.availability = false;
        let mut serial = entry(3, "East", None, None);
        serial.item_id = ItemIdentity::Serial(3);
        serial.availability = false;
        vec![entry(0, "Main", None, None), checked_out, orphan, serial]
    }

    #[test]
    fn test_total_excludes_only_holding_placeholders() {
        let summary = summarize(&sample(), &HoldingsConfig::default());
        assert_eq!(summary.available, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.locations, 2);
        assert_eq!(summary.reservations, None);
    }

    #[test]
    fn test_reservations_when_total_hold_count_shown() {
        let config = HoldingsConfig {
            display_total_hold_count: true,
            ..Default::default()
        };
        assert_eq!(summarize(&sample(), &config).reservations, Some(4));
    }

    #[test]
    fn test_summary_appended_and_counts_stripped_after() {
        let config = HoldingsConfig {
            display_total_hold_count: true,
            display_item_hold_counts: false,
            ..Default::default()
        };
        let list = with_summary(sample(), &config, true);
        assert_eq!(list.len(), 5);
        assert_eq!(list[4].as_summary().unwrap().reservations, Some(4));
        assert!(list[..4]
            .iter()
            .all(|e| e.as_item().unwrap().requests_placed.is_none()));

        let kept = with_summary(sample(), &config, false);
        assert_eq!(kept[1].as_item().unwrap().requests_placed, Some(4));
    }

    #[test]
    fn test_empty_list_gets_no_summary() {
        assert!(with_summary(Vec::new(), &HoldingsConfig::default(), true).is_empty());
    }
}
