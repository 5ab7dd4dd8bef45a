//! End-to-end lookups over the JSON fixture files in `tests/fixtures`

use std::path::PathBuf;
use std::sync::Arc;

use tokio_test::assert_ok;

use holdings_aggregator::{
    config::AppConfig,
    models::{ItemIdentity, Patron, TitleStatus, SUMMARY_LOCATION},
    repository::JsonFileFetcher,
    AppState,
};

const CONFIG: &str = r#"
[holdings]
use_holding_records = true
use_serial_subscriptions = true
display_full_call_number = true
display_total_hold_count = true
serial_subscription_filter = "last-year"

[[translations.branches]]
code = "MAIN"
name = "Main Library"
"#;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn state_with(config: &str) -> AppState {
    let config = AppConfig::from_toml(config).expect("valid test config");
    AppState::new(config, Arc::new(JsonFileFetcher::new(fixtures_dir())))
}

fn state() -> AppState {
    state_with(CONFIG)
}

#[tokio::test]
async fn test_full_lookup_merges_all_sources() {
    let state = state();
    let result = assert_ok!(state.services.holdings.get_holding("1001", None).await);

    let ids: Vec<String> = result.items().map(|e| e.item_id.to_string()).collect();
    assert_eq!(ids, ["HLD_H2", "5004", "5001", "5002"]);

    let orphan = result.items().next().unwrap();
    assert_eq!(orphan.location, "ANNEX");
    assert_eq!(orphan.callnumber, "STACKS QA76");
    assert!(orphan.use_unknown_message);
    let marc = orphan.marc.as_ref().expect("holding details");
    assert_eq!(marc.summary, ["1990-2005"]);
    assert_eq!(marc.notes, ["Campus network only"]);

    let transit = result.items().nth(1).unwrap();
    assert_eq!(transit.status, "In Transit On Hold");
    assert_eq!(transit.item_notes, Some(vec!["Large print".to_string()]));

    let on_shelf = result.items().nth(2).unwrap();
    assert_eq!(on_shelf.location, "Main Library");
    assert_eq!(on_shelf.callnumber, "ADULT, 84.2 TOL");
    assert_eq!(on_shelf.requests_placed, Some(1));

    let charged = result.items().nth(3).unwrap();
    assert_eq!(charged.status, "Charged");
    assert_eq!(charged.duedate.as_deref(), Some("15.3.2099"));

    let summary = result.summary().expect("summary appended");
    assert_eq!(summary.available, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.locations, 3);
    assert_eq!(summary.reservations, Some(2));
    assert_eq!(summary.location, SUMMARY_LOCATION);

    assert_eq!(result.electronic_holdings.len(), 2);
    for link in &result.electronic_holdings {
        assert_eq!(link.location, "1990-2005. Digitized volumes. Campus network only");
        assert_eq!(link.item_id, ItemIdentity::Holding("H2".to_string()));
    }
    assert_eq!(
        result.electronic_holdings[0].location_href,
        "https://archive.example.org/1001"
    );
}

#[tokio::test]
async fn test_suppressed_holding_items_are_dropped() {
    let state = state();
    let result = state.services.holdings.get_holding("1001", None).await.unwrap();
    assert!(result.items().all(|e| e.item_id.to_string() != "5003"));
    assert!(result.items().all(|e| e.item_id.to_string() != "HLD_H9"));
}

#[tokio::test]
async fn test_patron_lookup_sets_hold_options() {
    let state = state();
    let patron = Patron {
        id: "patron-1".to_string(),
    };
    let result = state
        .services
        .holdings
        .get_holding("1001", Some(&patron))
        .await
        .unwrap();

    let by_id = |id: &str| {
        result
            .items()
            .find(|e| e.item_id.to_string() == id)
            .unwrap()
            .clone()
    };
    assert!(by_id("5001").is_holdable());
    assert!(!by_id("5004").is_holdable());
    let charged = by_id("5002");
    let options = charged.holdability.as_ref().unwrap();
    assert!(options.is_holdable);
    assert_eq!(options.storage_retrieval_request, None);
}

#[tokio::test]
async fn test_serial_subscription_keeps_last_year() {
    let state = state();
    let result = state.services.holdings.get_holding("2002", None).await.unwrap();

    let serial = result.items().next().expect("serial entry");
    assert_eq!(serial.item_id.to_string(), "SERIAL_0");
    assert_eq!(serial.location, "Main Library");
    assert_eq!(serial.callnumber, "PERIODICALS, 05");
    let issues: Vec<&str> = serial
        .purchase_history
        .as_ref()
        .unwrap()
        .iter()
        .map(|i| i.issue.as_str())
        .collect();
    assert_eq!(issues, ["11/2023", "2/2023"]);
    assert_eq!(result.summary().unwrap().total, 1);
}

#[tokio::test]
async fn test_missing_sections_give_empty_result() {
    let state = state();
    let holdings = &state.services.holdings;
    assert!(assert_ok!(holdings.get_holding("3003", None).await).is_empty());
    assert!(assert_ok!(holdings.get_holding("9999", None).await).is_empty());
    assert!(assert_ok!(holdings.get_status("9999").await).is_empty());
}

#[tokio::test]
async fn test_item_hold_counts_stripped_when_disabled() {
    let state = state_with(
        r#"
        [holdings]
        display_item_hold_counts = false
        display_total_hold_count = true
        "#,
    );
    let result = state.services.holdings.get_holding("1001", None).await.unwrap();
    assert!(result.items().all(|e| e.requests_placed.is_none()));
    assert_eq!(result.summary().unwrap().reservations, Some(2));

    let status = state.services.holdings.get_status("1001").await.unwrap();
    assert!(status.iter().filter_map(|e| e.as_item()).any(|e| e.requests_placed.is_some()));
}

#[tokio::test]
async fn test_brief_statuses_merge_lists_and_isolate_failures() {
    let state = state();
    let titles = vec!["1001".to_string(), "3003".to_string(), "../secret".to_string()];
    let statuses = state.services.holdings.get_statuses(&titles).await;

    assert_eq!(statuses.len(), 3);
    match &statuses[0] {
        TitleStatus::Available { entries, .. } => assert_eq!(entries.len(), 6),
        other => panic!("unexpected status {:?}", other),
    }
    match &statuses[1] {
        TitleStatus::Available { entries, .. } => assert!(entries.is_empty()),
        other => panic!("unexpected status {:?}", other),
    }
    assert!(matches!(&statuses[2], TitleStatus::Unavailable { id, .. } if id == "../secret"));

    let json = serde_json::to_value(&statuses).unwrap();
    assert_eq!(json[2]["result"], "unavailable");
    assert_eq!(json[2]["message"], "Holdings unavailable");
}

#[tokio::test]
async fn test_output_json_shape() {
    let state = state();
    let result = state.services.holdings.get_holding("1001", None).await.unwrap();
    let json = serde_json::to_value(&result).unwrap();

    let first = &json["holdings"][0];
    assert_eq!(first["item_id"], "HLD_H2");
    assert_eq!(first["branchId"], "ANNEX");
    assert_eq!(first["holdings_id"], "H2");
    let last = json["holdings"].as_array().unwrap().last().unwrap();
    assert_eq!(last["location"], SUMMARY_LOCATION);
    assert!(last["availability"].is_null());
    assert_eq!(json["electronic_holdings"][0]["locationhref"], "https://archive.example.org/1001");
}
