//! Record builders shared by the engine tests

use crate::config::HoldingsConfig;
use crate::engine::EngineSettings;
use crate::models::{
    Availability, HoldingMetadata, HoldingsEntry, Issue, ItemIdentity, RawHoldingRecord,
    RawItemAvailability, RawSerialSubscription, Unavailability,
};

/// MARC21 MARCXML blob wrapping the given data fields
pub fn marcxml(body: &str) -> HoldingMetadata {
    HoldingMetadata {
        format: "marcxml".to_string(),
        marcflavour: "MARC21".to_string(),
        metadata: format!(
            r#"<record xmlns="http://www.loc.gov/MARC21/slim"><leader>00000nx  a2200000un 4500</leader>{}</record>"#,
            body
        ),
    }
}

/// Available item shelved at `branch`
pub fn item(id: &str, branch: &str) -> RawItemAvailability {
    RawItemAvailability {
        item_id: id.to_string(),
        holding_branch: Some(branch.to_string()),
        home_branch: Some(branch.to_string()),
        availability: Availability {
            available: true,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Unavailable item carrying the given unavailability codes
pub fn unavailable_item(id: &str, branch: &str, codes: &[&str]) -> RawItemAvailability {
    let mut raw = item(id, branch);
    raw.availability.available = false;
    for code in codes {
        raw.availability
            .unavailabilities
            .insert(code.to_string(), Unavailability::default());
    }
    raw
}

pub fn holding(id: &str, branch: &str) -> RawHoldingRecord {
    RawHoldingRecord {
        holding_id: id.to_string(),
        biblionumber: Some("100".to_string()),
        holding_branch: Some(branch.to_string()),
        ..Default::default()
    }
}

pub fn issue(published_date: &str, sequence: &str, received: bool) -> Issue {
    Issue {
        published_date: published_date.to_string(),
        received,
        sequence: sequence.to_string(),
        notes: None,
    }
}

pub fn subscription(branch: &str, issues: Vec<Issue>) -> RawSerialSubscription {
    RawSerialSubscription {
        branch: Some(branch.to_string()),
        issues,
        ..Default::default()
    }
}

pub fn settings(config: HoldingsConfig) -> EngineSettings {
    EngineSettings::new(config, &Default::default())
}

/// Bare physical entry for comparator tests
pub fn entry(position: usize, location: &str, branch: Option<&str>, location_id: Option<&str>) -> HoldingsEntry {
    HoldingsEntry {
        id: "100".to_string(),
        item_id: ItemIdentity::Item(position.to_string()),
        location: location.to_string(),
        department: None,
        availability: true,
        status: "On Shelf".to_string(),
        status_array: Vec::new(),
        use_unknown_message: false,
        duedate: None,
        callnumber: String::new(),
        number: None,
        barcode: None,
        requests_placed: Some(0),
        branch_id: branch.map(str::to_string),
        location_id: location_id.map(str::to_string),
        sort: position,
        item_notes: None,
        purchase_history: None,
        holdability: None,
        marc: None,
    }
}
