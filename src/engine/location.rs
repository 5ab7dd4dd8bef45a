//! Display names for branches, shelving locations and collections, and the
//! location/call number strings built from them

use std::collections::HashMap;

use crate::config::{HoldingsConfig, Translations};
use crate::models::{RawHoldingRecord, RawItemAvailability, RawSerialSubscription};

/// Code to display-name lookups
#[derive(Debug, Clone, Default)]
pub struct Labels {
    branches: HashMap<String, String>,
    locations: HashMap<String, String>,
    collections: HashMap<String, String>,
}

impl Labels {
    pub fn new(translations: &Translations) -> Self {
        Self {
            branches: Translations::table(&translations.branches),
            locations: Translations::table(&translations.locations),
            collections: Translations::table(&translations.collections),
        }
    }

    /// Branch name. A location translation of the same code wins over the
    /// branch translation; the branch id is the last fallback.
    pub fn branch(&self, branch_id: &str) -> String {
        self.locations
            .get(branch_id)
            .or_else(|| self.branches.get(branch_id))
            .cloned()
            .unwrap_or_else(|| branch_id.to_string())
    }

    /// Shelving location name. `default` is used when the code has no translation.
    pub fn location(&self, code: Option<&str>, default: Option<&str>) -> String {
        match code.filter(|c| !c.is_empty()) {
            None => default.unwrap_or_default().to_string(),
            Some(code) => self
                .locations
                .get(code)
                .cloned()
                .unwrap_or_else(|| default.unwrap_or(code).to_string()),
        }
    }

    /// Collection name, falling back to the description sent with the record
    pub fn collection(&self, code: &str, description: Option<&str>) -> String {
        self.collections
            .get(code)
            .cloned()
            .unwrap_or_else(|| description.unwrap_or(code).to_string())
    }
}

/// Shelf placement fields shared by items and serial subscriptions
#[derive(Debug, Clone, Copy, Default)]
pub struct Shelf<'a> {
    pub branch: Option<&'a str>,
    pub location: Option<&'a str>,
    pub location_description: Option<&'a str>,
    pub ccode: Option<&'a str>,
    pub ccode_description: Option<&'a str>,
    pub call_number: Option<&'a str>,
    pub call_number_display: Option<&'a str>,
}

impl<'a> Shelf<'a> {
    /// Item shelf; the holding branch wins unless home branches are configured
    pub fn of_item(item: &'a RawItemAvailability, use_home_branch: bool) -> Self {
        let branch = if use_home_branch || item.holding_branch.is_none() {
            item.home_branch.as_deref()
        } else {
            item.holding_branch.as_deref()
        };
        Self {
            branch,
            location: item.location.as_deref(),
            location_description: item.location_description.as_deref(),
            ccode: item.ccode.as_deref(),
            ccode_description: item.ccode_description.as_deref(),
            call_number: item.call_number.as_deref(),
            call_number_display: item.call_number_display.as_deref(),
        }
    }

    pub fn of_subscription(subscription: &'a RawSerialSubscription) -> Self {
        Self {
            branch: subscription.branch.as_deref(),
            location: subscription.location.as_deref(),
            location_description: subscription.location_description.as_deref(),
            ccode: None,
            ccode_description: None,
            call_number: subscription.callnumber.as_deref(),
            call_number_display: subscription.callnumber.as_deref(),
        }
    }

    /// Description if present, otherwise the code
    fn location_default(&self) -> Option<&'a str> {
        self.location_description
            .filter(|d| !d.is_empty())
            .or(self.location)
    }
}

/// Builds display strings according to the holdings configuration
#[derive(Debug, Clone, Copy)]
pub struct LocationFormatter<'a> {
    config: &'a HoldingsConfig,
    labels: &'a Labels,
}

impl<'a> LocationFormatter<'a> {
    pub fn new(config: &'a HoldingsConfig, labels: &'a Labels) -> Self {
        Self { config, labels }
    }

    /// Branch name, followed by the shelving location when grouping by location
    pub fn shelf_location(&self, shelf: &Shelf<'_>) -> String {
        let mut result = shelf.branch.map(|b| self.labels.branch(b)).unwrap_or_default();
        if self.config.group_by_location {
            let location = self.labels.location(shelf.location, shelf.location_default());
            if !location.is_empty() {
                if !result.is_empty() {
                    result.push_str(", ");
                }
                result.push_str(&location);
            }
        }
        result
    }

    /// Collection, shelving location and call number, comma separated
    pub fn shelf_call_number(&self, shelf: &Shelf<'_>) -> String {
        let mut parts = Vec::new();
        if let Some(ccode) = shelf.ccode.filter(|c| !c.is_empty()) {
            if self.config.display_ccode {
                parts.push(self.labels.collection(ccode, shelf.ccode_description));
            }
        }
        if !self.config.group_by_location {
            let location = self.labels.location(shelf.location, shelf.location_default());
            if !location.is_empty() {
                parts.push(location);
            }
        }
        let raw = shelf.call_number.filter(|c| !c.is_empty());
        let display = shelf.call_number_display.filter(|c| !c.is_empty());
        if (raw.is_some() || display.is_some()) && self.config.display_full_call_number {
            let call_number = if self.config.use_non_display_call_number {
                raw.unwrap_or_default()
            } else {
                display.or(raw).unwrap_or_default()
            };
            parts.push(call_number.to_string());
        }
        parts.join(", ")
    }

    /// Location of a holding placeholder
    pub fn holding_location(&self, holding: &RawHoldingRecord) -> String {
        let mut location = holding
            .holding_branch
            .as_deref()
            .map(|b| self.labels.branch(b))
            .unwrap_or_default();
        if self.config.group_by_location {
            let shelving = self.labels.location(holding.location.as_deref(), holding_location_default(holding));
            if !shelving.is_empty() {
                if !location.is_empty() {
                    location.push_str(", ");
                }
                location.push_str(&shelving);
            }
        }
        location
    }

    /// Call number of a holding placeholder. The holding's own call number always
    /// shows; the shelving location joins it when not grouping by location.
    pub fn holding_call_number(&self, holding: &RawHoldingRecord) -> String {
        let mut callnumber = String::new();
        if let Some(ccode) = holding.ccode.as_deref().filter(|c| !c.is_empty()) {
            if self.config.display_ccode {
                callnumber = self
                    .labels
                    .collection(ccode, holding.ccode_description.as_deref());
            }
        }
        if !self.config.group_by_location {
            if !callnumber.is_empty() {
                callnumber.push_str(", ");
            }
            callnumber.push_str(
                &self
                    .labels
                    .location(holding.location.as_deref(), holding_location_default(holding)),
            );
        }
        if let Some(own) = holding.callnumber.as_deref().filter(|c| !c.is_empty()) {
            callnumber.push(' ');
            callnumber.push_str(own);
        }
        callnumber.trim().to_string()
    }
}

fn holding_location_default(holding: &RawHoldingRecord) -> Option<&str> {
    holding
        .location_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .or(holding.location.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodeName;

    fn labels() -> Labels {
        Labels::new(&Translations {
            branches: vec![CodeName {
                code: "MAIN".to_string(),
                name: "Main Library".to_string(),
            }],
            locations: vec![CodeName {
                code: "ADULT".to_string(),
                name: "Adult fiction".to_string(),
            }],
            collections: vec![CodeName {
                code: "REF".to_string(),
                name: "Reference".to_string(),
            }],
        })
    }

    fn shelf() -> Shelf<'static> {
        Shelf {
            branch: Some("MAIN"),
            location: Some("ADULT"),
            location_description: None,
            ccode: Some("REF"),
            ccode_description: Some("Reference works"),
            call_number: Some("84.2"),
            call_number_display: Some("84.2 TOL"),
        }
    }

    #[test]
    fn test_labels_fallbacks() {
        let labels = labels();
        assert_eq!(labels.branch("MAIN"), "Main Library");
        assert_eq!(labels.branch("EAST"), "EAST");
        assert_eq!(labels.location(Some("KIDS"), Some("Children")), "Children");
        assert_eq!(labels.location(None, Some("Children")), "Children");
        assert_eq!(labels.location(Some(""), None), "");
        assert_eq!(labels.collection("MUS", Some("Music")), "Music");
    }

    #[test]
    fn test_location_translation_wins_for_branch() {
        let name = |name: &str| CodeName {
            code: "MAIN".to_string(),
            name: name.to_string(),
        };
        let labels = Labels::new(&Translations {
            branches: vec![name("Main Library")],
            locations: vec![name("Main Library, 2nd floor")],
            collections: Vec::new(),
        });
        assert_eq!(labels.branch("MAIN"), "Main Library, 2nd floor");
    }

    #[test]
    fn test_shelf_strings_without_grouping() {
        let labels = labels();
        let config = HoldingsConfig {
            display_ccode: true,
            display_full_call_number: true,
            ..Default::default()
        };
        let formatter = LocationFormatter::new(&config, &labels);

        assert_eq!(formatter.shelf_location(&shelf()), "Main Library");
        assert_eq!(
            formatter.shelf_call_number(&shelf()),
            "Reference, Adult fiction, 84.2 TOL"
        );
    }

    #[test]
    fn test_shelf_strings_grouped_by_location() {
        let labels = labels();
        let config = HoldingsConfig {
            group_by_location: true,
            display_full_call_number: true,
            use_non_display_call_number: true,
            ..Default::default()
        };
        let formatter = LocationFormatter::new(&config, &labels);

        assert_eq!(formatter.shelf_location(&shelf()), "Main Library, Adult fiction");
        assert_eq!(formatter.shelf_call_number(&shelf()), "84.2");
    }

    #[test]
    fn test_call_number_hidden_unless_full_display() {
        let labels = labels();
        let config = HoldingsConfig::default();
        let formatter = LocationFormatter::new(&config, &labels);
        assert_eq!(formatter.shelf_call_number(&shelf()), "Adult fiction");
    }

    #[test]
    fn test_holding_strings() {
        let labels = labels();
        let holding = RawHoldingRecord {
            holding_id: "5".to_string(),
            holding_branch: Some("MAIN".to_string()),
            location: Some("ADULT".to_string()),
            callnumber: Some("QA76".to_string()),
            ccode: Some("REF".to_string()),
            ..Default::default()
        };

        let config = HoldingsConfig {
            display_ccode: true,
            ..Default::default()
        };
        let formatter = LocationFormatter::new(&config, &labels);
        assert_eq!(formatter.holding_location(&holding), "Main Library");
        assert_eq!(formatter.holding_call_number(&holding), "Reference, Adult fiction QA76");

        let grouped = HoldingsConfig {
            group_by_location: true,
            ..Default::default()
        };
        let formatter = LocationFormatter::new(&grouped, &labels);
        assert_eq!(formatter.holding_location(&holding), "Main Library, Adult fiction");
        assert_eq!(formatter.holding_call_number(&holding), "QA76");
    }
}
