//! Configuration management for the holdings aggregator

use std::collections::HashMap;
use std::env;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Where the fixture-backed fetcher looks for `<title>.json` files
#[derive(Debug, Deserialize, Clone)]
pub struct FixtureConfig {
    pub dir: String,
}

/// Due-date format used when none is configured or the configured one is invalid
pub const DEFAULT_DATE_FORMAT: &str = "%-d.%-m.%Y";

/// Issue window applied to serial subscriptions
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SerialFilter {
    /// Every received issue is shown
    #[default]
    None,
    /// Only the latest year with a received issue
    #[serde(alias = "last year")]
    LastYear,
    /// Current and previous calendar year
    #[serde(alias = "current+1")]
    CurrentPlusOne,
}

/// `[holdings]` section
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HoldingsConfig {
    pub use_holding_records: bool,
    pub use_serial_subscriptions: bool,
    pub group_by_location: bool,
    pub display_ccode: bool,
    pub display_full_call_number: bool,
    pub use_non_display_call_number: bool,
    pub use_home_branch: bool,
    pub sort_items_by_enumchron: bool,
    pub serial_subscription_filter: SerialFilter,
    pub display_total_hold_count: bool,
    pub display_item_hold_counts: bool,
    /// Colon-separated branch order, e.g. `MAIN:EAST=5:MAIN/REF`
    pub holdings_branch_order: Option<String>,
    /// Colon-separated location order, e.g. `ADULT:CHILD`
    pub holdings_location_order: Option<String>,
    /// MFHD field specs (`852z`, `866a:867a`)
    pub notes: String,
    pub summary: String,
    pub supplements: Option<String>,
    pub indexes: Option<String>,
    pub links: Option<String>,
    pub status_rankings: Vec<StatusRanking>,
    pub item_status_mappings: Vec<StatusMapping>,
    pub allow_checked_out_storage_retrieval: bool,
    /// chrono format string for due dates
    pub date_format: String,
}

/// Rank of a display status; lower wins
#[derive(Debug, Deserialize, Clone)]
pub struct StatusRanking {
    pub status: String,
    pub rank: u32,
}

/// Maps an unavailability code (e.g. `Item::Damaged`) straight to a status
#[derive(Debug, Deserialize, Clone)]
pub struct StatusMapping {
    pub code: String,
    pub status: String,
}

/// Display name for a code. Kept as a list so code case survives config keys.
#[derive(Debug, Deserialize, Clone)]
pub struct CodeName {
    pub code: String,
    pub name: String,
}

/// `[translations]` section
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Translations {
    pub branches: Vec<CodeName>,
    pub locations: Vec<CodeName>,
    pub collections: Vec<CodeName>,
}

impl Translations {
    /// Flatten one list into a lookup table
    pub fn table(names: &[CodeName]) -> HashMap<String, String> {
        names
            .iter()
            .map(|n| (n.code.clone(), n.name.clone()))
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub holdings: HoldingsConfig,
    #[serde(default)]
    pub translations: Translations,
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // HOLDINGS_HOLDINGS__GROUP_BY_LOCATION=true
            .add_source(
                Environment::with_prefix("HOLDINGS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("fixtures.dir", env::var("HOLDINGS_FIXTURE_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            dir: "fixtures".to_string(),
        }
    }
}

impl Default for HoldingsConfig {
    fn default() -> Self {
        Self {
            use_holding_records: false,
            use_serial_subscriptions: false,
            group_by_location: false,
            display_ccode: false,
            display_full_call_number: false,
            use_non_display_call_number: false,
            use_home_branch: false,
            sort_items_by_enumchron: false,
            serial_subscription_filter: SerialFilter::None,
            display_total_hold_count: false,
            display_item_hold_counts: true,
            holdings_branch_order: None,
            holdings_location_order: None,
            notes: "852z".to_string(),
            summary: "866a".to_string(),
            supplements: None,
            indexes: None,
            links: None,
            status_rankings: Vec::new(),
            item_status_mappings: Vec::new(),
            allow_checked_out_storage_retrieval: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sections() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.holdings.display_item_hold_counts);
        assert_eq!(config.holdings.notes, "852z");
        assert_eq!(config.holdings.serial_subscription_filter, SerialFilter::None);
    }

    #[test]
    fn test_holdings_section() {
        let config = AppConfig::from_toml(
            r#"
            [holdings]
            use_holding_records = true
            group_by_location = true
            serial_subscription_filter = "last year"
            holdings_branch_order = "MAIN:EAST=5"

            [[holdings.status_rankings]]
            status = "In Transit"
            rank = 3

            [[translations.branches]]
            code = "MAIN"
            name = "Main Library"
            "#,
        )
        .unwrap();

        assert!(config.holdings.use_holding_records);
        assert!(config.holdings.group_by_location);
        assert_eq!(
            config.holdings.serial_subscription_filter,
            SerialFilter::LastYear
        );
        assert_eq!(config.holdings.status_rankings[0].status, "In Transit");
        assert_eq!(config.holdings.status_rankings[0].rank, 3);
        let branches = Translations::table(&config.translations.branches);
        assert_eq!(branches.get("MAIN").map(String::as_str), Some("Main Library"));
    }

    #[test]
    fn test_serial_filter_aliases() {
        let config = AppConfig::from_toml(
            "[holdings]\nserial_subscription_filter = \"current+1\"\n",
        )
        .unwrap();
        assert_eq!(
            config.holdings.serial_subscription_filter,
            SerialFilter::CurrentPlusOne
        );
    }
}
