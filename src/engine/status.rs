//! Item status derivation and display-status precedence

use std::collections::HashMap;
use std::fmt::Write;

use chrono::format::{DelayedFormat, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::Availability;

/// Rank of statuses missing from the ranking table
pub const UNRANKED: u32 = 32000;

/// Built-in ranking; configured rankings are merged over it
pub const DEFAULT_RANKINGS: [(&str, u32); 2] = [("Charged", 1), ("On Hold", 2)];

pub const ON_SHELF: &str = "On Shelf";
pub const NOT_AVAILABLE: &str = "Not Available";
pub const NO_INFORMATION: &str = "No information available";

const CHECKED_OUT: &str = "Item::CheckedOut";
const LOST: &str = "Item::Lost";

/// Turns availability blocks into status codes and picks the one to display
#[derive(Debug, Clone)]
pub struct StatusResolver {
    rankings: HashMap<String, u32>,
    mappings: HashMap<String, String>,
}

impl StatusResolver {
    pub fn new(rankings: HashMap<String, u32>, mappings: HashMap<String, String>) -> Self {
        Self { rankings, mappings }
    }

    /// Status codes of an item, in unavailability order and without duplicates
    pub fn status_codes(&self, availability: &Availability, now: DateTime<Utc>) -> Vec<String> {
        let mut statuses: Vec<String> = Vec::new();
        if availability.available {
            statuses.push(ON_SHELF.to_string());
        } else {
            for (key, reason) in &availability.unavailabilities {
                if let Some(mapped) = self.mappings.get(key) {
                    statuses.push(mapped.clone());
                } else if let Some(status) = key.strip_prefix("Item::") {
                    let label = match status {
                        "CheckedOut" => {
                            let overdue = reason
                                .date_due
                                .as_deref()
                                .and_then(parse_due)
                                .is_some_and(|due| due < now);
                            let label = if overdue { "Overdue" } else { "Charged" };
                            label.to_string()
                        }
                        "Lost" => "Lost--Library Applied".to_string(),
                        "NotForLoan" | "NotForLoanForcing" => match reason.code.as_deref() {
                            Some(code) if code != "Not For Loan" => code.to_string(),
                            _ => "On Reference Desk".to_string(),
                        },
                        "Transfer" => {
                            if availability.notes.contains_key("Item::Held") {
                                "In Transit On Hold".to_string()
                            } else {
                                "In Transit".to_string()
                            }
                        }
                        "Held" => "On Hold".to_string(),
                        "Waiting" => "On Holdshelf".to_string(),
                        other => reason
                            .code
                            .clone()
                            .filter(|c| !c.is_empty())
                            .unwrap_or_else(|| other.to_string()),
                    };
                    statuses.push(label);
                } else if key == "ItemType::NotForLoan" {
                    statuses.push("On Reference Desk".to_string());
                }
            }
            if statuses.is_empty() {
                statuses.push(NOT_AVAILABLE.to_string());
            }
        }

        let mut unique = Vec::with_capacity(statuses.len());
        for status in statuses {
            if !unique.contains(&status) {
                unique.push(status);
            }
        }
        unique
    }

    pub fn rank(&self, status: &str) -> u32 {
        self.rankings.get(status).copied().unwrap_or(UNRANKED)
    }

    /// First status unless a later one has a strictly better rank
    pub fn pick_status(&self, statuses: &[String]) -> String {
        let Some((first, rest)) = statuses.split_first() else {
            return NO_INFORMATION.to_string();
        };
        let mut picked = first;
        let mut rank = self.rank(first);
        for status in rest {
            let candidate = self.rank(status);
            if candidate < rank {
                picked = status;
                rank = candidate;
            }
        }
        picked.clone()
    }
}

/// Display due date of a checked-out item that is not lost
pub fn due_date(availability: &Availability, format: &str) -> Option<String> {
    if availability.has(LOST) {
        return None;
    }
    let raw = availability.unavailabilities.get(CHECKED_OUT)?.date_due.as_deref()?;
    let rendered = if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        render(date.format(format))
    } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        render(date.format(format))
    } else {
        None
    };
    if rendered.is_none() {
        tracing::warn!("Cannot render due date '{}' with '{}', showing it as is", raw, format);
    }
    Some(rendered.unwrap_or_else(|| raw.to_string()))
}

fn render(formatted: DelayedFormat<StrftimeItems<'_>>) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}

fn parse_due(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}
