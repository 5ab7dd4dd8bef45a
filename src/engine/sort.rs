//! Ordering of holdings entries

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{ElectronicHoldingsEntry, HoldingsEntry};

/// Rank of branches and locations missing from the configured order
pub const DEFAULT_RANK: u32 = 999;

/// Fields the comparator looks at
pub trait SortFields {
    fn branch_id(&self) -> Option<&str>;
    fn location_id(&self) -> Option<&str>;
    fn location(&self) -> &str;
    fn issue_label(&self) -> Option<&str>;
    fn position(&self) -> usize;
}

impl SortFields for HoldingsEntry {
    fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }

    fn location_id(&self) -> Option<&str> {
        self.location_id.as_deref()
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn issue_label(&self) -> Option<&str> {
        self.number.as_deref()
    }

    fn position(&self) -> usize {
        self.sort
    }
}

impl SortFields for ElectronicHoldingsEntry {
    fn branch_id(&self) -> Option<&str> {
        self.branch_id.as_deref()
    }

    fn location_id(&self) -> Option<&str> {
        self.location_id.as_deref()
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn issue_label(&self) -> Option<&str> {
        None
    }

    fn position(&self) -> usize {
        self.sort
    }
}

/// Immutable ordering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    /// Keyed by `branch/location` or `branch`
    library: HashMap<String, u32>,
    location: HashMap<String, u32>,
    by_issue: bool,
}

impl SortOrder {
    pub fn new(library: HashMap<String, u32>, location: HashMap<String, u32>, by_issue: bool) -> Self {
        Self {
            library,
            location,
            by_issue,
        }
    }

    /// Parse `MAIN:EAST=5:MAIN/REF` style branch orders and `ADULT:CHILD`
    /// location orders. A branch without `=rank` ranks by its list position.
    pub fn parse(branch_order: Option<&str>, location_order: Option<&str>, by_issue: bool) -> Self {
        let mut library = HashMap::new();
        for (i, value) in branch_order.unwrap_or_default().split(':').enumerate() {
            if value.is_empty() {
                continue;
            }
            let (key, rank) = match value.split_once('=') {
                Some((key, rank)) => (key, rank.trim().parse().unwrap_or(i as u32)),
                None => (value, i as u32),
            };
            library.insert(key.to_string(), rank);
        }

        let location = location_order
            .unwrap_or_default()
            .split(':')
            .enumerate()
            .filter(|(_, value)| !value.is_empty())
            .map(|(i, value)| (value.to_string(), i as u32))
            .collect();

        Self::new(library, location, by_issue)
    }

    fn library_rank<E: SortFields>(&self, entry: &E) -> u32 {
        let branch = entry.branch_id().unwrap_or_default();
        let composite = format!("{}/{}", branch, entry.location_id().unwrap_or_default());
        self.library
            .get(&composite)
            .or_else(|| self.library.get(branch))
            .copied()
            .unwrap_or(DEFAULT_RANK)
    }

    fn location_rank<E: SortFields>(&self, entry: &E) -> u32 {
        entry
            .location_id()
            .and_then(|id| self.location.get(id))
            .copied()
            .unwrap_or(DEFAULT_RANK)
    }

    pub fn compare<E: SortFields>(&self, a: &E, b: &E) -> Ordering {
        self.library_rank(a)
            .cmp(&self.library_rank(b))
            .then_with(|| self.location_rank(a).cmp(&self.location_rank(b)))
            .then_with(|| a.location().cmp(b.location()))
            .then_with(|| {
                if self.by_issue {
                    // newest issue first
                    natural_cmp(
                        b.issue_label().unwrap_or_default(),
                        a.issue_label().unwrap_or_default(),
                    )
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| a.position().cmp(&b.position()))
    }

    pub fn sort<E: SortFields>(&self, entries: &mut [E]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

/// Natural string order: digit runs compare by numeric value, everything
/// else by character
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left = take_digits(&mut a);
                let right = take_digits(&mut b);
                let ordering = compare_digit_runs(&left, &right);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
