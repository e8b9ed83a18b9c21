//! Date tokens — month names and 4-digit years recognised inside free resume text.
//!
//! A `DateToken` is a (year, month) pair. Arithmetic only ever looks at whole months,
//! so the day is a fixed anchor (the 15th) and exists only for display.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Synthetic day-of-month carried by every token when rendered as a calendar date.
pub const ANCHOR_DAY: u32 = 15;

/// Full and 3-letter English month names. `sept` is accepted as September.
const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("january", 1),
    ("feb", 2),
    ("february", 2),
    ("mar", 3),
    ("march", 3),
    ("apr", 4),
    ("april", 4),
    ("may", 5),
    ("jun", 6),
    ("june", 6),
    ("jul", 7),
    ("july", 7),
    ("aug", 8),
    ("august", 8),
    ("sep", 9),
    ("sept", 9),
    ("september", 9),
    ("oct", 10),
    ("october", 10),
    ("nov", 11),
    ("november", 11),
    ("dec", 12),
    ("december", 12),
];

/// Words that resolve a range end to the reference month.
const PRESENT_MARKERS: &[&str] = &["present", "current"];

/// A parsed (year, month) pair. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateToken {
    year: i32,
    month: u32,
}

impl DateToken {
    /// Builds a token, clamping `month` into 1..=12.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whole months from `self` to `later`. Negative when `later` precedes `self`.
    pub fn months_until(&self, later: &DateToken) -> i32 {
        (later.year - self.year) * 12 + (later.month as i32 - self.month as i32)
    }
}

impl From<NaiveDate> for DateToken {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), ANCHOR_DAY)
    }
}

impl Serialize for DateToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Case-insensitive month lookup. Unknown tokens yield `None`.
pub fn parse_month(token: &str) -> Option<u32> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }
    MONTHS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, month)| *month)
}

/// Accepts exactly four ASCII digits starting with `19` or `20`.
pub fn parse_year(token: &str) -> Option<i32> {
    let token = token.trim();
    let well_formed = token.len() == 4
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token.starts_with("19") || token.starts_with("20"));
    if !well_formed {
        return None;
    }
    token.parse().ok()
}

/// Same as `DateToken::new`; named for symmetry with `parse_month`/`parse_year`.
pub fn make_date(year: i32, month: u32) -> DateToken {
    DateToken::new(year, month)
}

/// The token "present"/"current" resolves to: the reference date's month.
pub fn present_date(reference: NaiveDate) -> DateToken {
    DateToken::from(reference)
}

/// True for "present" or "current" in any casing.
pub fn is_present_marker(token: &str) -> bool {
    let token = token.trim();
    PRESENT_MARKERS
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(token))
}
