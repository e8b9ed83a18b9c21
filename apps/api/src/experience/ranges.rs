//! Range Extractor — pulls candidate employment (start, end) pairs out of raw resume text.
//!
//! Three pattern families run independently over the same normalised text:
//! 1. `Jan 2019 - Mar 2021`, `March 2020 to Present`
//! 2. `2018 - 2020`, `2019 - Current` (both ends default to June)
//! 3. `01/2019 - 03/2021`, `01/2019 - Present`
//!
//! The same textual range can be picked up by more than one family. That redundancy is
//! absorbed by `merge::merge_intervals`, not here.
//!
//! The separator between endpoints is the character class `[-to]+`: any run of `-`, `t`
//! and `o`, which is what lets the word "to" act as a separator.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use crate::experience::dates::{
    is_present_marker, make_date, parse_month, parse_year, present_date, DateToken,
};

/// Month assumed for a bare year (`2018 - 2020`).
const BARE_YEAR_MONTH: u32 = 6;

static MONTH_YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<m1>[A-Za-z]{3,9})\s+(?P<y1>(?:19|20)\d{2})\s*[-to]+\s*(?P<m2>Present|Current|[A-Za-z]{3,9})\s*(?P<y2>(?:19|20)\d{2})?\b",
    )
    .expect("month-year range pattern is valid")
});

static YEAR_YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<y1>(?:19|20)\d{2})\s*[-to]+\s*(?P<y2>Present|Current|(?:19|20)\d{2})\b",
    )
    .expect("year-year range pattern is valid")
});

static NUMERIC_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<m1>0?[1-9]|1[0-2])/(?P<y1>(?:19|20)\d{2})\s*[-to]+\s*(?:(?P<m2>0?[1-9]|1[0-2])/)?(?P<y2>(?:19|20)\d{2}|Present|Current)\b",
    )
    .expect("numeric range pattern is valid")
});

/// One inferred employment period. Invariant: `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    start: DateToken,
    end: DateToken,
}

impl Interval {
    /// Returns `None` for reversed or zero-length ranges.
    pub fn new(start: DateToken, end: DateToken) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateToken {
        self.start
    }

    pub fn end(&self) -> DateToken {
        self.end
    }

    /// Length in whole months. Always positive.
    pub fn months(&self) -> i32 {
        self.start.months_until(&self.end)
    }

    /// Moves `end` later. Used by the merger; never shortens the interval.
    pub(crate) fn extend_to(&mut self, end: DateToken) {
        if end > self.end {
            self.end = end;
        }
    }
}

/// Replaces en and em dashes with an ASCII hyphen.
pub fn normalize_dashes(text: &str) -> String {
    text.replace(['\u{2013}', '\u{2014}'], "-")
}

/// Runs all three pattern families and returns every valid candidate, unmerged.
///
/// `reference` is the date "Present"/"Current" resolves to.
pub fn extract_date_ranges(text: &str, reference: NaiveDate) -> Vec<Interval> {
    let text = normalize_dashes(text);
    let present = present_date(reference);

    let mut ranges = Vec::new();
    collect(&mut ranges, &MONTH_YEAR_RANGE, &text, |caps| {
        month_year_candidate(caps, present)
    });
    collect(&mut ranges, &YEAR_YEAR_RANGE, &text, |caps| {
        year_year_candidate(caps, present)
    });
    collect(&mut ranges, &NUMERIC_RANGE, &text, |caps| {
        numeric_candidate(caps, present)
    });
    ranges
}

fn collect<F>(ranges: &mut Vec<Interval>, pattern: &Regex, text: &str, candidate: F)
where
    F: Fn(&Captures<'_>) -> Option<(DateToken, DateToken)>,
{
    for caps in pattern.captures_iter(text) {
        let Some((start, end)) = candidate(&caps) else {
            continue;
        };
        match Interval::new(start, end) {
            Some(interval) => ranges.push(interval),
            None => debug!(
                matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default(),
                "dropping non-forward date range"
            ),
        }
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

fn month_year_candidate(
    caps: &Captures<'_>,
    present: DateToken,
) -> Option<(DateToken, DateToken)> {
    let start_month = parse_month(group(caps, "m1")?)?;
    let start_year = parse_year(group(caps, "y1")?)?;
    let start = make_date(start_year, start_month);

    let end_token = group(caps, "m2")?;
    let end = if is_present_marker(end_token) {
        present
    } else {
        let end_month = parse_month(end_token)?;
        let end_year = parse_year(group(caps, "y2")?)?;
        make_date(end_year, end_month)
    };
    Some((start, end))
}

fn year_year_candidate(
    caps: &Captures<'_>,
    present: DateToken,
) -> Option<(DateToken, DateToken)> {
    let start = make_date(parse_year(group(caps, "y1")?)?, BARE_YEAR_MONTH);

    let end_token = group(caps, "y2")?;
    let end = if is_present_marker(end_token) {
        present
    } else {
        make_date(parse_year(end_token)?, BARE_YEAR_MONTH)
    };
    Some((start, end))
}

fn numeric_candidate(
    caps: &Captures<'_>,
    present: DateToken,
) -> Option<(DateToken, DateToken)> {
    let start_month = parse_numeric_month(group(caps, "m1")?)?;
    let start = make_date(parse_year(group(caps, "y1")?)?, start_month);

    let end_token = group(caps, "y2")?;
    let end = if is_present_marker(end_token) {
        present
    } else {
        let end_month = parse_numeric_month(group(caps, "m2")?)?;
        make_date(parse_year(end_token)?, end_month)
    };
    Some((start, end))
}

fn parse_numeric_month(token: &str) -> Option<u32> {
    token.parse().ok().filter(|m| (1..=12).contains(m))
}
