//! Duration Estimator — turns merged intervals (or, failing that, "N years" phrases) into a
//! single years-of-experience figure tagged with where it came from.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::experience::merge::merge_intervals;
use crate::experience::ranges::{extract_date_ranges, Interval};

/// Range-derived totals below this are treated as noise and the phrase scan wins.
pub const MIN_TRUSTED_RANGE_YEARS: f64 = 0.5;

static YEARS_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([1-4]?\d)\s*\+?\s*[- ]?\s*(?:years?|yrs?)\b")
        .expect("years phrase pattern is valid")
});

/// Provenance of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceSource {
    Ranges,
    Phrases,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEstimate {
    /// Non-negative, one decimal place.
    pub years: f64,
    pub source: ExperienceSource,
}

/// Everything behind one estimate, for callers that want to show their work.
#[derive(Debug, Clone, Serialize)]
pub struct ExperienceBreakdown {
    pub estimate: ExperienceEstimate,
    pub intervals: Vec<Interval>,
    pub years_from_ranges: f64,
    pub years_from_phrases: u32,
}

/// Sum of interval lengths in whole months. Negative lengths contribute nothing.
pub fn total_months(intervals: &[Interval]) -> i32 {
    intervals.iter().map(|i| i.months().max(0)).sum()
}

/// Months → years, one decimal, halves to even (15 months is 1.2).
pub fn months_to_years(months: i32) -> f64 {
    (f64::from(months) * 10.0 / 12.0).round_ties_even() / 10.0
}

/// Extracts, merges and sums the date ranges in `text`.
pub fn years_from_ranges(text: &str, reference: NaiveDate) -> f64 {
    let merged = merge_intervals(extract_date_ranges(text, reference));
    months_to_years(total_months(&merged))
}

/// Largest "N years" / "N+ yrs" mention in `text`, or 0.
pub fn years_from_phrases(text: &str) -> u32 {
    YEARS_PHRASE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Range figure wins once it reaches `MIN_TRUSTED_RANGE_YEARS`; otherwise the phrase figure.
fn choose_estimate(years_from_ranges: f64, years_from_phrases: u32) -> ExperienceEstimate {
    if years_from_ranges >= MIN_TRUSTED_RANGE_YEARS {
        ExperienceEstimate {
            years: years_from_ranges,
            source: ExperienceSource::Ranges,
        }
    } else {
        ExperienceEstimate {
            years: f64::from(years_from_phrases),
            source: ExperienceSource::Phrases,
        }
    }
}

/// Years of experience in `text`, with "Present" resolved against `reference`.
pub fn estimate_years_experience(text: &str, reference: NaiveDate) -> ExperienceEstimate {
    let estimate = choose_estimate(years_from_ranges(text, reference), years_from_phrases(text));
    debug!(years = estimate.years, source = ?estimate.source, "experience estimated");
    estimate
}

/// Same decision as `estimate_years_experience`, keeping the merged intervals and both
/// candidate figures.
pub fn analyze_experience(text: &str, reference: NaiveDate) -> ExperienceBreakdown {
    let intervals = merge_intervals(extract_date_ranges(text, reference));
    let years_from_ranges = months_to_years(total_months(&intervals));
    let years_from_phrases = years_from_phrases(text);

    ExperienceBreakdown {
        estimate: choose_estimate(years_from_ranges, years_from_phrases),
        intervals,
        years_from_ranges,
        years_from_phrases,
    }
}
