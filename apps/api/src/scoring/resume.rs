//! Keyword Scorer — combines requirement matches with the experience estimate.
//!
//! Matching is a case-insensitive substring test, so "Python" also credits "pythonic" and
//! "Java" credits "JavaScript". That over-matching is accepted behaviour: recruiters write
//! short keywords and expect them to hit inflected forms.

use chrono::NaiveDate;
use serde::Serialize;

use crate::experience::{estimate_years_experience, ExperienceEstimate};
use crate::scoring::level::{classify_level, ExperienceLevel};
use crate::scoring::params::ScoringParams;
use crate::scoring::requirements::RequirementKeyword;

pub const POINTS_PER_KEYWORD: u32 = 10;

/// The scored view of one resume. Built once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResume {
    pub file_name: String,
    pub estimate: ExperienceEstimate,
    pub level: ExperienceLevel,
    pub keyword_score: u32,
    pub experience_score: f64,
    pub total_score: f64,
    /// Matched requirements, original casing, requirement order.
    pub matched_keywords: Vec<String>,
}

/// Requirements whose lowercase form occurs in the lowercased text. Each counts once.
pub fn match_keywords<'a>(
    text: &str,
    keywords: &'a [RequirementKeyword],
) -> Vec<&'a RequirementKeyword> {
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|kw| text_lower.contains(&kw.as_str().to_lowercase()))
        .collect()
}

/// Scores one resume. Pure: the same inputs always give the same record.
pub fn score_resume(
    file_name: impl Into<String>,
    text: &str,
    keywords: &[RequirementKeyword],
    params: &ScoringParams,
    reference: NaiveDate,
) -> ScoredResume {
    let matched = match_keywords(text, keywords);
    let keyword_score = POINTS_PER_KEYWORD * matched.len() as u32;

    let estimate = estimate_years_experience(text, reference);
    let experience_score = estimate.years * params.points_per_year;

    ScoredResume {
        file_name: file_name.into(),
        estimate,
        level: classify_level(estimate.years, params.junior_max_years, params.mid_max_years),
        keyword_score,
        experience_score,
        total_score: f64::from(keyword_score) + experience_score,
        matched_keywords: matched.iter().map(|kw| kw.as_str().to_string()).collect(),
    }
}
