//! Requirements loader — turns a recruiter's free-form requirements file into keywords.

use serde::Serialize;

/// Lines starting with one of these are section decorations, not requirements.
const SECTION_MARKERS: &[&str] = &[
    "🧠", "💼", "🛡", "⚙️", "☁️", "👥", "🎯", "🧾", "🧩",
];

/// A single keyword requirement: trimmed, non-empty, original casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementKeyword(String);

impl RequirementKeyword {
    /// Trims `raw`; `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Keeps every line that is not blank, not a `Header:` and not a marker-prefixed section title.
/// Order is preserved and duplicates are kept.
pub fn parse_requirements(text: &str) -> Vec<RequirementKeyword> {
    text.lines()
        .map(str::trim)
        .filter(|line| !is_section_line(line))
        .filter_map(RequirementKeyword::new)
        .collect()
}

/// Normalises an explicit keyword list the same way a file line would be.
pub fn keywords_from_list<S: AsRef<str>>(items: &[S]) -> Vec<RequirementKeyword> {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !is_section_line(item))
        .filter_map(RequirementKeyword::new)
        .collect()
}

fn is_section_line(line: &str) -> bool {
    line.ends_with(':') || SECTION_MARKERS.iter().any(|marker| line.starts_with(marker))
}
