use serde::{Deserialize, Serialize};

/// Coarse seniority bucket. Declaration order is the display/sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

/// Boundaries are inclusive on the lower bucket: `years == junior_max_years` is Junior.
pub fn classify_level(years: f64, junior_max_years: f64, mid_max_years: f64) -> ExperienceLevel {
    if years <= junior_max_years {
        ExperienceLevel::Junior
    } else if years <= mid_max_years {
        ExperienceLevel::Mid
    } else {
        ExperienceLevel::Senior
    }
}
