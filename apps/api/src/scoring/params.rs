use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MAX_POINTS_PER_YEAR: f64 = 50.0;
pub const MAX_JUNIOR_YEARS: f64 = 10.0;
pub const MAX_MID_YEARS: f64 = 25.0;
pub const MAX_MIN_YEARS_REQUIRED: f64 = 30.0;

/// Tunable knobs for one scoring pass. Snapshotted per batch and never mutated mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringParams {
    pub points_per_year: f64,
    pub junior_max_years: f64,
    pub mid_max_years: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            points_per_year: 5.0,
            junior_max_years: 2.0,
            mid_max_years: 6.0,
        }
    }
}

impl ScoringParams {
    /// Rejects values outside the ranges a recruiter can set. `mid_max_years` may not be
    /// below `junior_max_years`.
    pub fn validate(&self) -> Result<(), AppError> {
        check_range("points_per_year", self.points_per_year, 0.0, MAX_POINTS_PER_YEAR)?;
        check_range(
            "junior_max_years",
            self.junior_max_years,
            0.0,
            MAX_JUNIOR_YEARS,
        )?;
        check_range(
            "mid_max_years",
            self.mid_max_years,
            self.junior_max_years,
            MAX_MID_YEARS,
        )?;
        Ok(())
    }
}

/// Per-request params. Each knob may be set on its own; unset ones keep their default.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ScoringParamsOverride {
    pub points_per_year: Option<f64>,
    pub junior_max_years: Option<f64>,
    pub mid_max_years: Option<f64>,
}

impl ScoringParamsOverride {
    pub fn apply_to(self, defaults: ScoringParams) -> ScoringParams {
        ScoringParams {
            points_per_year: self.points_per_year.unwrap_or(defaults.points_per_year),
            junior_max_years: self.junior_max_years.unwrap_or(defaults.junior_max_years),
            mid_max_years: self.mid_max_years.unwrap_or(defaults.mid_max_years),
        }
    }
}

/// Bounds for the optional minimum-years visibility filter.
pub fn validate_min_years(min_years_required: Option<f64>) -> Result<(), AppError> {
    match min_years_required {
        Some(years) => check_range("min_years_required", years, 0.0, MAX_MIN_YEARS_REQUIRED),
        None => Ok(()),
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < min || value > max {
        return Err(AppError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
