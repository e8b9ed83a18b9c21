//! Axum route handlers for the Screening API.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::experience::{analyze_experience, ExperienceBreakdown};
use crate::scoring::params::{validate_min_years, ScoringParamsOverride};
use crate::scoring::requirements::{keywords_from_list, parse_requirements, RequirementKeyword};
use crate::screening::batch::{
    screen_documents, ResumeDocument, ScreeningOptions, ScreeningReport,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseRequirementsRequest {
    pub requirements_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseRequirementsResponse {
    pub keywords: Vec<RequirementKeyword>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub text: String,
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub reference_date: NaiveDate,
    #[serde(flatten)]
    pub breakdown: ExperienceBreakdown,
}

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    /// Raw requirements file contents. Ignored when `keywords` is given.
    pub requirements_text: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub documents: Vec<ResumeDocument>,
    /// Unset fields fall back to the configured defaults.
    #[serde(default)]
    pub params: ScoringParamsOverride,
    pub min_years_required: Option<f64>,
    /// `false` turns the minimum-years filter off, including a configured one.
    /// `true` requires a minimum from the request or the config.
    pub enforce_min_years: Option<bool>,
    pub reference_date: Option<NaiveDate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/requirements/parse
///
/// Previews which lines of a requirements file become keywords.
pub async fn handle_parse_requirements(
    Json(request): Json<ParseRequirementsRequest>,
) -> Json<ParseRequirementsResponse> {
    let keywords = parse_requirements(&request.requirements_text);
    Json(ParseRequirementsResponse {
        count: keywords.len(),
        keywords,
    })
}

/// POST /api/v1/experience/estimate
///
/// Returns the estimate for one text along with the merged intervals behind it.
pub async fn handle_estimate_experience(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    check_document_size("text", &request.text, state.config.max_document_bytes)?;
    let reference_date = request.reference_date.unwrap_or_else(today);

    let breakdown = tokio::task::spawn_blocking(move || {
        analyze_experience(&request.text, reference_date)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("experience estimate task failed: {e}")))?;

    Ok(Json(EstimateResponse {
        reference_date,
        breakdown,
    }))
}

/// POST /api/v1/screen
///
/// Scores a batch of extracted resume texts against the requirements and returns them
/// sorted for review.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreeningReport>, AppError> {
    let config = &state.config;

    if request.documents.is_empty() {
        return Err(AppError::Validation("documents cannot be empty".to_string()));
    }
    if request.documents.len() > config.max_batch_documents {
        return Err(AppError::Validation(format!(
            "at most {} documents per request, got {}",
            config.max_batch_documents,
            request.documents.len()
        )));
    }
    for document in &request.documents {
        check_document_size(&document.file_name, &document.text, config.max_document_bytes)?;
    }

    let keywords = resolve_keywords(
        request.keywords.as_deref(),
        request.requirements_text.as_deref(),
    )?;
    if keywords.is_empty() {
        warn!("screening with an empty requirements list; keyword scores will be zero");
    }

    let params = request.params.apply_to(config.default_params);
    params.validate()?;
    let min_years_required = resolve_min_years(
        request.enforce_min_years,
        request.min_years_required,
        config.min_years_required,
    )?;

    let options = ScreeningOptions {
        params,
        min_years_required,
        reference_date: request.reference_date.unwrap_or_else(today),
    };
    let report = screen_documents(request.documents, Arc::from(keywords), options).await?;
    Ok(Json(report))
}

fn resolve_keywords(
    keywords: Option<&[String]>,
    requirements_text: Option<&str>,
) -> Result<Vec<RequirementKeyword>, AppError> {
    match (keywords, requirements_text) {
        (Some(list), _) => Ok(keywords_from_list(list)),
        (None, Some(text)) => Ok(parse_requirements(text)),
        (None, None) => Err(AppError::Validation(
            "either requirements_text or keywords is required".to_string(),
        )),
    }
}

fn resolve_min_years(
    enforce: Option<bool>,
    requested: Option<f64>,
    configured: Option<f64>,
) -> Result<Option<f64>, AppError> {
    let min_years_required = match enforce {
        Some(false) => None,
        Some(true) => Some(requested.or(configured).ok_or_else(|| {
            AppError::Validation(
                "enforce_min_years is set but no min_years_required is available".to_string(),
            )
        })?),
        None => requested.or(configured),
    };
    validate_min_years(min_years_required)?;
    Ok(min_years_required)
}

fn check_document_size(name: &str, text: &str, max_bytes: usize) -> Result<(), AppError> {
    if text.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "{name} is {} bytes; the limit is {max_bytes}",
            text.len()
        )));
    }
    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
