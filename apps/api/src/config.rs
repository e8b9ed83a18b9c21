use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::params::{validate_min_years, ScoringParams};

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on values that do not parse or validate.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Used when a screening request does not carry its own params.
    pub default_params: ScoringParams,
    /// Used when a screening request does not set its own minimum.
    pub min_years_required: Option<f64>,
    pub max_document_bytes: usize,
    pub max_batch_documents: usize,
    /// Body limit applied to every route. Defaults to a full batch of maximum-size documents.
    pub max_request_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringParams::default();
        let default_params = ScoringParams {
            points_per_year: env_or("POINTS_PER_YEAR", defaults.points_per_year)?,
            junior_max_years: env_or("JUNIOR_MAX_YEARS", defaults.junior_max_years)?,
            mid_max_years: env_or("MID_MAX_YEARS", defaults.mid_max_years)?,
        };
        default_params
            .validate()
            .context("Invalid default scoring parameters")?;

        let min_years_required = optional_env("MIN_YEARS_REQUIRED")?;
        validate_min_years(min_years_required).context("Invalid MIN_YEARS_REQUIRED")?;

        let max_document_bytes = env_or("MAX_DOCUMENT_BYTES", 512 * 1024)?;
        let max_batch_documents = env_or("MAX_BATCH_DOCUMENTS", 500)?;
        let max_request_bytes = env_or(
            "MAX_REQUEST_BYTES",
            batch_body_limit(max_document_bytes, max_batch_documents),
        )?;

        Ok(Config {
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_params,
            min_years_required,
            max_document_bytes,
            max_batch_documents,
            max_request_bytes,
        })
    }
}

/// Fixed allowance for the requirements text, params and JSON framing of a request.
const REQUEST_ENVELOPE_BYTES: usize = 64 * 1024;
/// Per-document allowance for the file name and object framing.
const DOCUMENT_ENVELOPE_BYTES: usize = 1024;

/// Smallest body that still fits `max_batch_documents` documents of `max_document_bytes`
/// each. Text is counted twice since JSON escaping can double it.
pub fn batch_body_limit(max_document_bytes: usize, max_batch_documents: usize) -> usize {
    max_document_bytes
        .saturating_mul(2)
        .saturating_add(DOCUMENT_ENVELOPE_BYTES)
        .saturating_mul(max_batch_documents)
        .saturating_add(REQUEST_ENVELOPE_BYTES)
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(optional_env(key)?.unwrap_or(default))
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}
