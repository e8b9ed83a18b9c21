//! Batch screening — scores a set of resume documents and orders them for review.
//!
//! Documents are independent, so each one is scored on its own blocking task. The keyword
//! list is shared read-only behind an `Arc`; the params are a `Copy` snapshot.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::scoring::params::ScoringParams;
use crate::scoring::requirements::RequirementKeyword;
use crate::scoring::resume::{score_resume, ScoredResume};

const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".docx"];

/// Extracted text of one resume plus the file it came from.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeDocument {
    pub file_name: String,
    pub text: String,
}

/// Settings for one screening run.
#[derive(Debug, Clone, Copy)]
pub struct ScreeningOptions {
    pub params: ScoringParams,
    /// Hide results below this many years. `None` disables the filter.
    pub min_years_required: Option<f64>,
    /// What "Present" means for this run.
    pub reference_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub run_id: Uuid,
    pub reference_date: NaiveDate,
    pub params: ScoringParams,
    /// Documents actually scored (before the min-years filter).
    pub scored: usize,
    pub skipped_files: Vec<String>,
    pub hidden_below_min_years: usize,
    pub results: Vec<ScoredResume>,
}

/// Case-insensitive `.pdf` / `.docx` check.
pub fn is_supported_document(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// `true` when the result should stay visible under the min-years filter.
pub fn meets_min_years(result: &ScoredResume, min_years_required: Option<f64>) -> bool {
    min_years_required.map_or(true, |min| result.estimate.years >= min)
}

/// Level ascending, then years descending, then total score descending. Stable.
pub fn sort_results(results: &mut [ScoredResume]) {
    results.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| b.estimate.years.total_cmp(&a.estimate.years))
            .then_with(|| b.total_score.total_cmp(&a.total_score))
    });
}

/// Scores every supported document in parallel, applies the min-years filter and sorts.
pub async fn screen_documents(
    documents: Vec<ResumeDocument>,
    keywords: Arc<[RequirementKeyword]>,
    options: ScreeningOptions,
) -> Result<ScreeningReport, AppError> {
    let run_id = Uuid::new_v4();
    let received = documents.len();
    let mut skipped_files = Vec::new();
    let mut tasks = JoinSet::new();

    for (index, document) in documents.into_iter().enumerate() {
        if !is_supported_document(&document.file_name) {
            debug!(%run_id, file = %document.file_name, "skipping unsupported document");
            skipped_files.push(document.file_name);
            continue;
        }

        let keywords = Arc::clone(&keywords);
        let ScreeningOptions {
            params,
            reference_date,
            ..
        } = options;
        // CPU-bound regex work stays off the async executor.
        tasks.spawn_blocking(move || {
            let ResumeDocument { file_name, text } = document;
            let scored = score_resume(file_name, &text, &keywords, &params, reference_date);
            (index, scored)
        });
    }

    let mut indexed = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let entry = joined.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("resume scoring task failed: {e}"))
        })?;
        indexed.push(entry);
    }
    // Completion order is arbitrary; restore input order so ties sort deterministically.
    indexed.sort_by_key(|(index, _)| *index);

    let scored = indexed.len();
    let mut results: Vec<ScoredResume> = indexed
        .into_iter()
        .map(|(_, result)| result)
        .filter(|result| meets_min_years(result, options.min_years_required))
        .collect();
    let hidden_below_min_years = scored - results.len();
    sort_results(&mut results);

    info!(
        %run_id,
        received,
        scored,
        skipped = skipped_files.len(),
        hidden = hidden_below_min_years,
        "screening run complete"
    );

    Ok(ScreeningReport {
        run_id,
        reference_date: options.reference_date,
        params: options.params,
        scored,
        skipped_files,
        hidden_below_min_years,
        results,
    })
}
