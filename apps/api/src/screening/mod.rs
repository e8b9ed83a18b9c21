// Screening: the batch layer around the scorer.
// Filters unsupported files, scores documents in parallel, hides results under the
// minimum-years threshold and orders the rest (level ↑, years ↓, total ↓).

pub mod batch;
pub mod handlers;
