// Experience-duration inference.
// Pure, synchronous text processing: raw text → candidate ranges → merged intervals → years.
// "Present" always resolves against a caller-supplied reference date, never the system clock.

pub mod dates;
pub mod estimate;
pub mod merge;
pub mod ranges;

pub use estimate::{
    analyze_experience, estimate_years_experience, ExperienceBreakdown, ExperienceEstimate,
};
