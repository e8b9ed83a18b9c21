// Resume scoring: requirement keywords + experience estimate → weighted total and level.
// Every function here is pure; parameters arrive as an explicit `ScoringParams` snapshot.

pub mod level;
pub mod params;
pub mod requirements;
pub mod resume;
