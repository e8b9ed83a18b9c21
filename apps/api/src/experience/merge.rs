//! Interval Merger — coalesces overlapping or touching intervals into a minimal covering set.

use crate::experience::ranges::Interval;

/// Sorts by start and folds left. An interval whose start is at or before the previous
/// end is absorbed into it; otherwise it opens a new entry.
///
/// The output is ascending by start and, for every adjacent pair, `next.start > prev.end`.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by_key(|interval| interval.start());

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start() <= last.end() => last.extend_to(interval.end()),
            _ => merged.push(interval),
        }
    }
    merged
}
