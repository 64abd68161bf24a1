//! Date window splitting for search fan-out.
//!
//! The arXiv query API is friendlier to many small queries than one huge one,
//! so the overall [start, end] interval is cut into consecutive windows of at
//! most 30 days. Each window becomes one fetch unit per keyword.

use chrono::{Duration, NaiveDate};
use std::fmt;

/// Maximum length of a single search window, in days.
pub const MAX_WINDOW_DAYS: i64 = 30;

/// One inclusive [start, end] search window, at most 30 days long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Split [start, end] into consecutive windows of at most [`MAX_WINDOW_DAYS`].
///
/// Windows are contiguous (each starts the day after the previous one ends),
/// never overlap, and together cover exactly [start, end]. The final window is
/// clamped to `end`. An equal or inverted input yields no windows at all.
pub fn split_date_range(start: NaiveDate, end: NaiveDate) -> Vec<DateRange> {
    let mut ranges = Vec::new();
    if start >= end {
        return ranges;
    }

    let mut cursor = start;
    while cursor <= end {
        let window_end = (cursor + Duration::days(MAX_WINDOW_DAYS)).min(end);
        ranges.push(DateRange {
            start: cursor,
            end: window_end,
        });
        cursor = window_end + Duration::days(1);
    }

    ranges
}
