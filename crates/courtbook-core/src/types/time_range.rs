//! Half-open time-range value model for booking intervals.
//!
//! All booking intervals are `[start, end)`: a booking ending at hour 10
//! does not conflict with one starting at hour 10. Slots are aligned to
//! whole hours within a single calendar day (UTC).

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// A half-open `[start, end)` interval in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range from explicit endpoints. `end` must be after `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::validation("end time must be after start time"));
        }
        Ok(Self { start, end })
    }

    /// Build the range for a whole-hour slot on a calendar day.
    ///
    /// The slot must not escape the day boundary: `start_hour + duration`
    /// may be at most 24 (a range ending exactly at midnight is valid).
    pub fn for_slot(date: NaiveDate, start_hour: u32, duration_hours: u32) -> AppResult<Self> {
        if start_hour > 23 {
            return Err(AppError::validation("start hour must be between 0 and 23"));
        }
        if duration_hours == 0 {
            return Err(AppError::validation("duration must be at least one hour"));
        }
        if start_hour + duration_hours > 24 {
            return Err(AppError::validation(
                "booking may not extend past the end of the day",
            ));
        }
        let start = date
            .and_hms_opt(start_hour, 0, 0)
            .ok_or_else(|| AppError::validation("invalid start hour"))?
            .and_utc();
        let end = start + Duration::hours(i64::from(duration_hours));
        Ok(Self { start, end })
    }

    /// Start of the interval (inclusive).
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the interval (exclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// True iff the two half-open intervals intersect.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True iff the instant falls inside the interval.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// True iff the range lies within `[open_hour, close_hour)` operating
    /// hours on the 0-24 scale. A range ending exactly at midnight counts
    /// as ending at hour 24.
    pub fn within_operating_hours(&self, open_hour: u32, close_hour: u32) -> bool {
        self.start.hour() >= open_hour && self.end_hour() <= close_hour
    }

    /// Interval length in whole hours.
    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }

    /// The end boundary expressed on the 0-24 hour scale.
    fn end_hour(&self) -> u32 {
        if self.end.date_naive() > self.start.date_naive() {
            24
        } else {
            self.end.hour()
        }
    }
}
