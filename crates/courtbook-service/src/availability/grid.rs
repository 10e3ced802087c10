//! Pure per-hour slot grid computation.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use courtbook_core::AppResult;
use courtbook_core::types::TimeRange;

/// Availability flags for a single bookable hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSlot {
    /// Start hour of the `[hour, hour + 1)` candidate slot.
    pub hour: u32,
    /// Bookable: neither past nor conflicting.
    pub available: bool,
    /// The hour has already begun (or the whole day lies in the past).
    pub is_past: bool,
    /// An existing booking overlaps the hour.
    pub has_conflict: bool,
}

/// Compute the hour-by-hour grid for one court-day.
///
/// One entry per hour from `open_hour` to `close_hour - 1`. `booked` holds
/// the intervals of bookings visible on the grid (pending, confirmed, or
/// completed). Hours of the current day up to and including the current
/// hour are past; days fully behind `now` are past in their entirety.
pub fn slot_grid(
    open_hour: u32,
    close_hour: u32,
    date: NaiveDate,
    now: DateTime<Utc>,
    booked: &[TimeRange],
) -> AppResult<Vec<HourSlot>> {
    let today = now.date_naive();
    let mut slots = Vec::with_capacity(close_hour.saturating_sub(open_hour) as usize);

    for hour in open_hour..close_hour {
        let candidate = TimeRange::for_slot(date, hour, 1)?;
        let is_past = if date < today {
            true
        } else if date == today {
            hour <= now.hour()
        } else {
            false
        };
        let has_conflict = booked.iter().any(|range| candidate.overlaps(range));
        slots.push(HourSlot {
            hour,
            available: !is_past && !has_conflict,
            is_past,
            has_conflict,
        });
    }

    Ok(slots)
}
