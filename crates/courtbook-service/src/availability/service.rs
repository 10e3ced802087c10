//! Day-availability lookup for one court.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use courtbook_core::error::AppError;
use courtbook_core::result::AppResult;
use courtbook_core::types::{CourtId, TimeRange};
use courtbook_database::repositories::{BookingRepository, CourtRepository};
use courtbook_entity::booking::Booking;
use courtbook_entity::court::Court;

use super::grid::{HourSlot, slot_grid};

/// The computed availability for one court on one calendar day.
#[derive(Debug, Clone)]
pub struct DayAvailability {
    /// The court the grid was computed for.
    pub court: Court,
    /// One entry per operating hour.
    pub slots: Vec<HourSlot>,
    /// The day's grid-visible bookings, ordered by start time.
    pub bookings: Vec<Booking>,
}

/// Computes hour-by-hour availability grids.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    /// Court repository.
    court_repo: Arc<CourtRepository>,
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(court_repo: Arc<CourtRepository>, booking_repo: Arc<BookingRepository>) -> Self {
        Self {
            court_repo,
            booking_repo,
        }
    }

    /// Compute the grid for a court-day as of `now`.
    ///
    /// Advisory only: the reservation transaction re-checks conflicts
    /// authoritatively before any write.
    pub async fn day_grid(
        &self,
        court_id: CourtId,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<DayAvailability> {
        let court = self
            .court_repo
            .find_by_id(court_id)
            .await?
            .ok_or_else(|| AppError::not_found("Court not found"))?;

        let day_start = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::validation("invalid date"))?
            .and_utc();
        let day_end = day_start + Duration::days(1);

        let bookings = self
            .booking_repo
            .find_visible_between(court_id, day_start, day_end)
            .await?;

        let ranges = bookings
            .iter()
            .map(Booking::range)
            .collect::<AppResult<Vec<TimeRange>>>()?;

        let slots = slot_grid(
            court.open_hour as u32,
            court.close_hour as u32,
            date,
            now,
            &ranges,
        )?;

        Ok(DayAvailability {
            court,
            slots,
            bookings,
        })
    }
}
