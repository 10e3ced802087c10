//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use courtbook_core::AppResult;
use courtbook_core::types::TimeRange;

use super::status::BookingStatus;

/// A reservation of one court for one time range by one user.
///
/// Per court, no two bookings whose status blocks the slot may have
/// overlapping `[start_time, end_time)` intervals. That invariant is
/// maintained by the reservation transaction and backed by a database
/// exclusion constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The user who made the reservation.
    pub user_id: Uuid,
    /// The reserved court.
    pub court_id: Uuid,
    /// Start of the reserved interval (inclusive).
    pub start_time: DateTime<Utc>,
    /// End of the reserved interval (exclusive).
    pub end_time: DateTime<Utc>,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Optional free-text note from the user.
    pub notes: Option<String>,
    /// Idempotency key for the creating request (unique).
    pub idempotency_key: String,
    /// When the booking row was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was cancelled, if it was.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// The reserved interval as a [`TimeRange`].
    ///
    /// The `end > start` invariant is guaranteed by a database CHECK, so
    /// this only fails on a corrupted row.
    pub fn range(&self) -> AppResult<TimeRange> {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Whether this booking currently holds its slot.
    pub fn blocks_slot(&self) -> bool {
        self.status.blocks_slot()
    }

    /// Whether the booking has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The reserving user.
    pub user_id: Uuid,
    /// The court being reserved.
    pub court_id: Uuid,
    /// Start of the reserved interval.
    pub start_time: DateTime<Utc>,
    /// End of the reserved interval.
    pub end_time: DateTime<Utc>,
    /// Optional free-text note.
    pub notes: Option<String>,
    /// Idempotency key (client-supplied or synthesized).
    pub idempotency_key: String,
}
