//! Booking repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use courtbook_core::error::{AppError, ErrorKind};
use courtbook_core::result::AppResult;
use courtbook_core::types::{BookingId, CourtId, TimeRange};
use courtbook_entity::booking::{Booking, BookingStatus, CreateBooking};

/// Repository for booking records.
///
/// The write path runs inside the reservation/lifecycle transactions, so
/// every mutating operation is an associated function over the caller's
/// `PgConnection`. The overlap predicate mirrors
/// [`TimeRange::overlaps`]: `start_time < $end AND end_time > $start`.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: BookingId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// All bookings for a court intersecting `[from, to)` whose status is
    /// visible on the availability grid (pending, confirmed, completed).
    pub async fn find_visible_between(
        &self,
        court_id: CourtId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE court_id = $1 \
             AND status IN ('pending', 'confirmed', 'completed') \
             AND start_time < $3 AND end_time > $2 \
             ORDER BY start_time",
        )
        .bind(court_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }

    /// Transition every confirmed booking whose interval has fully elapsed
    /// to completed. Idempotent: a second run with the same `now` matches
    /// zero rows.
    pub async fn complete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE bookings SET status = 'completed' \
             WHERE status = 'confirmed' AND end_time <= $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to complete expired bookings", e)
        })?;
        Ok(result.rows_affected())
    }

    // ── Transactional operations ─────────────────────────────────

    /// Find a booking by its idempotency key.
    pub async fn find_by_idempotency_key(
        conn: &mut PgConnection,
        key: &str,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE idempotency_key = $1")
            .bind(key)
            .fetch_optional(conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed idempotency lookup", e)
            })
    }

    /// All slot-holding bookings (pending or confirmed) on the court whose
    /// interval overlaps `range`.
    pub async fn find_blocking_overlaps(
        conn: &mut PgConnection,
        court_id: CourtId,
        range: &TimeRange,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE court_id = $1 \
             AND status IN ('pending', 'confirmed') \
             AND start_time < $3 AND end_time > $2",
        )
        .bind(court_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed overlap query", e))
    }

    /// Insert a new pending booking.
    pub async fn insert(conn: &mut PgConnection, data: &CreateBooking) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, court_id, start_time, end_time, notes, idempotency_key) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.court_id)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.notes)
        .bind(&data.idempotency_key)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))
    }

    /// Load a booking with a row lock, blocking concurrent lifecycle
    /// transitions on the same row until this transaction ends.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: BookingId,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock booking", e))
    }

    /// Set a booking's status.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: BookingId,
        status: BookingStatus,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update booking status", e)
        })
    }

    /// Mark a booking cancelled, stamping the cancellation time.
    pub async fn mark_cancelled(
        conn: &mut PgConnection,
        id: BookingId,
        cancelled_at: DateTime<Utc>,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', cancelled_at = $2 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(cancelled_at)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))
    }
}
