//! Reservation transaction: conflict detection and atomic booking +
//! payment creation under serializable isolation.
//!
//! Two concurrent reservations for overlapping ranges on one court must
//! never both commit. The conflict check and the inserts run inside one
//! SERIALIZABLE transaction; Postgres aborts one of any pair of racing
//! transactions with a serialization failure, which is retried a bounded
//! number of times. The exclusion constraint on
//! `(court_id, tstzrange(start_time, end_time))` backstops the same
//! invariant at the store level.

use std::time::Duration as StdDuration;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use courtbook_core::config::booking::BookingConfig;
use courtbook_core::error::{AppError, ErrorKind};
use courtbook_core::result::AppResult;
use courtbook_core::types::{CourtId, TimeRange, UserId, VenueId};
use courtbook_database::repositories::booking::BookingRepository;
use courtbook_database::repositories::court::CourtRepository;
use courtbook_database::repositories::payment::PaymentRepository;
use courtbook_database::repositories::venue::VenueRepository;
use courtbook_entity::booking::{Booking, CreateBooking};
use courtbook_entity::court::Court;
use courtbook_entity::payment::{CreatePayment, Payment};

/// A validated reservation request.
#[derive(Debug, Clone)]
pub struct ReserveCommand {
    /// The court to reserve.
    pub court_id: CourtId,
    /// Calendar day of the slot (UTC).
    pub date: NaiveDate,
    /// First reserved hour.
    pub start_hour: u32,
    /// Number of consecutive hours.
    pub duration_hours: u32,
    /// Optional free-text note.
    pub notes: Option<String>,
    /// Client-supplied idempotency key, if any.
    pub idempotency_key: Option<String>,
}

/// Result of a successful (or replayed) reservation.
#[derive(Debug, Clone)]
pub struct ReservationOutcome {
    /// The created or replayed booking.
    pub booking: Booking,
    /// Its payment record.
    pub payment: Payment,
    /// True when an idempotency key matched an existing booking and no
    /// new rows were written.
    pub replayed: bool,
}

/// The authoritative reservation write path.
#[derive(Debug, Clone)]
pub struct ReservationService {
    /// Shared connection pool; each attempt runs its own transaction.
    pool: PgPool,
    /// Timeout and retry policy.
    config: BookingConfig,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(pool: PgPool, config: BookingConfig) -> Self {
        Self { pool, config }
    }

    /// Reserve a court slot for `requester`.
    ///
    /// The whole operation runs under a hard deadline
    /// (`reservation_timeout_seconds`); on expiry the in-flight
    /// transaction is dropped and rolled back in full, and the caller
    /// receives a retryable [`ErrorKind::Timeout`].
    pub async fn reserve(
        &self,
        requester: UserId,
        cmd: ReserveCommand,
    ) -> AppResult<ReservationOutcome> {
        let range = TimeRange::for_slot(cmd.date, cmd.start_hour, cmd.duration_hours)?;
        let key = cmd
            .idempotency_key
            .clone()
            .unwrap_or_else(|| fallback_key(requester));

        let deadline = StdDuration::from_secs(self.config.reservation_timeout_seconds);
        match tokio::time::timeout(deadline, self.reserve_with_retry(requester, &cmd, &range, &key))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(AppError::timeout(
                "Reservation timed out; retry with the same idempotency key",
            )),
        }
    }

    /// Run reservation attempts, retrying serialization failures up to the
    /// configured bound and resolving constraint races.
    async fn reserve_with_retry(
        &self,
        requester: UserId,
        cmd: &ReserveCommand,
        range: &TimeRange,
        key: &str,
    ) -> AppResult<ReservationOutcome> {
        let mut attempts = 0u32;
        loop {
            match self.try_reserve(requester, cmd, range, key).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) if violates_constraint(&err, "bookings_no_overlap") => {
                    // The store-level backstop fired: someone else holds
                    // the slot.
                    return Err(AppError::conflict("Time slot is already booked"));
                }
                Err(err) if violates_constraint(&err, "bookings_idempotency_key_unique") => {
                    // A concurrent retry with the same key won the insert;
                    // replay its result.
                    return self.replay_committed(requester, cmd, range, key).await;
                }
                Err(err) if is_serialization_failure(&err) => {
                    if attempts >= self.config.serialization_retries {
                        return Err(AppError::timeout(
                            "Reservation contention; retry with the same idempotency key",
                        ));
                    }
                    attempts += 1;
                    tracing::debug!(
                        attempt = attempts,
                        court_id = %cmd.court_id,
                        "Serialization failure, retrying reservation"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One reservation attempt: every precondition check and both inserts
    /// inside a single serializable transaction.
    async fn try_reserve(
        &self,
        requester: UserId,
        cmd: &ReserveCommand,
        range: &TimeRange,
        key: &str,
    ) -> AppResult<ReservationOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to set isolation level", e)
            })?;

        // Idempotent replay: same key, no new rows.
        if let Some(existing) = BookingRepository::find_by_idempotency_key(&mut tx, key).await? {
            verify_replay_matches(&existing, requester, cmd, range)?;
            let payment = PaymentRepository::find_by_booking_on(&mut tx, existing.id.into())
                .await?
                .ok_or_else(|| AppError::internal("Booking has no payment record"))?;
            commit(tx).await?;
            return Ok(ReservationOutcome {
                booking: existing,
                payment,
                replayed: true,
            });
        }

        let court = CourtRepository::find_by_id_on(&mut tx, cmd.court_id)
            .await?
            .ok_or_else(|| AppError::not_found("Court not found"))?;

        let overlapping =
            BookingRepository::find_blocking_overlaps(&mut tx, cmd.court_id, range).await?;
        if !overlapping.is_empty() {
            return Err(AppError::conflict("Time slot is already booked"));
        }

        let venue = VenueRepository::find_by_id_on(&mut tx, VenueId::from_uuid(court.venue_id))
            .await?
            .ok_or_else(|| AppError::not_found("Venue not found"))?;
        if !venue.accepts_bookings() {
            return Err(AppError::forbidden("Venue is not approved for bookings"));
        }

        if !court.is_open_for(range) {
            return Err(AppError::validation(
                "Requested range is outside the court's operating hours",
            ));
        }

        let booking = BookingRepository::insert(
            &mut tx,
            &CreateBooking {
                user_id: requester.into_uuid(),
                court_id: cmd.court_id.into_uuid(),
                start_time: range.start(),
                end_time: range.end(),
                notes: cmd.notes.clone(),
                idempotency_key: key.to_string(),
            },
        )
        .await?;

        let payment = PaymentRepository::insert(
            &mut tx,
            &CreatePayment {
                booking_id: booking.id,
                amount: price_snapshot(&court, range),
                currency: court.currency.clone(),
            },
        )
        .await?;

        commit(tx).await?;

        tracing::info!(
            booking_id = %booking.id,
            court_id = %cmd.court_id,
            start = %range.start(),
            end = %range.end(),
            amount = payment.amount,
            "Booking created"
        );

        Ok(ReservationOutcome {
            booking,
            payment,
            replayed: false,
        })
    }

    /// Load and return a booking another transaction committed under our
    /// idempotency key.
    async fn replay_committed(
        &self,
        requester: UserId,
        cmd: &ReserveCommand,
        range: &TimeRange,
        key: &str,
    ) -> AppResult<ReservationOutcome> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
        })?;
        let booking = BookingRepository::find_by_idempotency_key(&mut conn, key)
            .await?
            .ok_or_else(|| AppError::conflict("Idempotency key already in use"))?;
        verify_replay_matches(&booking, requester, cmd, range)?;
        let payment = PaymentRepository::find_by_booking_on(&mut conn, booking.id.into())
            .await?
            .ok_or_else(|| AppError::internal("Booking has no payment record"))?;
        Ok(ReservationOutcome {
            booking,
            payment,
            replayed: true,
        })
    }
}

/// Amount charged for the booking: hourly price times duration, in minor
/// currency units, frozen at creation time.
fn price_snapshot(court: &Court, range: &TimeRange) -> i64 {
    court.price_for(range.duration_hours())
}

/// A replay must carry the payload of the original request; the same key
/// with a different slot is a logic error, not a retry.
fn verify_replay_matches(
    existing: &Booking,
    requester: UserId,
    cmd: &ReserveCommand,
    range: &TimeRange,
) -> AppResult<()> {
    let matches = existing.user_id == requester.into_uuid()
        && existing.court_id == cmd.court_id.into_uuid()
        && existing.start_time == range.start()
        && existing.end_time == range.end();
    if matches {
        Ok(())
    } else {
        Err(AppError::conflict(
            "Idempotency key was already used with a different payload",
        ))
    }
}

/// Synthesized key when the client supplies none: satisfies the
/// uniqueness constraint without providing retry deduplication.
fn fallback_key(requester: UserId) -> String {
    format!(
        "auto:{}:{}:{:08x}",
        requester,
        Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        rand::random::<u32>()
    )
}

async fn commit(tx: sqlx::Transaction<'_, sqlx::Postgres>) -> AppResult<()> {
    tx.commit().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
    })
}

/// Recover the SQLSTATE code and violated constraint, if any, from the
/// Postgres error wrapped inside an [`AppError`].
fn pg_error_parts(err: &AppError) -> Option<(Option<String>, Option<String>)> {
    match err.source.as_ref()?.downcast_ref::<sqlx::Error>()? {
        sqlx::Error::Database(db) => Some((
            db.code().map(|code| code.into_owned()),
            db.constraint().map(str::to_owned),
        )),
        _ => None,
    }
}

/// SQLSTATE 40001 (serialization_failure) or 40P01 (deadlock_detected):
/// transient under SERIALIZABLE, safe to retry.
fn is_serialization_failure(err: &AppError) -> bool {
    pg_error_parts(err)
        .and_then(|(code, _)| code)
        .is_some_and(|code| code == "40001" || code == "40P01")
}

/// Whether the error is a violation of the named constraint.
fn violates_constraint(err: &AppError, constraint: &str) -> bool {
    pg_error_parts(err)
        .and_then(|(_, violated)| violated)
        .is_some_and(|violated| violated == constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_keys_are_unique() {
        let user = UserId::new();
        assert_ne!(fallback_key(user), fallback_key(user));
    }

    #[test]
    fn test_fallback_key_names_the_requester() {
        let user = UserId::new();
        assert!(fallback_key(user).contains(&user.to_string()));
    }

    #[test]
    fn test_replay_divergence_is_a_conflict() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let range = TimeRange::for_slot(date, 10, 2).unwrap();
        let requester = UserId::new();
        let cmd = ReserveCommand {
            court_id: CourtId::new(),
            date,
            start_hour: 10,
            duration_hours: 2,
            notes: None,
            idempotency_key: Some("key-1".to_string()),
        };
        let booking = Booking {
            id: uuid::Uuid::new_v4(),
            user_id: requester.into_uuid(),
            court_id: cmd.court_id.into_uuid(),
            // Stored booking is [11,13): same key, different slot.
            start_time: TimeRange::for_slot(date, 11, 2).unwrap().start(),
            end_time: TimeRange::for_slot(date, 11, 2).unwrap().end(),
            status: courtbook_entity::booking::BookingStatus::Pending,
            notes: None,
            idempotency_key: "key-1".to_string(),
            created_at: Utc::now(),
            cancelled_at: None,
        };
        let err = verify_replay_matches(&booking, requester, &cmd, &range).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_replay_match_accepts_identical_payload() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let range = TimeRange::for_slot(date, 10, 2).unwrap();
        let requester = UserId::new();
        let cmd = ReserveCommand {
            court_id: CourtId::new(),
            date,
            start_hour: 10,
            duration_hours: 2,
            notes: None,
            idempotency_key: Some("key-1".to_string()),
        };
        let booking = Booking {
            id: uuid::Uuid::new_v4(),
            user_id: requester.into_uuid(),
            court_id: cmd.court_id.into_uuid(),
            start_time: range.start(),
            end_time: range.end(),
            status: courtbook_entity::booking::BookingStatus::Pending,
            notes: None,
            idempotency_key: "key-1".to_string(),
            created_at: Utc::now(),
            cancelled_at: None,
        };
        assert!(verify_replay_matches(&booking, requester, &cmd, &range).is_ok());
    }
}
