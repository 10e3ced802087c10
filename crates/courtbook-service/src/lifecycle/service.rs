//! Booking state machine execution.
//!
//! Every transition updates the booking and its payment in one
//! transaction with both rows locked, so a crash can never leave a
//! confirmed booking with a failed payment or vice versa.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use courtbook_core::config::booking::BookingConfig;
use courtbook_core::error::{AppError, ErrorKind};
use courtbook_core::result::AppResult;
use courtbook_core::traits::PaymentGateway;
use courtbook_core::types::{BookingId, UserId};
use courtbook_database::repositories::booking::BookingRepository;
use courtbook_database::repositories::payment::PaymentRepository;
use courtbook_entity::booking::{Booking, BookingStatus};
use courtbook_entity::payment::{Payment, PaymentStatus};

/// Server-verified outcome reported by the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    /// The provider captured the payment.
    Succeeded,
    /// The provider reported failure or abandonment.
    Failed,
}

/// Executes booking state-machine transitions.
#[derive(Debug, Clone)]
pub struct LifecycleService {
    /// Shared connection pool; each transition runs its own transaction.
    pool: PgPool,
    /// Booking repository (batch sweep).
    booking_repo: Arc<BookingRepository>,
    /// External payment provider seam.
    gateway: Arc<dyn PaymentGateway>,
    /// Cancellation window policy.
    config: BookingConfig,
}

impl LifecycleService {
    /// Creates a new lifecycle service.
    pub fn new(
        pool: PgPool,
        booking_repo: Arc<BookingRepository>,
        gateway: Arc<dyn PaymentGateway>,
        config: BookingConfig,
    ) -> Self {
        Self {
            pool,
            booking_repo,
            gateway,
            config,
        }
    }

    /// Apply a provider-verified payment result to a pending booking.
    ///
    /// Success confirms the booking; failure cancels it. Provider retries
    /// of an already-applied outcome are no-ops; any other out-of-order
    /// transition is rejected.
    pub async fn apply_payment_result(
        &self,
        booking_id: BookingId,
        outcome: PaymentOutcome,
        provider_ref: &str,
        receipt_ref: Option<&str>,
    ) -> AppResult<(Booking, Payment)> {
        let mut tx = self.begin().await?;

        let booking = BookingRepository::lock_by_id(&mut tx, booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;
        let payment = PaymentRepository::lock_by_booking(&mut tx, booking_id)
            .await?
            .ok_or_else(|| AppError::internal("Booking has no payment record"))?;

        let (target_booking, target_payment) = match outcome {
            PaymentOutcome::Succeeded => (BookingStatus::Confirmed, PaymentStatus::Succeeded),
            PaymentOutcome::Failed => (BookingStatus::Cancelled, PaymentStatus::Failed),
        };

        // Provider retry of an outcome we already applied.
        if booking.status == target_booking && payment.status == target_payment {
            commit(tx).await?;
            return Ok((booking, payment));
        }

        if booking.status != BookingStatus::Pending
            || !booking.status.can_transition_to(target_booking)
        {
            return Err(AppError::conflict(format!(
                "Booking is {} and cannot accept a payment result",
                booking.status
            )));
        }

        let payment = PaymentRepository::record_provider_outcome(
            &mut tx,
            payment.id.into(),
            target_payment,
            provider_ref,
            receipt_ref,
        )
        .await?;
        let booking = match target_booking {
            BookingStatus::Cancelled => {
                BookingRepository::mark_cancelled(&mut tx, booking_id, Utc::now()).await?
            }
            _ => BookingRepository::set_status(&mut tx, booking_id, target_booking).await?,
        };

        commit(tx).await?;

        tracing::info!(
            booking_id = %booking.id,
            status = %booking.status,
            payment_status = %payment.status,
            "Payment result applied"
        );

        Ok((booking, payment))
    }

    /// Cancel a booking on the owner's request.
    ///
    /// Accepted only while `now + window < start` and the booking is not
    /// terminal. A captured payment is marked refunded; the refund intent
    /// is handed to the gateway after commit, best-effort.
    pub async fn cancel(
        &self,
        requester: UserId,
        booking_id: BookingId,
        now: DateTime<Utc>,
    ) -> AppResult<(Booking, Payment)> {
        let mut tx = self.begin().await?;

        let booking = BookingRepository::lock_by_id(&mut tx, booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        if booking.user_id != requester.into_uuid() {
            return Err(AppError::forbidden("Booking belongs to another user"));
        }
        if booking.is_terminal() {
            return Err(AppError::validation(
                "Booking is already cancelled or completed",
            ));
        }
        if !cancellation_allowed(now, booking.start_time, self.config.cancellation_window_hours) {
            return Err(AppError::validation(format!(
                "Bookings may only be cancelled more than {} hours before the start time",
                self.config.cancellation_window_hours
            )));
        }

        let payment = PaymentRepository::lock_by_booking(&mut tx, booking_id)
            .await?
            .ok_or_else(|| AppError::internal("Booking has no payment record"))?;

        let payment = match payment.status {
            PaymentStatus::Succeeded => {
                PaymentRepository::set_status(&mut tx, payment.id.into(), PaymentStatus::Refunded)
                    .await?
            }
            PaymentStatus::Pending => {
                PaymentRepository::set_status(&mut tx, payment.id.into(), PaymentStatus::Failed)
                    .await?
            }
            _ => payment,
        };
        let booking = BookingRepository::mark_cancelled(&mut tx, booking_id, now).await?;

        commit(tx).await?;

        tracing::info!(
            booking_id = %booking.id,
            payment_status = %payment.status,
            "Booking cancelled"
        );

        if payment.status == PaymentStatus::Refunded {
            if let Err(err) = self
                .gateway
                .record_refund_intent(
                    payment.id.into(),
                    payment.provider_ref.as_deref(),
                    payment.amount,
                    &payment.currency,
                )
                .await
            {
                tracing::error!(
                    payment_id = %payment.id,
                    error = %err,
                    "Failed to record refund intent with the payment gateway"
                );
            }
        }

        Ok((booking, payment))
    }

    /// Transition every confirmed booking whose end time has passed to
    /// completed. Idempotent: a second run touches zero rows.
    pub async fn complete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let count = self.booking_repo.complete_expired(now).await?;
        if count > 0 {
            tracing::info!(count, "Completed expired bookings");
        }
        Ok(count)
    }

    async fn begin(&self) -> AppResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }
}

/// The cancellation window check: a booking may be cancelled only while
/// more than `window_hours` remain before its start.
pub fn cancellation_allowed(
    now: DateTime<Utc>,
    start: DateTime<Utc>,
    window_hours: i64,
) -> bool {
    now + Duration::hours(window_hours) < start
}

async fn commit(tx: sqlx::Transaction<'_, sqlx::Postgres>) -> AppResult<()> {
    tx.commit().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_booking_in_ninety_minutes_cannot_be_cancelled() {
        assert!(!cancellation_allowed(at(10, 0), at(11, 30), 2));
    }

    #[test]
    fn test_booking_in_three_hours_can_be_cancelled() {
        assert!(cancellation_allowed(at(10, 0), at(13, 0), 2));
    }

    #[test]
    fn test_exact_window_boundary_is_rejected() {
        // now + 2h == start is not strictly before the start.
        assert!(!cancellation_allowed(at(10, 0), at(12, 0), 2));
    }
}
