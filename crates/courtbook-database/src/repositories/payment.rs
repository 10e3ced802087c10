//! Payment repository implementation.

use sqlx::{PgConnection, PgPool};

use courtbook_core::error::{AppError, ErrorKind};
use courtbook_core::result::AppResult;
use courtbook_core::types::{BookingId, PaymentId};
use courtbook_entity::payment::{CreatePayment, Payment, PaymentStatus};

/// Repository for payment records.
///
/// Payments are only ever written in the same transaction as their
/// booking, so all mutations are associated functions over the caller's
/// `PgConnection`.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the payment belonging to a booking.
    pub async fn find_by_booking(&self, booking_id: BookingId) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find payment", e))
    }

    // ── Transactional operations ─────────────────────────────────

    /// Insert a new pending payment.
    pub async fn insert(conn: &mut PgConnection, data: &CreatePayment) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (booking_id, amount, currency) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.booking_id)
        .bind(data.amount)
        .bind(&data.currency)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create payment", e))
    }

    /// Find a booking's payment on an existing transaction connection.
    pub async fn find_by_booking_on(
        conn: &mut PgConnection,
        booking_id: BookingId,
    ) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find payment", e))
    }

    /// Load a booking's payment with a row lock.
    pub async fn lock_by_booking(
        conn: &mut PgConnection,
        booking_id: BookingId,
    ) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_id = $1 FOR UPDATE",
        )
        .bind(booking_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock payment", e))
    }

    /// Set a payment's status.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: PaymentId,
        status: PaymentStatus,
    ) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update payment status", e)
        })
    }

    /// Record a provider outcome: status plus transaction/receipt refs.
    pub async fn record_provider_outcome(
        conn: &mut PgConnection,
        id: PaymentId,
        status: PaymentStatus,
        provider_ref: &str,
        receipt_ref: Option<&str>,
    ) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments \
             SET status = $2, provider_ref = $3, receipt_ref = COALESCE($4, receipt_ref), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(provider_ref)
        .bind(receipt_ref)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record payment outcome", e)
        })
    }
}
