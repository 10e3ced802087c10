//! Payment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PaymentStatus;

/// The monetary record tied one-to-one to a booking.
///
/// `amount` is the price snapshot taken at booking creation
/// (`court.price_per_hour x duration_hours`, in minor currency units) and
/// is never recomputed, even if the court's price later changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// The booking this payment belongs to (unique).
    pub booking_id: Uuid,
    /// Amount in minor currency units (e.g. paisa).
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Lifecycle state.
    pub status: PaymentStatus,
    /// Payment-provider transaction reference.
    pub provider_ref: Option<String>,
    /// Provider receipt reference.
    pub receipt_ref: Option<String>,
    /// When the payment row was created.
    pub created_at: DateTime<Utc>,
    /// When the payment row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    /// The booking this payment belongs to.
    pub booking_id: Uuid,
    /// Snapshot amount in minor currency units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
}
