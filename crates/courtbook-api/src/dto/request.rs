//! Request DTOs with validation.
//!
//! Everything crossing the HTTP boundary is deserialized into one of
//! these strongly-typed structs and validated before any service code
//! runs; nothing dynamically-shaped reaches the reservation transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use courtbook_core::error::AppError;
use courtbook_core::result::AppResult;
use courtbook_service::lifecycle::PaymentOutcome;

/// Reservation request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReserveRequest {
    /// Court to reserve.
    pub court_id: Uuid,
    /// Calendar day, "YYYY-MM-DD".
    pub date: String,
    /// First reserved hour of the day.
    #[validate(range(max = 23, message = "start_time must be between 0 and 23"))]
    pub start_time: u32,
    /// Number of consecutive hours.
    #[validate(range(min = 1, max = 8, message = "duration must be between 1 and 8 hours"))]
    pub duration: u32,
    /// Optional note shown to the venue owner.
    #[validate(length(max = 500, message = "notes may be at most 500 characters"))]
    pub notes: Option<String>,
}

impl ReserveRequest {
    /// Parse the calendar-day field.
    pub fn parsed_date(&self) -> AppResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| AppError::validation("date must be formatted YYYY-MM-DD"))
    }
}

/// Availability query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Calendar day, "YYYY-MM-DD".
    pub date: String,
}

impl AvailabilityQuery {
    /// Parse the calendar-day field.
    pub fn parsed_date(&self) -> AppResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| AppError::validation("date must be formatted YYYY-MM-DD"))
    }
}

/// Payment-provider callback body.
///
/// The deployment fronts this endpoint with provider signature
/// verification; by the time it reaches the handler the outcome is
/// provider-verified, never client-asserted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentCallbackRequest {
    /// The booking whose payment concluded.
    pub booking_id: Uuid,
    /// Verified provider outcome.
    pub outcome: PaymentOutcome,
    /// Provider transaction reference.
    #[validate(length(min = 1, message = "provider_ref is required"))]
    pub provider_ref: String,
    /// Provider receipt reference, if issued.
    pub receipt_ref: Option<String>,
}
