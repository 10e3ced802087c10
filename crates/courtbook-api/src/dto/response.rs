//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use courtbook_entity::booking::Booking;
use courtbook_entity::payment::Payment;
use courtbook_service::availability::{DayAvailability, HourSlot};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Booking summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// Reserved court.
    pub court_id: Uuid,
    /// Reserving user.
    pub user_id: Uuid,
    /// Interval start.
    pub start_time: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end_time: DateTime<Utc>,
    /// Lifecycle state.
    pub status: String,
    /// User note.
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Cancellation time, if cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            court_id: booking.court_id,
            user_id: booking.user_id,
            start_time: booking.start_time,
            end_time: booking.end_time,
            status: booking.status.to_string(),
            notes: booking.notes,
            created_at: booking.created_at,
            cancelled_at: booking.cancelled_at,
        }
    }
}

/// Payment summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Owning booking.
    pub booking_id: Uuid,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Lifecycle state.
    pub status: String,
    /// Provider transaction reference.
    pub provider_ref: Option<String>,
    /// Provider receipt reference.
    pub receipt_ref: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            booking_id: payment.booking_id,
            amount: payment.amount,
            currency: payment.currency,
            status: payment.status.to_string(),
            provider_ref: payment.provider_ref,
            receipt_ref: payment.receipt_ref,
        }
    }
}

/// Reservation result: the booking and its payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    /// The created or replayed booking.
    pub booking: BookingResponse,
    /// Its payment record.
    pub payment: PaymentResponse,
}

/// One hour on the availability grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlotResponse {
    /// Start hour of the slot.
    pub hour: u32,
    /// Bookable right now.
    pub available: bool,
    /// Already begun or elapsed.
    pub is_past: bool,
    /// Overlapped by an existing booking.
    pub has_conflict: bool,
    /// Price for this hour in minor currency units.
    pub price: i64,
}

/// Booking interval summary shown alongside the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedSlotResponse {
    /// Interval start.
    pub start_time: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end_time: DateTime<Utc>,
    /// Lifecycle state.
    pub status: String,
}

/// Availability grid for one court-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The court the grid applies to.
    pub court_id: Uuid,
    /// The requested day.
    pub date: String,
    /// One entry per operating hour.
    pub time_slots: Vec<TimeSlotResponse>,
    /// The day's bookings.
    pub bookings: Vec<BookedSlotResponse>,
}

impl AvailabilityResponse {
    /// Assemble the response from a computed day grid.
    pub fn from_day(date: String, day: DayAvailability) -> Self {
        let price = day.court.price_per_hour;
        Self {
            court_id: day.court.id,
            date,
            time_slots: day
                .slots
                .iter()
                .map(|slot: &HourSlot| TimeSlotResponse {
                    hour: slot.hour,
                    available: slot.available,
                    is_past: slot.is_past,
                    has_conflict: slot.has_conflict,
                    price,
                })
                .collect(),
            bookings: day
                .bookings
                .into_iter()
                .map(|b| BookedSlotResponse {
                    start_time: b.start_time,
                    end_time: b.end_time,
                    status: b.status.to_string(),
                })
                .collect(),
        }
    }
}

/// Completion sweep result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResponse {
    /// Number of bookings transitioned to completed.
    pub completed: u64,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Database reachability.
    pub database: bool,
}
