//! Booking handlers — reserve, fetch, cancel.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use courtbook_core::error::AppError;
use courtbook_core::types::{BookingId, CourtId};
use courtbook_service::reservation::ReserveCommand;

use crate::dto::request::ReserveRequest;
use crate::dto::response::{ApiResponse, BookingResponse, PaymentResponse, ReservationResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdempotencyKey};
use crate::state::AppState;

/// POST /api/bookings
///
/// 201 on a fresh reservation, 200 when an idempotency key replays an
/// existing one.
pub async fn reserve(
    State(state): State<AppState>,
    auth: AuthUser,
    IdempotencyKey(idempotency_key): IdempotencyKey,
    Json(req): Json<ReserveRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let date = req.parsed_date()?;

    let outcome = state
        .reservation_service
        .reserve(
            auth.user_id,
            ReserveCommand {
                court_id: CourtId::from_uuid(req.court_id),
                date,
                start_hour: req.start_time,
                duration_hours: req.duration,
                notes: req.notes.clone(),
                idempotency_key,
            },
        )
        .await?;

    let status = if outcome.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(ApiResponse::ok(ReservationResponse {
            booking: BookingResponse::from(outcome.booking),
            payment: PaymentResponse::from(outcome.payment),
        })),
    ))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationResponse>>, ApiError> {
    let booking_id = BookingId::from_uuid(id);
    let booking = state
        .booking_repo
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;

    if booking.user_id != auth.user_id.into_uuid() {
        return Err(AppError::forbidden("Booking belongs to another user").into());
    }

    let payment = state
        .payment_repo
        .find_by_booking(booking_id)
        .await?
        .ok_or_else(|| AppError::internal("Booking has no payment record"))?;

    Ok(Json(ApiResponse::ok(ReservationResponse {
        booking: BookingResponse::from(booking),
        payment: PaymentResponse::from(payment),
    })))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationResponse>>, ApiError> {
    let (booking, payment) = state
        .lifecycle_service
        .cancel(auth.user_id, BookingId::from_uuid(id), Utc::now())
        .await?;

    Ok(Json(ApiResponse::ok(ReservationResponse {
        booking: BookingResponse::from(booking),
        payment: PaymentResponse::from(payment),
    })))
}
