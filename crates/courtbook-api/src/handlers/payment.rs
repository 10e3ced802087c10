//! Payment-provider callback handler.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use courtbook_core::error::AppError;
use courtbook_core::types::BookingId;

use crate::dto::request::PaymentCallbackRequest;
use crate::dto::response::{ApiResponse, BookingResponse, PaymentResponse, ReservationResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/payments/callback
///
/// Invoked by the payment collaborator with a provider-verified outcome;
/// drives the pending booking to confirmed or cancelled in one
/// transaction with the payment update.
pub async fn payment_callback(
    State(state): State<AppState>,
    Json(req): Json<PaymentCallbackRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (booking, payment) = state
        .lifecycle_service
        .apply_payment_result(
            BookingId::from_uuid(req.booking_id),
            req.outcome,
            &req.provider_ref,
            req.receipt_ref.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::ok(ReservationResponse {
        booking: BookingResponse::from(booking),
        payment: PaymentResponse::from(payment),
    })))
}
