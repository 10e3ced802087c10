//! Admin handlers — external-scheduler entry points.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::{ApiResponse, SweepResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/admin/bookings/sweep
///
/// Transitions every confirmed booking whose interval has elapsed to
/// completed and reports the count. Idempotent, so external schedulers
/// may fire it alongside the in-process cron.
pub async fn run_completion_sweep(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SweepResponse>>, ApiError> {
    let completed = state.lifecycle_service.complete_expired(Utc::now()).await?;

    Ok(Json(ApiResponse::ok(SweepResponse { completed })))
}
