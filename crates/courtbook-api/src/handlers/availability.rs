//! Availability handler.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use uuid::Uuid;

use courtbook_core::types::CourtId;

use crate::dto::request::AvailabilityQuery;
use crate::dto::response::{ApiResponse, AvailabilityResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/courts/{id}/availability?date=YYYY-MM-DD
///
/// The grid is an optimistic hint for slot pickers; the reservation
/// endpoint is the sole authority on conflicts.
pub async fn get_availability(
    State(state): State<AppState>,
    Path(court_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, ApiError> {
    let date = query.parsed_date()?;

    let day = state
        .availability_service
        .day_grid(CourtId::from_uuid(court_id), date, Utc::now())
        .await?;

    Ok(Json(ApiResponse::ok(AvailabilityResponse::from_day(
        query.date.clone(),
        day,
    ))))
}
