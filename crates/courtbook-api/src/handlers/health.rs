//! Health probe handler.

use axum::Json;
use axum::extract::State;

use courtbook_database::connection;

use crate::dto::response::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let database = connection::health_check(&state.db_pool).await.unwrap_or(false);

    Ok(Json(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
    }))
}
