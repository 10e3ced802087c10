//! Route definitions for the CourtBook HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(booking_routes())
        .merge(availability_routes())
        .merge(payment_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Reservation, lookup, and cancellation endpoints
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(handlers::booking::reserve))
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route("/bookings/{id}/cancel", post(handlers::booking::cancel))
}

/// Availability grid endpoint
fn availability_routes() -> Router<AppState> {
    Router::new().route(
        "/courts/{id}/availability",
        get(handlers::availability::get_availability),
    )
}

/// Payment-provider callback endpoint
fn payment_routes() -> Router<AppState> {
    Router::new().route("/payments/callback", post(handlers::payment::payment_callback))
}

/// External-scheduler endpoints
fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/bookings/sweep",
        post(handlers::admin::run_completion_sweep),
    )
}

/// Liveness endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
