//! # courtbook-api
//!
//! HTTP API layer for CourtBook built on Axum.
//!
//! Provides the reservation, availability, cancellation, payment-callback,
//! and sweep endpoints, plus middleware, extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
