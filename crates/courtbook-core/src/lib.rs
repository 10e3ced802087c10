//! # courtbook-core
//!
//! Core crate for CourtBook. Contains configuration schemas, typed
//! identifiers, the time-range value model, the payment-gateway trait
//! seam, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CourtBook crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
