//! Booking lifecycle transitions: payment confirmation, cancellation,
//! and the completion sweep.

pub mod service;

pub use service::{LifecycleService, PaymentOutcome, cancellation_allowed};
