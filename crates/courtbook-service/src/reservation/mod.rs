//! The authoritative reservation write path.

pub mod service;

pub use service::{ReservationOutcome, ReservationService, ReserveCommand};
