//! # courtbook-service
//!
//! Business logic service layer for CourtBook. Each service orchestrates
//! repositories over the shared connection pool to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. The acting user is always
//! an explicit parameter; nothing here reads ambient request state.

pub mod availability;
pub mod lifecycle;
pub mod reservation;

pub use availability::{AvailabilityService, DayAvailability, HourSlot};
pub use lifecycle::{LifecycleService, PaymentOutcome};
pub use reservation::{ReservationOutcome, ReservationService, ReserveCommand};
