//! Hour-by-hour availability computation.
//!
//! The grid is an optimistic hint for callers composing multi-hour
//! bookings; the reservation transaction re-verifies every conflict
//! authoritatively before writing.

pub mod grid;
pub mod service;

pub use grid::{HourSlot, slot_grid};
pub use service::{AvailabilityService, DayAvailability};
