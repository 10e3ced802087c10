//! Venue domain entities.
//!
//! Venues are owned by the facility-management side of the platform; the
//! reservation core only reads them to check the approval precondition.

pub mod model;
pub mod status;

pub use model::Venue;
pub use status::VenueStatus;
