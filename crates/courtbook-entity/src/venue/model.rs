//! Venue entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::VenueStatus;

/// A facility containing one or more courts.
///
/// Read-only from the reservation core's perspective: approval workflows
/// live in the facility-management subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    /// Unique venue identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Approval state.
    pub status: VenueStatus,
    /// When the venue was registered.
    pub created_at: DateTime<Utc>,
}

impl Venue {
    /// Whether this venue's courts may accept new bookings.
    pub fn accepts_bookings(&self) -> bool {
        self.status.is_approved()
    }
}
