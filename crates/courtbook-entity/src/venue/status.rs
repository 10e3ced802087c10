//! Venue approval status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval state of a venue. Only approved venues accept bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "venue_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VenueStatus {
    /// Awaiting admin review.
    Pending,
    /// Approved; courts may be booked.
    Approved,
    /// Rejected by an admin.
    Rejected,
}

impl VenueStatus {
    /// Whether courts of this venue may accept new bookings.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VenueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
