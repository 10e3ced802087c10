//! Booking policy configuration.

use serde::{Deserialize, Serialize};

/// Policy knobs for the reservation write path and cancellation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// A booking may be cancelled only while `now + window < start`.
    #[serde(default = "default_cancellation_window")]
    pub cancellation_window_hours: i64,
    /// Hard deadline for the reservation transaction. On expiry the
    /// transaction is rolled back in full and the caller sees a
    /// retryable timeout.
    #[serde(default = "default_reservation_timeout")]
    pub reservation_timeout_seconds: u64,
    /// Automatic retries after a serialization failure before giving up.
    #[serde(default = "default_serialization_retries")]
    pub serialization_retries: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            cancellation_window_hours: default_cancellation_window(),
            reservation_timeout_seconds: default_reservation_timeout(),
            serialization_retries: default_serialization_retries(),
        }
    }
}

fn default_cancellation_window() -> i64 {
    2
}

fn default_reservation_timeout() -> u64 {
    10
}

fn default_serialization_retries() -> u32 {
    1
}
