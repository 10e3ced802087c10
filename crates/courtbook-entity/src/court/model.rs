//! Court entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use courtbook_core::types::TimeRange;

/// A single bookable resource belonging to a venue.
///
/// Operating hours are an `[open_hour, close_hour)` pair on the 0-24
/// scale (`open < close`, enforced by a database CHECK). The hourly price
/// is stored in integer minor currency units (e.g. paisa) so no floating
/// point ever enters the money path. Courts are treated as immutable for
/// the lifetime of a booking: a later hours or price change does not
/// retroactively affect existing bookings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Court {
    /// Unique court identifier.
    pub id: Uuid,
    /// The venue this court belongs to.
    pub venue_id: Uuid,
    /// Display name.
    pub name: String,
    /// First bookable hour of the day.
    pub open_hour: i32,
    /// Hour at which the court closes (exclusive).
    pub close_hour: i32,
    /// Price per hour in minor currency units.
    pub price_per_hour: i64,
    /// ISO currency code, e.g. "INR".
    pub currency: String,
    /// When the court was registered.
    pub created_at: DateTime<Utc>,
}

impl Court {
    /// Whether the range lies entirely within this court's operating hours.
    pub fn is_open_for(&self, range: &TimeRange) -> bool {
        range.within_operating_hours(self.open_hour as u32, self.close_hour as u32)
    }

    /// Price snapshot for a booking of the given whole-hour duration.
    pub fn price_for(&self, duration_hours: i64) -> i64 {
        self.price_per_hour * duration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn court() -> Court {
        Court {
            id: Uuid::new_v4(),
            venue_id: Uuid::new_v4(),
            name: "Court 1".to_string(),
            open_hour: 6,
            close_hour: 22,
            price_per_hour: 50_000,
            currency: "INR".to_string(),
            created_at: Utc::now(),
        }
    }

    fn slot(start_hour: u32, duration: u32) -> TimeRange {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        TimeRange::for_slot(date, start_hour, duration).unwrap()
    }

    #[test]
    fn test_is_open_for_boundaries() {
        let c = court();
        assert!(c.is_open_for(&slot(21, 1)));
        assert!(!c.is_open_for(&slot(22, 1)));
        assert!(!c.is_open_for(&slot(5, 1)));
    }

    #[test]
    fn test_price_snapshot_in_minor_units() {
        // 500 INR/hour stored as 50000 paisa; two hours cost 100000 paisa.
        assert_eq!(court().price_for(2), 100_000);
    }
}
