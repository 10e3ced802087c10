//! Availability grid tests.

use chrono::NaiveDate;
use http::StatusCode;
use uuid::Uuid;

use crate::helpers::{TestApp, future_date};

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn availability_grid_reflects_bookings() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;

    let date = future_date();
    let day: NaiveDate = date.parse().unwrap();
    let start = day.and_hms_opt(10, 0, 0).unwrap().and_utc();
    let end = day.and_hms_opt(12, 0, 0).unwrap().and_utc();
    app.seed_booking(Uuid::new_v4(), court, start, end, "confirmed")
        .await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/courts/{court}/availability?date={date}"),
            None,
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let slots = body["data"]["time_slots"].as_array().unwrap();
    assert_eq!(slots.len(), 16, "one slot per hour from 6 to 21");

    for slot in slots {
        let hour = slot["hour"].as_u64().unwrap();
        let booked = hour == 10 || hour == 11;
        assert_eq!(slot["has_conflict"].as_bool().unwrap(), booked, "hour {hour}");
        assert_eq!(slot["available"].as_bool().unwrap(), !booked, "hour {hour}");
        assert_eq!(slot["is_past"].as_bool().unwrap(), false, "hour {hour}");
        assert_eq!(slot["price"].as_i64().unwrap(), 50_000);
    }

    let bookings = body["data"]["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["status"], "confirmed");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn availability_ignores_cancelled_bookings() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;

    let date = future_date();
    let day: NaiveDate = date.parse().unwrap();
    let start = day.and_hms_opt(10, 0, 0).unwrap().and_utc();
    let end = day.and_hms_opt(11, 0, 0).unwrap().and_utc();
    app.seed_booking(Uuid::new_v4(), court, start, end, "cancelled")
        .await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/courts/{court}/availability?date={date}"),
            None,
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let slots = body["data"]["time_slots"].as_array().unwrap();
    let ten = slots.iter().find(|s| s["hour"] == 10).unwrap();
    assert_eq!(ten["has_conflict"].as_bool().unwrap(), false);
    assert_eq!(ten["available"].as_bool().unwrap(), true);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn availability_rejects_unknown_court_and_bad_date() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(
            "GET",
            &format!("/api/courts/{}/availability?date={}", Uuid::new_v4(), future_date()),
            None,
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let (status, _) = app
        .request(
            "GET",
            &format!("/api/courts/{court}/availability?date=junk"),
            None,
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
