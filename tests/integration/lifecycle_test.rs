//! Booking lifecycle tests: payment callbacks, the cancellation window,
//! refund marking, and completion-sweep idempotence.

use chrono::{Duration, Utc};
use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn payment_success_confirms_booking_and_replays_cleanly() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let user = Uuid::new_v4();
    let start = Utc::now() + Duration::days(3);
    let booking = app
        .seed_booking(user, court, start, start + Duration::hours(1), "pending")
        .await;
    app.seed_payment(booking, 50_000, "pending").await;

    let callback = json!({
        "booking_id": booking,
        "outcome": "succeeded",
        "provider_ref": "pay_abc123",
        "receipt_ref": "rcpt_1",
    });

    let (status, body) = app
        .request("POST", "/api/payments/callback", None, None, Some(callback.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking"]["status"], "confirmed");
    assert_eq!(body["data"]["payment"]["status"], "succeeded");

    // Provider retry of the same outcome is a no-op, not an error.
    let (status, _) = app
        .request("POST", "/api/payments/callback", None, None, Some(callback))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.booking_status(booking).await, "confirmed");

    // A contradictory late callback is rejected.
    let (status, _) = app
        .request(
            "POST",
            "/api/payments/callback",
            None,
            None,
            Some(json!({
                "booking_id": booking,
                "outcome": "failed",
                "provider_ref": "pay_abc123",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn payment_failure_cancels_the_pending_booking() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let start = Utc::now() + Duration::days(3);
    let booking = app
        .seed_booking(Uuid::new_v4(), court, start, start + Duration::hours(1), "pending")
        .await;
    app.seed_payment(booking, 50_000, "pending").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/payments/callback",
            None,
            None,
            Some(json!({
                "booking_id": booking,
                "outcome": "failed",
                "provider_ref": "pay_fail",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking"]["status"], "cancelled");
    assert_eq!(body["data"]["payment"]["status"], "failed");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn cancellation_respects_the_two_hour_window() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let user = Uuid::new_v4();

    // Starting in 90 minutes: inside the window, cannot cancel.
    let soon = Utc::now() + Duration::minutes(90);
    let too_late = app
        .seed_booking(user, court, soon, soon + Duration::hours(1), "confirmed")
        .await;
    app.seed_payment(too_late, 50_000, "succeeded").await;

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/bookings/{too_late}/cancel"),
            Some(user),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.booking_status(too_late).await, "confirmed");

    // Starting in 3 hours: outside the window, cancel succeeds and the
    // captured payment is marked refunded.
    let later = Utc::now() + Duration::hours(3);
    let cancellable = app
        .seed_booking(user, court, later, later + Duration::hours(1), "confirmed")
        .await;
    app.seed_payment(cancellable, 50_000, "succeeded").await;

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/bookings/{cancellable}/cancel"),
            Some(user),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["booking"]["status"], "cancelled");
    assert_eq!(body["data"]["payment"]["status"], "refunded");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn cancellation_rejects_non_owners_and_terminal_bookings() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let owner = Uuid::new_v4();
    let start = Utc::now() + Duration::days(3);
    let booking = app
        .seed_booking(owner, court, start, start + Duration::hours(1), "pending")
        .await;
    app.seed_payment(booking, 50_000, "pending").await;

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/bookings/{booking}/cancel"),
            Some(Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Cancel as the owner, then try again: terminal bookings stay put.
    let (status, _) = app
        .request(
            "POST",
            &format!("/api/bookings/{booking}/cancel"),
            Some(owner),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/bookings/{booking}/cancel"),
            Some(owner),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.booking_status(booking).await, "cancelled");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn completion_sweep_is_idempotent() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let user = Uuid::new_v4();

    // One confirmed booking that ended an hour ago, one still pending
    // with a past end (never confirmed, must not complete), one
    // confirmed in the future.
    let past_start = Utc::now() - Duration::hours(3);
    let expired = app
        .seed_booking(user, court, past_start, past_start + Duration::hours(1), "confirmed")
        .await;
    let stale_pending = app
        .seed_booking(user, court, past_start + Duration::hours(1), past_start + Duration::hours(2), "pending")
        .await;
    let future_start = Utc::now() + Duration::days(2);
    let upcoming = app
        .seed_booking(user, court, future_start, future_start + Duration::hours(1), "confirmed")
        .await;

    let (status, body) = app
        .request("POST", "/api/admin/bookings/sweep", None, None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["completed"].as_u64().unwrap() >= 1);

    assert_eq!(app.booking_status(expired).await, "completed");
    assert_eq!(app.booking_status(upcoming).await, "confirmed");

    // Second run finds nothing new.
    let (status, body) = app
        .request("POST", "/api/admin/bookings/sweep", None, None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completed"], 0);
    assert_eq!(app.booking_status(expired).await, "completed");
    assert_eq!(app.booking_status(stale_pending).await, "pending");
}
