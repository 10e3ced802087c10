//! Reservation transaction tests: conflicts, idempotency, races,
//! operating hours, venue approval, and the price snapshot.

use chrono::NaiveDate;
use http::StatusCode;
use tokio::task::JoinSet;
use uuid::Uuid;

use courtbook_core::error::ErrorKind;
use courtbook_core::types::{CourtId, UserId};
use courtbook_service::reservation::ReserveCommand;

use crate::helpers::{TestApp, future_date, reserve_body};

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn reserve_conflicts_on_overlap_and_allows_adjacent() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let date = future_date();

    // Request A books [10,12).
    let (status, body) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 10, 2)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["payment"]["amount"], 100_000);
    assert_eq!(body["data"]["booking"]["status"], "pending");

    // Request B books [11,13) concurrently-overlapping: 409.
    let (status, body) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 11, 2)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    // Request C books the adjacent [12,14): allowed, half-open semantics.
    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 12, 2)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn reserve_is_idempotent_under_the_same_key() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let date = future_date();
    let user = Uuid::new_v4();
    let key = Uuid::new_v4().to_string();

    let (status, first) = app
        .request(
            "POST",
            "/api/bookings",
            Some(user),
            Some(&key),
            Some(reserve_body(court, &date, 14, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = app
        .request(
            "POST",
            "/api/bookings",
            Some(user),
            Some(&key),
            Some(reserve_body(court, &date, 14, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["booking"]["id"], second["data"]["booking"]["id"]);

    let booking_id: Uuid = first["data"]["booking"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(app.payment_count(booking_id).await, 1);

    // Same key with a different slot is a logic error, not a replay.
    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            Some(user),
            Some(&key),
            Some(reserve_body(court, &date, 15, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn concurrent_reservations_admit_exactly_one_winner() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let date: NaiveDate = future_date().parse().unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let service = app.state.reservation_service.clone();
        tasks.spawn(async move {
            service
                .reserve(
                    UserId::new(),
                    ReserveCommand {
                        court_id: CourtId::from_uuid(court),
                        date,
                        start_hour: 9,
                        duration_hours: 2,
                        notes: None,
                        idempotency_key: Some(Uuid::new_v4().to_string()),
                    },
                )
                .await
        });
    }

    let mut successes = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.expect("task panicked") {
            Ok(_) => successes += 1,
            Err(err) => {
                assert!(
                    matches!(err.kind, ErrorKind::Conflict | ErrorKind::Timeout),
                    "unexpected error kind: {}",
                    err
                );
                conflicts += 1;
            }
        }
    }

    assert_eq!(successes, 1, "exactly one concurrent reservation may win");
    assert_eq!(conflicts, 7);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn reserve_enforces_operating_hours() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let date = future_date();

    // The closing hour itself is not bookable.
    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 22, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Neither is the hour before opening.
    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 5, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The last in-hours slot is.
    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 21, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn reserve_rejects_unapproved_venue_and_unknown_court() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(false).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let date = future_date();

    let (status, body) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 10, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(Uuid::new_v4(), &date, 10, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn payment_amount_is_a_snapshot_of_the_booking_time_price() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;
    let date = future_date();

    let (status, body) = app
        .request(
            "POST",
            "/api/bookings",
            Some(Uuid::new_v4()),
            None,
            Some(reserve_body(court, &date, 16, 2)),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let booking_id: Uuid = body["data"]["booking"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    sqlx::query("UPDATE courts SET price_per_hour = $1 WHERE id = $2")
        .bind(99_999i64)
        .bind(court)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let (_, amount) = app.payment_of(booking_id).await;
    assert_eq!(amount, 100_000, "price changes must not rewrite payments");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn reserve_requires_a_gateway_identity() {
    let app = TestApp::new().await;
    let venue = app.seed_venue(true).await;
    let court = app.seed_court(venue, 6, 22, 50_000).await;

    let (status, _) = app
        .request(
            "POST",
            "/api/bookings",
            None,
            None,
            Some(reserve_body(court, &future_date(), 10, 1)),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
