//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use courtbook_core::config::AppConfig;
use courtbook_core::traits::PaymentGateway;

use courtbook_database::repositories::booking::BookingRepository;
use courtbook_database::repositories::court::CourtRepository;
use courtbook_database::repositories::payment::PaymentRepository;
use courtbook_database::repositories::venue::VenueRepository;

use courtbook_service::availability::AvailabilityService;
use courtbook_service::lifecycle::LifecycleService;
use courtbook_service::reservation::ReservationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    // ── Repositories ─────────────────────────────────────────
    /// Venue repository
    pub venue_repo: Arc<VenueRepository>,
    /// Court repository
    pub court_repo: Arc<CourtRepository>,
    /// Booking repository
    pub booking_repo: Arc<BookingRepository>,
    /// Payment repository
    pub payment_repo: Arc<PaymentRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Availability grid service
    pub availability_service: Arc<AvailabilityService>,
    /// Reservation transaction service
    pub reservation_service: Arc<ReservationService>,
    /// Booking lifecycle service
    pub lifecycle_service: Arc<LifecycleService>,
}

impl AppState {
    /// Wire repositories and services over the given pool.
    pub fn new(config: AppConfig, db_pool: PgPool, gateway: Arc<dyn PaymentGateway>) -> Self {
        let venue_repo = Arc::new(VenueRepository::new(db_pool.clone()));
        let court_repo = Arc::new(CourtRepository::new(db_pool.clone()));
        let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));
        let payment_repo = Arc::new(PaymentRepository::new(db_pool.clone()));

        let availability_service = Arc::new(AvailabilityService::new(
            Arc::clone(&court_repo),
            Arc::clone(&booking_repo),
        ));
        let reservation_service = Arc::new(ReservationService::new(
            db_pool.clone(),
            config.booking.clone(),
        ));
        let lifecycle_service = Arc::new(LifecycleService::new(
            db_pool.clone(),
            Arc::clone(&booking_repo),
            gateway,
            config.booking.clone(),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            venue_repo,
            court_repo,
            booking_repo,
            payment_repo,
            availability_service,
            reservation_service,
            lifecycle_service,
        }
    }
}
