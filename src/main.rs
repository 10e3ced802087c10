//! CourtBook Server — sports-facility booking reservation core
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use courtbook_core::config::AppConfig;
use courtbook_core::error::AppError;
use courtbook_core::traits::{LoggingPaymentGateway, PaymentGateway};

#[tokio::main]
async fn main() {
    let env = std::env::var("COURTBOOK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CourtBook v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = courtbook_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    courtbook_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Wire repositories and services ───────────────────
    let gateway: Arc<dyn PaymentGateway> = Arc::new(LoggingPaymentGateway);
    let state = courtbook_api::AppState::new(config.clone(), db_pool, gateway);

    // ── Step 3: Start the background scheduler ───────────────────
    let mut scheduler = None;
    if config.worker.enabled {
        let cron = courtbook_worker::CronScheduler::new(
            Arc::clone(&state.lifecycle_service),
            config.worker.clone(),
        )
        .await?;
        cron.register_default_tasks().await?;
        cron.start().await?;
        scheduler = Some(cron);
    } else {
        tracing::info!("In-process scheduler disabled; sweeps run via the admin endpoint");
    }

    // ── Step 4: Serve HTTP until shutdown ────────────────────────
    let app = courtbook_api::build_app(state);
    let result = courtbook_api::app::serve(app, &config.server).await;

    if let Some(mut cron) = scheduler.take() {
        cron.shutdown().await?;
    }

    result
}
