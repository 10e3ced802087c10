//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use courtbook_core::config::worker::WorkerConfig;
use courtbook_core::error::AppError;
use courtbook_service::lifecycle::LifecycleService;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Lifecycle service driving the completion sweep
    lifecycle: Arc<LifecycleService>,
    /// Worker configuration
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(
        lifecycle: Arc<LifecycleService>,
        config: WorkerConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            lifecycle,
            config,
        })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_completion_sweep().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Completion sweep — schedule from configuration
    async fn register_completion_sweep(&self) -> Result<(), AppError> {
        let lifecycle = Arc::clone(&self.lifecycle);
        let job = CronJob::new_async(
            self.config.completion_sweep_cron.as_str(),
            move |_uuid, _lock| {
                let lifecycle = Arc::clone(&lifecycle);
                Box::pin(async move {
                    tracing::debug!("Running completion sweep");
                    match lifecycle.complete_expired(Utc::now()).await {
                        Ok(count) if count > 0 => {
                            tracing::info!(count, "Completion sweep transitioned bookings");
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::error!("Completion sweep failed: {}", e);
                        }
                    }
                })
            },
        )
        .map_err(|e| {
            AppError::internal(format!("Failed to create completion_sweep schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add completion_sweep schedule: {}", e))
        })?;

        tracing::info!(
            cron = %self.config.completion_sweep_cron,
            "Registered: completion_sweep"
        );
        Ok(())
    }
}
