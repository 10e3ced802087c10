//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Settings for the scheduled maintenance worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the in-process scheduler runs at all. Disable when an
    /// external scheduler drives the sweep endpoint instead.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Cron expression (with seconds field) for the completion sweep.
    #[serde(default = "default_sweep_cron")]
    pub completion_sweep_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            completion_sweep_cron: default_sweep_cron(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_sweep_cron() -> String {
    "0 */5 * * * *".to_string()
}
