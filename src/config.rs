use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

/// Engine tuning knobs. Built explicitly and passed into
/// [`Scheduler::new`](crate::Scheduler::new); there is no process-wide
/// registry.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// When true, a booking's `end - start` must equal the referenced
    /// service's `duration_minutes`. When the request omits `end_time` it is
    /// always derived from the duration, regardless of this flag.
    pub enforce_service_duration: bool,
    /// Cap on the number of windows accepted in one weekly-schedule replace.
    pub max_windows_per_provider: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enforce_service_duration: true,
            max_windows_per_provider: 64,
        }
    }
}

impl SchedulerConfig {
    pub fn from_env() -> Result<Self> {
        let enforce_service_duration = match env::var("SCHEDULER_ENFORCE_SERVICE_DURATION") {
            Ok(val) => val
                .parse()
                .context("Failed to parse SCHEDULER_ENFORCE_SERVICE_DURATION")?,
            Err(_) => true,
        };

        let max_windows_per_provider = match env::var("SCHEDULER_MAX_WINDOWS_PER_PROVIDER") {
            Ok(val) => val
                .parse()
                .context("Failed to parse SCHEDULER_MAX_WINDOWS_PER_PROVIDER")?,
            Err(_) => 64,
        };

        Ok(Self {
            enforce_service_duration,
            max_windows_per_provider,
        })
    }
}
