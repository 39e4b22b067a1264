//! Periodic sync worker.
//!
//! Runs [`SyncService::sync_all`] on a fixed interval. A failed cycle is
//! logged and swallowed so one bad cycle never stops future cycles; nothing
//! is retried before the next tick.

use crate::service::SyncService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct SyncWorkerConfig {
    /// Time between sync cycles.
    pub interval: Duration,
}

impl Default for SyncWorkerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(900),
        }
    }
}

/// Background worker driving scheduled registry syncs.
pub struct SyncWorker {
    service: Arc<SyncService>,
    config: SyncWorkerConfig,
    shutdown: Arc<AtomicBool>,
}

impl SyncWorker {
    /// Create a new worker.
    #[must_use]
    pub fn new(service: Arc<SyncService>, config: SyncWorkerConfig) -> Self {
        Self {
            service,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle used to request a graceful stop; checked on every tick.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Run the worker loop until shutdown is requested.
    ///
    /// The first cycle fires one full interval after startup. A cycle that
    /// overruns its interval delays the next tick instead of bursting.
    pub async fn run(&self) {
        info!(
            interval_secs = self.config.interval.as_secs(),
            "Starting scheduled sync worker"
        );

        let mut ticker = interval_at(Instant::now() + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if self.shutdown.load(Ordering::Relaxed) {
                info!("Sync worker shutdown requested, stopping");
                break;
            }

            info!("Starting scheduled registry synchronization");
            match self.service.sync_all().await {
                Ok(reports) => {
                    for report in &reports {
                        info!(kind = %report.kind, reconciled = report.reconciled, "Sync cycle report");
                    }
                    info!("Scheduled registry synchronization completed");
                }
                Err(e) => {
                    // Recovery is waiting for the next interval.
                    error!(error = %e, "Scheduled registry synchronization failed");
                }
            }
        }
    }
}
