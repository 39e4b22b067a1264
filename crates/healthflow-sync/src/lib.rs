//! Registry synchronization for the HealthFlow FHIR proxy.
//!
//! Three layers, innermost first: [`UpsertEngine`] reconciles one payload
//! into the store, [`SyncService`] orchestrates per-kind collection syncs,
//! and [`SyncWorker`] drives the orchestrator on a fixed interval while
//! isolating cycle failures from future cycles.

pub mod engine;
pub mod error;
pub mod scheduler;
pub mod service;

pub use engine::UpsertEngine;
pub use error::SyncError;
pub use scheduler::{SyncWorker, SyncWorkerConfig};
pub use service::{SyncReport, SyncService};
