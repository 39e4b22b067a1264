//! Resource store for the HealthFlow FHIR proxy.
//!
//! One logical table per resource kind, keyed by the external `fhir_id`.
//! The [`ResourceStore`] trait is the narrow seam between the sync/API
//! layers and a concrete backing store; [`PgResourceStore`] is the
//! production Postgres implementation and [`MemoryResourceStore`] backs
//! tests and embedded use.

pub mod error;
pub mod migrations;
pub mod record;
pub mod store;

pub use error::DbError;
pub use migrations::run_migrations;
pub use record::FhirResource;
pub use store::memory::MemoryResourceStore;
pub use store::postgres::PgResourceStore;
pub use store::ResourceStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Open a Postgres connection pool with the service's standard settings.
pub async fn connect(database_url: &str) -> Result<PgPool, DbError> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(DbError::ConnectionFailed)
}
