//! The narrow store seam between the sync/API layers and a backing store.

pub mod memory;
pub mod postgres;

use crate::error::DbError;
use crate::record::FhirResource;
use healthflow_core::ResourceKind;

/// Storage operations over the per-kind resource tables.
///
/// The upsert flow is deliberately split into `insert` and `update` rather
/// than a single save: the caller performs the lookup and picks the arm, so
/// the lookup-then-write sequence carries no transactional isolation and a
/// concurrent create/create on the same `(kind, fhir_id)` surfaces as
/// [`DbError::Conflict`] from the loser's `insert`.
#[async_trait::async_trait]
pub trait ResourceStore: Send + Sync {
    /// Look up a record by its external identifier.
    async fn find_by_fhir_id(
        &self,
        kind: ResourceKind,
        fhir_id: &str,
    ) -> Result<Option<FhirResource>, DbError>;

    /// All records of a kind, in no particular order.
    async fn list(&self, kind: ResourceKind) -> Result<Vec<FhirResource>, DbError>;

    /// Active Patients, most recently created first.
    async fn list_active_patients(&self) -> Result<Vec<FhirResource>, DbError>;

    /// Persist a new record. Returns the stored row with authoritative
    /// timestamps. Fails with [`DbError::Conflict`] if the `fhir_id` is
    /// already taken.
    async fn insert(
        &self,
        kind: ResourceKind,
        record: FhirResource,
    ) -> Result<FhirResource, DbError>;

    /// Overwrite an existing record (keyed by its local id) and advance
    /// `updated_at`. Fails with [`DbError::NotFound`] if the row vanished.
    async fn update(
        &self,
        kind: ResourceKind,
        record: FhirResource,
    ) -> Result<FhirResource, DbError>;

    /// Remove a record by its external identifier. Returns `false` when no
    /// record matched.
    async fn delete(&self, kind: ResourceKind, fhir_id: &str) -> Result<bool, DbError>;
}
