//! Create-or-update reconciliation of a single resource payload.

use healthflow_core::{extract_subject_patient_id, PatientFields, ResourceKind};
use healthflow_db::{DbError, FhirResource, ResourceStore};
use serde_json::Value;
use std::sync::Arc;

/// Reconciles one incoming payload into the resource store.
///
/// The lookup-then-write sequence is not transactionally isolated; two
/// concurrent reconciliations of the same `(kind, fhir_id)` may race, and
/// the store's uniqueness constraint is the final arbiter.
#[derive(Clone)]
pub struct UpsertEngine {
    store: Arc<dyn ResourceStore>,
}

impl UpsertEngine {
    /// Create an engine over a store.
    #[must_use]
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    /// Reconcile a payload arriving from the upstream registry.
    ///
    /// Clinical kinds re-parse `subject.reference` and store the referenced
    /// Patient id, resetting it to null on malformed input; extraction never
    /// fails. Patient payloads re-extract the projected fields.
    pub async fn reconcile(
        &self,
        kind: ResourceKind,
        fhir_id: &str,
        payload: Value,
    ) -> Result<FhirResource, DbError> {
        self.upsert(kind, fhir_id, payload, true).await
    }

    /// Reconcile a payload arriving through the proxy CRUD surface.
    ///
    /// Identical create-or-update semantics (and race profile) to
    /// [`reconcile`](Self::reconcile), except that clinical kinds do NOT
    /// derive `patient_fhir_id` on this path; only registry sync links
    /// clinical resources to Patients.
    pub async fn upsert_unlinked(
        &self,
        kind: ResourceKind,
        fhir_id: &str,
        payload: Value,
    ) -> Result<FhirResource, DbError> {
        self.upsert(kind, fhir_id, payload, false).await
    }

    async fn upsert(
        &self,
        kind: ResourceKind,
        fhir_id: &str,
        payload: Value,
        derive_reference: bool,
    ) -> Result<FhirResource, DbError> {
        let existing = self.store.find_by_fhir_id(kind, fhir_id).await?;
        let derive_reference = derive_reference && kind.has_patient_reference();

        match existing {
            Some(mut record) => {
                if kind == ResourceKind::Patient {
                    let fields = PatientFields::from_payload(&payload);
                    record.gender = fields.gender;
                    record.birth_date = fields.birth_date;
                    if let Some(active) = fields.active {
                        record.active = Some(active);
                    }
                }
                if derive_reference {
                    record.patient_fhir_id = extract_subject_patient_id(&payload);
                }
                record.resource_data = payload;
                self.store.update(kind, record).await
            }
            None => {
                let mut record = FhirResource::new(fhir_id, Value::Null);
                if kind == ResourceKind::Patient {
                    let fields = PatientFields::from_payload(&payload);
                    record.gender = fields.gender;
                    record.birth_date = fields.birth_date;
                    record.active = Some(fields.active.unwrap_or(true));
                }
                if derive_reference {
                    record.patient_fhir_id = extract_subject_patient_id(&payload);
                }
                record.resource_data = payload;
                self.store.insert(kind, record).await
            }
        }
    }
}
