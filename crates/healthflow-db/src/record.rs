//! The stored representation of a FHIR resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// A locally persisted FHIR resource.
///
/// One struct covers the per-kind tables: `patient_fhir_id` is populated
/// only for clinical kinds (Encounter, Observation, Condition), and the
/// `gender` / `birth_date` / `active` projections only for Patients. The
/// raw payload is kept verbatim in `resource_data` for round-trip fidelity.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FhirResource {
    /// System-generated local identity. Immutable once assigned, never reused.
    pub id: Uuid,
    /// External identifier assigned by the origin registry; unique per kind.
    pub fhir_id: String,
    /// The full resource document as received.
    pub resource_data: JsonValue,
    /// External id of the referenced Patient, parsed from `subject.reference`.
    /// Syntactic extraction only; existence against Patient rows is not
    /// enforced.
    pub patient_fhir_id: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub active: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FhirResource {
    /// Build a fresh record for first-time persistence.
    ///
    /// Timestamps are provisional; the store stamps authoritative values on
    /// insert and returns the stored row.
    #[must_use]
    pub fn new(fhir_id: impl Into<String>, resource_data: JsonValue) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            fhir_id: fhir_id.into(),
            resource_data,
            patient_fhir_id: None,
            gender: None,
            birth_date: None,
            active: None,
            created_at: now,
            updated_at: now,
        }
    }
}
