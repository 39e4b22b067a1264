//! In-memory resource store.
//!
//! Backs unit and API tests, and embedded deployments that do not need
//! durability. Mirrors the Postgres store's semantics exactly: uniqueness
//! on `(kind, fhir_id)`, authoritative timestamps stamped on write, and
//! `active` defaulting to true for Patients on insert.

use crate::error::DbError;
use crate::record::FhirResource;
use crate::store::ResourceStore;
use chrono::Utc;
use healthflow_core::ResourceKind;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A [`ResourceStore`] holding everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    tables: RwLock<HashMap<ResourceKind, HashMap<String, FhirResource>>>,
}

impl MemoryResourceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn find_by_fhir_id(
        &self,
        kind: ResourceKind,
        fhir_id: &str,
    ) -> Result<Option<FhirResource>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&kind).and_then(|t| t.get(fhir_id)).cloned())
    }

    async fn list(&self, kind: ResourceKind) -> Result<Vec<FhirResource>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&kind)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn list_active_patients(&self) -> Result<Vec<FhirResource>, DbError> {
        let tables = self.tables.read().await;
        let mut patients: Vec<FhirResource> = tables
            .get(&ResourceKind::Patient)
            .map(|t| {
                t.values()
                    .filter(|r| r.active == Some(true))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        patients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(patients)
    }

    async fn insert(
        &self,
        kind: ResourceKind,
        mut record: FhirResource,
    ) -> Result<FhirResource, DbError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(kind).or_default();
        if table.contains_key(&record.fhir_id) {
            return Err(DbError::Conflict(record.fhir_id));
        }
        let now = Utc::now();
        record.created_at = now;
        record.updated_at = now;
        if kind == ResourceKind::Patient {
            record.active = Some(record.active.unwrap_or(true));
        }
        table.insert(record.fhir_id.clone(), record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        mut record: FhirResource,
    ) -> Result<FhirResource, DbError> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(kind).or_default();
        let created_at = match table.get(&record.fhir_id) {
            Some(existing) if existing.id == record.id => existing.created_at,
            _ => return Err(DbError::NotFound(format!("{}/{}", kind, record.fhir_id))),
        };
        record.created_at = created_at;
        record.updated_at = Utc::now();
        if kind == ResourceKind::Patient {
            record.active = Some(record.active.unwrap_or(true));
        }
        table.insert(record.fhir_id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, kind: ResourceKind, fhir_id: &str) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .get_mut(&kind)
            .and_then(|t| t.remove(fhir_id))
            .is_some())
    }
}
