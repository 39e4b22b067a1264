//! Postgres-backed resource store.
//!
//! One table per resource kind. Queries are built per kind because the
//! column sets differ: Patients carry the projected scalar fields, clinical
//! kinds carry `patient_fhir_id`, Bundles carry only the shared columns.
//! Absent columns are selected as typed NULLs so every kind decodes into
//! the same [`FhirResource`] row shape.

use crate::error::DbError;
use crate::record::FhirResource;
use crate::store::ResourceStore;
use healthflow_core::ResourceKind;
use sqlx::PgPool;

/// Production [`ResourceStore`] over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

/// Table backing each resource kind.
fn table(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Patient => "fhir_patients",
        ResourceKind::Encounter => "fhir_encounters",
        ResourceKind::Observation => "fhir_observations",
        ResourceKind::Condition => "fhir_conditions",
        ResourceKind::Bundle => "fhir_bundles",
    }
}

/// SELECT column list normalizing every kind to the full row shape.
fn columns(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Patient => {
            "id, fhir_id, resource_data, NULL::text AS patient_fhir_id, \
             gender, birth_date, active, created_at, updated_at"
        }
        ResourceKind::Encounter | ResourceKind::Observation | ResourceKind::Condition => {
            "id, fhir_id, resource_data, patient_fhir_id, NULL::text AS gender, \
             NULL::text AS birth_date, NULL::boolean AS active, created_at, updated_at"
        }
        ResourceKind::Bundle => {
            "id, fhir_id, resource_data, NULL::text AS patient_fhir_id, NULL::text AS gender, \
             NULL::text AS birth_date, NULL::boolean AS active, created_at, updated_at"
        }
    }
}

impl PgResourceStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for migrations and health checks.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl ResourceStore for PgResourceStore {
    async fn find_by_fhir_id(
        &self,
        kind: ResourceKind,
        fhir_id: &str,
    ) -> Result<Option<FhirResource>, DbError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE fhir_id = $1",
            columns(kind),
            table(kind)
        );
        sqlx::query_as(&sql)
            .bind(fhir_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::QueryFailed)
    }

    async fn list(&self, kind: ResourceKind) -> Result<Vec<FhirResource>, DbError> {
        let sql = format!("SELECT {} FROM {}", columns(kind), table(kind));
        sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::QueryFailed)
    }

    async fn list_active_patients(&self) -> Result<Vec<FhirResource>, DbError> {
        let sql = format!(
            "SELECT {} FROM fhir_patients WHERE active = TRUE ORDER BY created_at DESC",
            columns(ResourceKind::Patient)
        );
        sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::QueryFailed)
    }

    async fn insert(
        &self,
        kind: ResourceKind,
        record: FhirResource,
    ) -> Result<FhirResource, DbError> {
        let row = match kind {
            ResourceKind::Patient => {
                let sql = format!(
                    "INSERT INTO fhir_patients (id, fhir_id, resource_data, gender, birth_date, active) \
                     VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
                    columns(kind)
                );
                sqlx::query_as(&sql)
                    .bind(record.id)
                    .bind(&record.fhir_id)
                    .bind(&record.resource_data)
                    .bind(&record.gender)
                    .bind(&record.birth_date)
                    .bind(record.active.unwrap_or(true))
                    .fetch_one(&self.pool)
                    .await
            }
            ResourceKind::Encounter | ResourceKind::Observation | ResourceKind::Condition => {
                let sql = format!(
                    "INSERT INTO {} (id, fhir_id, resource_data, patient_fhir_id) \
                     VALUES ($1, $2, $3, $4) RETURNING {}",
                    table(kind),
                    columns(kind)
                );
                sqlx::query_as(&sql)
                    .bind(record.id)
                    .bind(&record.fhir_id)
                    .bind(&record.resource_data)
                    .bind(&record.patient_fhir_id)
                    .fetch_one(&self.pool)
                    .await
            }
            ResourceKind::Bundle => {
                let sql = format!(
                    "INSERT INTO fhir_bundles (id, fhir_id, resource_data) \
                     VALUES ($1, $2, $3) RETURNING {}",
                    columns(kind)
                );
                sqlx::query_as(&sql)
                    .bind(record.id)
                    .bind(&record.fhir_id)
                    .bind(&record.resource_data)
                    .fetch_one(&self.pool)
                    .await
            }
        };
        row.map_err(|e| DbError::from_insert(e, &record.fhir_id))
    }

    async fn update(
        &self,
        kind: ResourceKind,
        record: FhirResource,
    ) -> Result<FhirResource, DbError> {
        let row = match kind {
            ResourceKind::Patient => {
                let sql = format!(
                    "UPDATE fhir_patients SET resource_data = $2, gender = $3, birth_date = $4, \
                     active = $5, updated_at = now() WHERE id = $1 RETURNING {}",
                    columns(kind)
                );
                sqlx::query_as(&sql)
                    .bind(record.id)
                    .bind(&record.resource_data)
                    .bind(&record.gender)
                    .bind(&record.birth_date)
                    .bind(record.active.unwrap_or(true))
                    .fetch_optional(&self.pool)
                    .await
            }
            ResourceKind::Encounter | ResourceKind::Observation | ResourceKind::Condition => {
                let sql = format!(
                    "UPDATE {} SET resource_data = $2, patient_fhir_id = $3, updated_at = now() \
                     WHERE id = $1 RETURNING {}",
                    table(kind),
                    columns(kind)
                );
                sqlx::query_as(&sql)
                    .bind(record.id)
                    .bind(&record.resource_data)
                    .bind(&record.patient_fhir_id)
                    .fetch_optional(&self.pool)
                    .await
            }
            ResourceKind::Bundle => {
                let sql = format!(
                    "UPDATE fhir_bundles SET resource_data = $2, updated_at = now() \
                     WHERE id = $1 RETURNING {}",
                    columns(kind)
                );
                sqlx::query_as(&sql)
                    .bind(record.id)
                    .bind(&record.resource_data)
                    .fetch_optional(&self.pool)
                    .await
            }
        };
        row.map_err(DbError::QueryFailed)?
            .ok_or_else(|| DbError::NotFound(format!("{}/{}", kind, record.fhir_id)))
    }

    async fn delete(&self, kind: ResourceKind, fhir_id: &str) -> Result<bool, DbError> {
        let sql = format!("DELETE FROM {} WHERE fhir_id = $1", table(kind));
        let result = sqlx::query(&sql)
            .bind(fhir_id)
            .execute(&self.pool)
            .await
            .map_err(DbError::QueryFailed)?;
        Ok(result.rows_affected() > 0)
    }
}

// Integration tests against a live Postgres live in tests/pg_store_tests.rs
// behind the `integration` feature.
