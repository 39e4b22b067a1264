//! Per-kind collection sync against the upstream registry.

use crate::engine::UpsertEngine;
use crate::error::SyncError;
use healthflow_core::ResourceKind;
use healthflow_db::ResourceStore;
use healthflow_registry_client::RegistryClient;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Outcome of one kind's sync pass.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// The resource kind that was synced.
    pub kind: ResourceKind,
    /// Number of resources reconciled into the store.
    pub reconciled: usize,
}

/// Orchestrates collection fetches and per-entry reconciliation.
#[derive(Clone)]
pub struct SyncService {
    client: Arc<RegistryClient>,
    engine: UpsertEngine,
}

impl SyncService {
    /// Create a sync service over a registry client and a store.
    #[must_use]
    pub fn new(client: Arc<RegistryClient>, store: Arc<dyn ResourceStore>) -> Self {
        Self {
            client,
            engine: UpsertEngine::new(store),
        }
    }

    /// The shared upsert engine (also used by the proxy CRUD surface).
    #[must_use]
    pub fn engine(&self) -> &UpsertEngine {
        &self.engine
    }

    /// Sync every registry-synced kind, sequentially.
    ///
    /// Failures are not swallowed: the first failing kind aborts the
    /// remaining kinds. Only the scheduler isolates a failed cycle.
    pub async fn sync_all(&self) -> Result<Vec<SyncReport>, SyncError> {
        let mut reports = Vec::with_capacity(ResourceKind::SYNCED.len());
        for kind in ResourceKind::SYNCED {
            reports.push(self.sync_type(kind).await?);
        }
        Ok(reports)
    }

    /// Fetch one kind's collection and reconcile each entry in order.
    ///
    /// There is no per-entry isolation: a malformed entry aborts the rest
    /// of the batch, but entries already reconciled stay committed.
    pub async fn sync_type(&self, kind: ResourceKind) -> Result<SyncReport, SyncError> {
        let resources = self.client.fetch_bundle(kind).await?;

        let mut reconciled = 0;
        for (index, resource) in resources.into_iter().enumerate() {
            let fhir_id = resource
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| SyncError::MalformedEntry {
                    kind,
                    index,
                    reason: "resource is missing a string `id`".to_string(),
                })?;
            self.engine.reconcile(kind, &fhir_id, resource).await?;
            reconciled += 1;
        }

        info!(kind = %kind, reconciled, "Resource sync completed");
        Ok(SyncReport { kind, reconciled })
    }
}
