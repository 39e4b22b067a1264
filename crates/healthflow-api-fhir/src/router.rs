//! Router configuration for the FHIR proxy and sync endpoints.
//!
//! - `GET    /proxy/{kind}?id={fhir_id}` - Get one resource or list a kind
//! - `POST   /proxy/{kind}`              - Create (upsert) a resource
//! - `PUT    /proxy/{kind}/{id}`         - Update (Patient/Encounter only)
//! - `DELETE /proxy/{kind}/{id}`         - Delete (Patient/Encounter only)
//! - `POST   /sync`                      - Trigger a full registry sync
//! - `POST   /sync/{kind}`               - Trigger a single-kind sync
//! - `GET    /sync/patients`             - List all persisted Patients

use crate::handlers::{
    create_resource, delete_resource, get_resources, synced_patients, trigger_sync,
    trigger_sync_type, update_resource,
};
use axum::routing::{get, post};
use axum::Router;
use healthflow_db::ResourceStore;
use healthflow_registry_client::RegistryClient;
use healthflow_sync::SyncService;
use std::str::FromStr;
use std::sync::Arc;

/// How the proxy CRUD surface is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyMode {
    /// Persist locally; the store is the source of truth and the scheduler
    /// reconciles it against the registry.
    #[default]
    Local,
    /// Transparently forward every proxy call to the registry with no local
    /// state.
    Forward,
}

impl FromStr for ProxyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "forward" => Ok(Self::Forward),
            other => Err(format!("Unknown proxy mode: {other}")),
        }
    }
}

/// Shared state for the FHIR API routes.
#[derive(Clone)]
pub struct FhirApiState {
    /// The resource store.
    pub store: Arc<dyn ResourceStore>,
    /// Client for the upstream registry (forward mode and sync).
    pub registry: Arc<RegistryClient>,
    /// Sync orchestrator; also owns the upsert engine shared with the
    /// proxy create path.
    pub sync: Arc<SyncService>,
    /// Serving mode for the proxy CRUD surface.
    pub mode: ProxyMode,
}

impl FhirApiState {
    /// Wire up API state from its collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn ResourceStore>,
        registry: Arc<RegistryClient>,
        mode: ProxyMode,
    ) -> Self {
        let sync = Arc::new(SyncService::new(registry.clone(), store.clone()));
        Self {
            store,
            registry,
            sync,
            mode,
        }
    }
}

/// Create the proxy CRUD router (mounted under `/proxy`).
pub fn proxy_router(state: FhirApiState) -> Router {
    Router::new()
        .route("/:kind", get(get_resources).post(create_resource))
        .route(
            "/:kind/:id",
            axum::routing::put(update_resource).delete(delete_resource),
        )
        .with_state(state)
}

/// Create the sync router (mounted under `/sync`).
pub fn sync_router(state: FhirApiState) -> Router {
    Router::new()
        .route("/", post(trigger_sync))
        // Register /patients before /:kind to prevent path capture.
        .route("/patients", get(synced_patients))
        .route("/:kind", post(trigger_sync_type))
        .with_state(state)
}
