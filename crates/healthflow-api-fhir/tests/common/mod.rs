//! Shared helpers for FHIR API integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use healthflow_api_fhir::{proxy_router, sync_router, FhirApiState, ProxyMode};
use healthflow_db::{MemoryResourceStore, ResourceStore};
use healthflow_registry_client::RegistryClient;
use serde_json::Value;
use std::sync::Arc;

/// Build API state over a fresh in-memory store.
///
/// `registry_url` only matters for forward mode and sync tests; CRUD tests
/// in local mode never touch it.
pub fn test_state(registry_url: &str, mode: ProxyMode) -> (FhirApiState, Arc<MemoryResourceStore>) {
    let store = Arc::new(MemoryResourceStore::new());
    let registry = Arc::new(RegistryClient::with_http_client(
        registry_url,
        reqwest::Client::new(),
    ));
    let state = FhirApiState::new(store.clone() as Arc<dyn ResourceStore>, registry, mode);
    (state, store)
}

/// The full application router as the binary mounts it.
pub fn app(state: FhirApiState) -> Router {
    Router::new()
        .nest("/proxy", proxy_router(state.clone()))
        .nest("/sync", sync_router(state))
}

/// A JSON request with the given method, uri and body.
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A bodyless request with the given method and uri.
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
