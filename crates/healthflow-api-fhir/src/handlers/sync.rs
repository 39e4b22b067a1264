//! Sync trigger and inspection endpoints.

use super::parse_kind;
use crate::error::ApiFhirError;
use crate::models::SyncResponse;
use crate::router::FhirApiState;
use axum::extract::{Path, State};
use axum::Json;
use healthflow_core::ResourceKind;
use healthflow_db::FhirResource;

/// Trigger a full registry sync, one kind at a time.
///
/// Runs inline; a failure in one kind aborts the remaining kinds and is
/// surfaced to the caller.
#[utoipa::path(
    post,
    path = "/sync",
    responses(
        (status = 200, description = "Synchronization completed", body = SyncResponse),
        (status = 400, description = "A bundle entry was malformed"),
        (status = 502, description = "Upstream registry unavailable"),
    ),
    tag = "FHIR Sync"
)]
pub async fn trigger_sync(
    State(state): State<FhirApiState>,
) -> Result<Json<SyncResponse>, ApiFhirError> {
    tracing::info!("Full registry sync triggered via API");
    let reports = state.sync.sync_all().await?;
    Ok(Json(SyncResponse::success(reports)))
}

/// Trigger a sync for a single resource kind.
#[utoipa::path(
    post,
    path = "/sync/{kind}",
    params(("kind" = String, Path, description = "FHIR resource kind")),
    responses(
        (status = 200, description = "Synchronization completed", body = SyncResponse),
        (status = 400, description = "Unsupported kind or malformed entry"),
        (status = 502, description = "Upstream registry unavailable"),
    ),
    tag = "FHIR Sync"
)]
pub async fn trigger_sync_type(
    State(state): State<FhirApiState>,
    Path(kind): Path<String>,
) -> Result<Json<SyncResponse>, ApiFhirError> {
    let kind = parse_kind(&kind)?;
    if !ResourceKind::SYNCED.contains(&kind) {
        return Err(ApiFhirError::UnsupportedOperation {
            kind,
            operation: "Sync",
        });
    }

    tracing::info!(kind = %kind, "Single-kind registry sync triggered via API");
    let report = state.sync.sync_type(kind).await?;
    Ok(Json(SyncResponse::success(vec![report])))
}

/// List every persisted Patient, active or not.
#[utoipa::path(
    get,
    path = "/sync/patients",
    responses((status = 200, description = "All persisted Patient records")),
    tag = "FHIR Sync"
)]
pub async fn synced_patients(
    State(state): State<FhirApiState>,
) -> Result<Json<Vec<FhirResource>>, ApiFhirError> {
    let patients = state.store.list(ResourceKind::Patient).await?;
    Ok(Json(patients))
}
