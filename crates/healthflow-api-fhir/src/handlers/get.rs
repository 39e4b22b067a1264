//! Read endpoints: single resource lookup and collection listing.

use super::parse_kind;
use crate::error::ApiFhirError;
use crate::models::GetResourceQuery;
use crate::router::{FhirApiState, ProxyMode};
use axum::extract::{Path, Query, State};
use axum::Json;
use healthflow_core::ResourceKind;
use serde_json::Value;

/// Get resources by kind, optionally narrowed to a single external id.
///
/// Without an id, Patients list only `active = true` rows, most recently
/// created first; other kinds return the unfiltered collection.
#[utoipa::path(
    get,
    path = "/proxy/{kind}",
    params(
        ("kind" = String, Path, description = "FHIR resource kind"),
        GetResourceQuery,
    ),
    responses(
        (status = 200, description = "Resource or resource list"),
        (status = 400, description = "Unsupported resource kind"),
        (status = 404, description = "Resource not found"),
        (status = 502, description = "Upstream registry unavailable (forward mode)"),
    ),
    tag = "FHIR Proxy"
)]
pub async fn get_resources(
    State(state): State<FhirApiState>,
    Path(kind): Path<String>,
    Query(query): Query<GetResourceQuery>,
) -> Result<Json<Value>, ApiFhirError> {
    let kind = parse_kind(&kind)?;

    if state.mode == ProxyMode::Forward {
        let body = state.registry.get_remote(kind, query.id.as_deref()).await?;
        return Ok(Json(body));
    }

    match query.id {
        Some(id) => {
            let record = state
                .store
                .find_by_fhir_id(kind, &id)
                .await?
                .ok_or(ApiFhirError::NotFound)?;
            Ok(Json(record.resource_data))
        }
        None => {
            let records = if kind == ResourceKind::Patient {
                state.store.list_active_patients().await?
            } else {
                state.store.list(kind).await?
            };
            let payloads: Vec<Value> = records.into_iter().map(|r| r.resource_data).collect();
            Ok(Json(Value::Array(payloads)))
        }
    }
}
