//! Update endpoint: PUT /proxy/{kind}/{id}.

use super::{parse_kind, supports_mutation};
use crate::error::ApiFhirError;
use crate::router::{FhirApiState, ProxyMode};
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

/// Update an existing resource.
///
/// Only Patient and Encounter support local updates; other kinds are
/// rejected. In forward mode the call is passed through unrestricted.
#[utoipa::path(
    put,
    path = "/proxy/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "FHIR resource kind"),
        ("id" = String, Path, description = "External resource id"),
    ),
    responses(
        (status = 200, description = "Resource updated"),
        (status = 400, description = "Unsupported kind or operation"),
        (status = 404, description = "Resource not found"),
        (status = 502, description = "Upstream registry unavailable (forward mode)"),
    ),
    tag = "FHIR Proxy"
)]
pub async fn update_resource(
    State(state): State<FhirApiState>,
    Path((kind, id)): Path<(String, String)>,
    Json(mut payload): Json<Value>,
) -> Result<Json<Value>, ApiFhirError> {
    let kind = parse_kind(&kind)?;

    if state.mode == ProxyMode::Forward {
        let body = state.registry.update_remote(kind, &id, &payload).await?;
        return Ok(Json(body));
    }

    if !supports_mutation(kind) {
        return Err(ApiFhirError::UnsupportedOperation {
            kind,
            operation: "Update",
        });
    }

    let object = payload
        .as_object_mut()
        .ok_or_else(|| ApiFhirError::MalformedPayload("payload must be a JSON object".into()))?;
    // The path id wins over whatever the body carries.
    object.insert("id".to_string(), Value::String(id.clone()));

    if state.store.find_by_fhir_id(kind, &id).await?.is_none() {
        return Err(ApiFhirError::NotFound);
    }

    let record = state
        .sync
        .engine()
        .upsert_unlinked(kind, &id, payload)
        .await?;
    Ok(Json(record.resource_data))
}
