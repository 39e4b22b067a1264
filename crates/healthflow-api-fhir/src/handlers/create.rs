//! Create endpoint: POST /proxy/{kind}.

use super::parse_kind;
use crate::error::ApiFhirError;
use crate::router::{FhirApiState, ProxyMode};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use healthflow_core::ResourceKind;
use serde_json::Value;
use uuid::Uuid;

/// Create a resource.
///
/// A payload without an `id` gets a generated one; a payload whose id
/// matches an existing record degenerates into an update (upsert). Patient
/// projected fields are re-extracted; clinical kinds do not derive their
/// Patient link on this path.
#[utoipa::path(
    post,
    path = "/proxy/{kind}",
    params(("kind" = String, Path, description = "FHIR resource kind")),
    responses(
        (status = 201, description = "Resource upserted"),
        (status = 400, description = "Unsupported kind or malformed payload"),
        (status = 502, description = "Upstream registry unavailable (forward mode)"),
    ),
    tag = "FHIR Proxy"
)]
pub async fn create_resource(
    State(state): State<FhirApiState>,
    Path(kind): Path<String>,
    Json(mut payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiFhirError> {
    let kind = parse_kind(&kind)?;

    if state.mode == ProxyMode::Forward {
        let body = state.registry.create_remote(kind, &payload).await?;
        return Ok((StatusCode::CREATED, Json(body)));
    }

    let object = payload
        .as_object_mut()
        .ok_or_else(|| ApiFhirError::MalformedPayload("payload must be a JSON object".into()))?;

    let fhir_id = match object.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(_) => {
            return Err(ApiFhirError::MalformedPayload(
                "`id` must be a string".into(),
            ))
        }
        None => {
            let generated = Uuid::new_v4().to_string();
            object.insert("id".to_string(), Value::String(generated.clone()));
            generated
        }
    };

    tracing::debug!(kind = %kind, fhir_id = %fhir_id, "Creating resource via proxy");
    let record = state
        .sync
        .engine()
        .upsert_unlinked(kind, &fhir_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(record.resource_data)))
}
