//! Delete endpoint: DELETE /proxy/{kind}/{id}.

use super::{parse_kind, supports_mutation};
use crate::error::ApiFhirError;
use crate::router::{FhirApiState, ProxyMode};
use axum::extract::{Path, State};
use axum::http::StatusCode;

/// Delete a resource.
///
/// Only Patient and Encounter support local deletes; other kinds are
/// rejected. In forward mode the call is passed through unrestricted.
/// Deletion only ever happens through this endpoint; sync never deletes.
#[utoipa::path(
    delete,
    path = "/proxy/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "FHIR resource kind"),
        ("id" = String, Path, description = "External resource id"),
    ),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 400, description = "Unsupported kind or operation"),
        (status = 404, description = "Resource not found"),
        (status = 502, description = "Upstream registry unavailable (forward mode)"),
    ),
    tag = "FHIR Proxy"
)]
pub async fn delete_resource(
    State(state): State<FhirApiState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiFhirError> {
    let kind = parse_kind(&kind)?;

    if state.mode == ProxyMode::Forward {
        state.registry.delete_remote(kind, &id).await?;
        return Ok(StatusCode::NO_CONTENT);
    }

    if !supports_mutation(kind) {
        return Err(ApiFhirError::UnsupportedOperation {
            kind,
            operation: "Delete",
        });
    }

    if state.store.delete(kind, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiFhirError::NotFound)
    }
}
