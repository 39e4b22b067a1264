//! Error types for the FHIR proxy API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use healthflow_core::ResourceKind;
use healthflow_db::DbError;
use healthflow_registry_client::RegistryClientError;
use healthflow_sync::SyncError;
use serde::Serialize;
use utoipa::ToSchema;

/// Error type for the FHIR proxy API.
#[derive(Debug, thiserror::Error)]
pub enum ApiFhirError {
    /// No record matched the requested identity.
    #[error("Resource not found")]
    NotFound,

    /// The path named a resource kind the proxy does not handle.
    #[error("Unsupported resource kind: {0}")]
    UnsupportedKind(String),

    /// The operation is not available for this kind.
    #[error("{operation} not supported for {kind}")]
    UnsupportedOperation {
        kind: ResourceKind,
        operation: &'static str,
    },

    /// The request body could not be used as a resource payload.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The upstream registry could not be reached or answered badly.
    #[error("Upstream registry error: {0}")]
    Upstream(#[from] RegistryClientError),

    /// The resource store rejected the operation.
    #[error("Store error: {0}")]
    Database(#[from] DbError),
}

impl From<SyncError> for ApiFhirError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Upstream(e) => Self::Upstream(e),
            SyncError::MalformedEntry { .. } => Self::MalformedPayload(err.to_string()),
            SyncError::Store(e) => Self::Database(e),
        }
    }
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    fn new(slug: &str, title: &str, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: format!("https://healthflow.io/problems/{slug}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for ApiFhirError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiFhirError::NotFound => (
                StatusCode::NOT_FOUND,
                ProblemDetails::new(
                    "not-found",
                    "Not Found",
                    StatusCode::NOT_FOUND,
                    "Resource not found",
                ),
            ),
            ApiFhirError::UnsupportedKind(kind) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "unsupported-kind",
                    "Unsupported Resource Kind",
                    StatusCode::BAD_REQUEST,
                    format!("Unsupported resource kind: {kind}"),
                ),
            ),
            ApiFhirError::UnsupportedOperation { kind, operation } => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "unsupported-operation",
                    "Unsupported Operation",
                    StatusCode::BAD_REQUEST,
                    format!("{operation} not supported for {kind}"),
                ),
            ),
            ApiFhirError::MalformedPayload(msg) => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "malformed-payload",
                    "Malformed Payload",
                    StatusCode::BAD_REQUEST,
                    msg.clone(),
                ),
            ),
            ApiFhirError::Database(DbError::Conflict(fhir_id)) => (
                StatusCode::CONFLICT,
                ProblemDetails::new(
                    "conflict",
                    "Conflict",
                    StatusCode::CONFLICT,
                    format!("A resource with id {fhir_id} already exists"),
                ),
            ),
            ApiFhirError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream registry error");
                (
                    StatusCode::BAD_GATEWAY,
                    ProblemDetails::new(
                        "upstream-unavailable",
                        "Upstream Registry Unavailable",
                        StatusCode::BAD_GATEWAY,
                        "The upstream FHIR registry could not be reached",
                    ),
                )
            }
            ApiFhirError::Database(e) => {
                tracing::error!(error = %e, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "A storage error occurred",
                    ),
                )
            }
        };

        (status, Json(problem)).into_response()
    }
}
