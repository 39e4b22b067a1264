//! OpenAPI document for the FHIR proxy service.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

/// The service's OpenAPI description.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HealthFlow FHIR Proxy",
        description = "Synchronizes FHIR resources from an upstream registry \
                       into a local store and exposes a CRUD proxy over it",
    ),
    paths(
        healthflow_api_fhir::handlers::get::get_resources,
        healthflow_api_fhir::handlers::create::create_resource,
        healthflow_api_fhir::handlers::update::update_resource,
        healthflow_api_fhir::handlers::delete::delete_resource,
        healthflow_api_fhir::handlers::sync::trigger_sync,
        healthflow_api_fhir::handlers::sync::trigger_sync_type,
        healthflow_api_fhir::handlers::sync::synced_patients,
    ),
    components(schemas(
        healthflow_api_fhir::ProblemDetails,
        healthflow_api_fhir::models::SyncResponse,
        healthflow_api_fhir::models::SyncKindReport,
    )),
    tags(
        (name = "FHIR Proxy", description = "CRUD surface over the local resource store"),
        (name = "FHIR Sync", description = "Registry synchronization triggers"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI JSON document.
pub fn openapi_router() -> Router {
    Router::new().route(
        "/docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
