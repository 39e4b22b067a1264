//! HTTP handlers for the FHIR proxy and sync endpoints.

pub mod create;
pub mod delete;
pub mod get;
pub mod sync;
pub mod update;

pub use create::create_resource;
pub use delete::delete_resource;
pub use get::get_resources;
pub use sync::{synced_patients, trigger_sync, trigger_sync_type};
pub use update::update_resource;

use crate::error::ApiFhirError;
use healthflow_core::ResourceKind;

/// Parse the `{kind}` path segment, rejecting unknown kinds with a 400.
pub(crate) fn parse_kind(raw: &str) -> Result<ResourceKind, ApiFhirError> {
    raw.parse()
        .map_err(|_| ApiFhirError::UnsupportedKind(raw.to_string()))
}

/// Kinds the proxy allows local updates and deletes for.
pub(crate) fn supports_mutation(kind: ResourceKind) -> bool {
    matches!(kind, ResourceKind::Patient | ResourceKind::Encounter)
}
