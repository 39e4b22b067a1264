//! Request and response bodies for the FHIR proxy API.

use healthflow_sync::SyncReport;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for `GET /proxy/{kind}`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GetResourceQuery {
    /// Optional external resource id; omit to list the collection.
    pub id: Option<String>,
}

/// Per-kind outcome of a triggered sync.
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncKindReport {
    /// The FHIR resource type that was synced.
    pub resource_type: String,
    /// Number of resources reconciled into the store.
    pub reconciled: usize,
}

impl From<SyncReport> for SyncKindReport {
    fn from(report: SyncReport) -> Self {
        Self {
            resource_type: report.kind.to_string(),
            reconciled: report.reconciled,
        }
    }
}

/// Response body for sync triggers.
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncResponse {
    pub status: String,
    pub reports: Vec<SyncKindReport>,
}

impl SyncResponse {
    /// A successful sync outcome.
    #[must_use]
    pub fn success(reports: Vec<SyncReport>) -> Self {
        Self {
            status: "success".to_string(),
            reports: reports.into_iter().map(SyncKindReport::from).collect(),
        }
    }
}
