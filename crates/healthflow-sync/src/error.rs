//! Error types for the sync crate.

use healthflow_core::ResourceKind;
use healthflow_db::DbError;
use healthflow_registry_client::RegistryClientError;
use thiserror::Error;

/// Errors raised while synchronizing a resource collection.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The upstream registry could not be reached or answered badly.
    #[error("Upstream registry error: {0}")]
    Upstream(#[from] RegistryClientError),

    /// A bundle entry could not be reconciled. Entries before this one in
    /// the batch stay committed; entries after it are never processed.
    #[error("Malformed {kind} entry at index {index}: {reason}")]
    MalformedEntry {
        kind: ResourceKind,
        index: usize,
        reason: String,
    },

    /// The local store rejected a write.
    #[error("Store error: {0}")]
    Store(#[from] DbError),
}
