//! Error types for the healthflow-db crate.

use thiserror::Error;

/// Resource store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// A concurrent create collided with an existing record. The per-table
    /// unique constraint on `fhir_id` is the final arbiter of create/create
    /// races; callers see the conflict explicitly instead of a duplicate row.
    #[error("Resource already exists: {0}")]
    Conflict(String),

    /// No record matched the requested identity.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl DbError {
    /// Classify an sqlx error from an INSERT, mapping unique-constraint
    /// violations to [`DbError::Conflict`].
    pub(crate) fn from_insert(err: sqlx::Error, fhir_id: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return DbError::Conflict(fhir_id.to_string());
            }
        }
        DbError::QueryFailed(err)
    }

    /// Check if this error indicates a uniqueness conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, DbError::Conflict(_))
    }

    /// Check if this error indicates a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let err = DbError::Conflict("pt-1".to_string());
        assert_eq!(err.to_string(), "Resource already exists: pt-1");
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_display() {
        let err = DbError::NotFound("Patient/pt-9".to_string());
        assert_eq!(err.to_string(), "Not found: Patient/pt-9");
        assert!(err.is_not_found());
    }
}
