use connectors::sql::error::DbError;
use thiserror::Error;

/// Errors that abort a copy run.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The job or its translation configuration is unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A translated row no longer lines up with the destination columns.
    #[error("Data integrity error: row from '{table}' carries {actual} values for {expected} columns")]
    DataIntegrity {
        table: String,
        expected: usize,
        actual: usize,
    },

    /// The database rejected a statement mid-copy.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
