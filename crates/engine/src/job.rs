use crate::error::CopyError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: u64 = 100_000;
pub const DEFAULT_STARTING_ID: u64 = 1;
pub const DEFAULT_ID_COLUMN: &str = "id";

/// One table-to-table copy request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyJob {
    pub source_table: String,
    pub destination_table: String,
    /// Numeric column the copy windows over.
    pub id_column: String,
    /// Width of each id window.
    pub chunk_size: u64,
    /// First id the copy considers.
    pub starting_id: u64,
    /// Key of the translation mapping to apply, if any.
    pub translation: Option<String>,
}

impl CopyJob {
    pub fn new(source_table: &str, destination_table: &str) -> Self {
        CopyJob {
            source_table: source_table.to_string(),
            destination_table: destination_table.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            starting_id: DEFAULT_STARTING_ID,
            translation: None,
        }
    }

    pub fn with_id_column(mut self, id_column: &str) -> Self {
        self.id_column = id_column.to_string();
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_starting_id(mut self, starting_id: u64) -> Self {
        self.starting_id = starting_id;
        self
    }

    pub fn with_translation(mut self, key: &str) -> Self {
        self.translation = Some(key.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), CopyError> {
        if self.chunk_size < 1 {
            return Err(CopyError::Configuration(
                "chunk size must be at least 1".to_string(),
            ));
        }
        if self.starting_id < 1 {
            return Err(CopyError::Configuration(
                "starting id must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
