use crate::sql::error::DbError;
use async_trait::async_trait;
use model::records::row::Row;

/// Database operations the copy engine needs from a backend.
///
/// The engine only ever issues plain SQL text built on its side, so the
/// surface stays small: run a statement, read rows, and two convenience
/// lookups the planner uses.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    /// Executes a statement and returns the number of affected rows.
    async fn execute(&self, sql: &str) -> Result<u64, DbError>;

    /// Runs a SELECT and decodes every row.
    async fn query_rows(&self, sql: &str) -> Result<Vec<Row>, DbError>;

    /// Returns `MAX(column)` for the table, `None` when the table is empty.
    async fn max_value(&self, table: &str, column: &str) -> Result<Option<u64>, DbError>;

    /// Returns the table's column names in ordinal position order. An
    /// unknown table yields an empty list.
    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DbError>;
}
