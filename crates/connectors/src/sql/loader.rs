use crate::sql::adapter::SqlAdapter;
use crate::sql::dialect::{quote_identifier, quote_identifier_list};
use crate::sql::encoder::ValueEncoder;
use crate::sql::error::DbError;
use crate::sql::mysql::encoder::MySqlLiteralEncoder;
use model::records::row::Row;
use std::sync::Arc;
use tracing::debug;

/// Writes batches of rows with a single multi-row INSERT.
#[derive(Clone)]
pub struct BulkLoader {
    adapter: Arc<dyn SqlAdapter>,
}

impl BulkLoader {
    pub fn new(adapter: Arc<dyn SqlAdapter>) -> Self {
        BulkLoader { adapter }
    }

    /// Inserts `rows` into `table`, binding values positionally to `columns`.
    /// An empty batch is a no-op.
    pub async fn bulk_insert(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Row],
    ) -> Result<u64, DbError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let sql = self.build_insert(table, columns, rows)?;
        debug!(table = %table, rows = rows.len(), "Bulk inserting rows");
        self.adapter.execute(&sql).await
    }

    fn build_insert(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Row],
    ) -> Result<String, DbError> {
        if columns.is_empty() {
            return Err(DbError::QueryBuild(format!(
                "no columns to insert into table '{table}'"
            )));
        }

        let encoder = MySqlLiteralEncoder::new();
        let tuples = rows
            .iter()
            .map(|row| {
                let values = row
                    .values
                    .iter()
                    .map(|value| encoder.encode(value))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({values})")
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "INSERT INTO {} ({}) VALUES\n{};",
            quote_identifier(table),
            quote_identifier_list(columns),
            tuples
        ))
    }
}
