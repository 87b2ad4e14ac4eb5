use crate::sql::adapter::SqlAdapter;
use crate::sql::error::DbError;
use std::sync::Arc;
use tracing::debug;

/// Looks up table shape from the connected schema.
#[derive(Clone)]
pub struct SchemaIntrospector {
    adapter: Arc<dyn SqlAdapter>,
}

impl SchemaIntrospector {
    pub fn new(adapter: Arc<dyn SqlAdapter>) -> Self {
        SchemaIntrospector { adapter }
    }

    /// Returns the table's columns in ordinal order. A table the schema does
    /// not know yields [`DbError::UnknownTable`].
    pub async fn columns(&self, table: &str) -> Result<Vec<String>, DbError> {
        let columns = self.adapter.list_columns(table).await?;
        if columns.is_empty() {
            return Err(DbError::UnknownTable(table.to_string()));
        }
        debug!(table = %table, columns = columns.len(), "Introspected table");
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use model::records::row::Row;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StubAdapter {
        tables: Mutex<HashMap<String, Vec<String>>>,
    }

    impl StubAdapter {
        fn new() -> Self {
            StubAdapter {
                tables: Mutex::new(HashMap::new()),
            }
        }

        fn with_table(self, table: &str, columns: &[&str]) -> Self {
            self.tables.lock().unwrap().insert(
                table.to_string(),
                columns.iter().map(|name| name.to_string()).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl SqlAdapter for StubAdapter {
        async fn execute(&self, _sql: &str) -> Result<u64, DbError> {
            Ok(0)
        }

        async fn query_rows(&self, _sql: &str) -> Result<Vec<Row>, DbError> {
            Ok(Vec::new())
        }

        async fn max_value(&self, _table: &str, _column: &str) -> Result<Option<u64>, DbError> {
            Ok(None)
        }

        async fn list_columns(&self, table: &str) -> Result<Vec<String>, DbError> {
            Ok(self
                .tables
                .lock()
                .unwrap()
                .get(table)
                .cloned()
                .unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_columns_returned_in_ordinal_order() {
        let adapter = StubAdapter::new().with_table("users", &["id", "name", "status"]);
        let introspector = SchemaIntrospector::new(Arc::new(adapter));

        let columns = introspector.columns("users").await.unwrap();
        assert_eq!(columns, vec!["id", "name", "status"]);
    }

    #[tokio::test]
    async fn test_unknown_table_is_an_error() {
        let adapter = StubAdapter::new();
        let introspector = SchemaIntrospector::new(Arc::new(adapter));

        let err = introspector.columns("absent").await.unwrap_err();
        assert!(matches!(err, DbError::UnknownTable(table) if table == "absent"));
    }
}
