use crate::sql::adapter::SqlAdapter;
use crate::sql::dialect::quote_identifier;
use crate::sql::error::{ConnectorError, DbError};
use crate::sql::mysql::decode;
use async_trait::async_trait;
use model::records::row::Row;
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Opts};
use tokio::sync::Mutex;
use tracing::{debug, info};

const LIST_COLUMNS_SQL: &str = "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

/// MySQL access over one pinned connection.
///
/// Session state set by one statement (the FOREIGN_KEY_CHECKS toggles) must
/// still hold for the statements that follow, so the adapter keeps a single
/// connection instead of a pool and serializes statements through it.
pub struct MySqlAdapter {
    conn: Mutex<Conn>,
}

impl MySqlAdapter {
    /// Connects to the given URL and verifies the server responds to a ping.
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url)?;
        let mut conn = Conn::new(opts).await?;
        conn.ping().await?;

        info!("Connected to MySQL");
        Ok(MySqlAdapter {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn execute(&self, sql: &str) -> Result<u64, DbError> {
        let mut conn = self.conn.lock().await;
        conn.query_drop(sql).await?;
        Ok(conn.affected_rows())
    }

    async fn query_rows(&self, sql: &str) -> Result<Vec<Row>, DbError> {
        let mut conn = self.conn.lock().await;
        // exec() goes through the binary protocol, which keeps numeric and
        // temporal types instead of flattening everything to text.
        let rows: Vec<mysql_async::Row> = conn.exec(sql, ()).await?;
        Ok(rows.into_iter().map(decode::to_row).collect())
    }

    async fn max_value(&self, table: &str, column: &str) -> Result<Option<u64>, DbError> {
        let sql = format!(
            "SELECT MAX({}) FROM {}",
            quote_identifier(column),
            quote_identifier(table)
        );
        let mut conn = self.conn.lock().await;
        // MAX() over an empty table yields a NULL row, hence the nesting.
        let max: Option<Option<u64>> = conn.query_first(sql.as_str()).await?;
        Ok(max.flatten())
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<String>, DbError> {
        let mut conn = self.conn.lock().await;
        let columns: Vec<String> = conn.exec(LIST_COLUMNS_SQL, (table,)).await?;
        debug!(table = %table, count = columns.len(), "Listed columns");
        Ok(columns)
    }
}
