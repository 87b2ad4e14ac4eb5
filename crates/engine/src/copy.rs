use crate::error::CopyError;
use crate::job::CopyJob;
use crate::notify::Notifier;
use crate::window::{self, IdWindow};
use connectors::sql::adapter::SqlAdapter;
use connectors::sql::dialect::{quote_identifier, quote_identifier_list};
use connectors::sql::error::DbError;
use connectors::sql::loader::BulkLoader;
use connectors::sql::metadata::SchemaIntrospector;
use model::records::row::Row;
use model::transform::mapping::{TranslationMapping, TranslationRegistry};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Rows per bulk INSERT on the translated path. Keeps the statement well
/// under MySQL's default max_allowed_packet.
pub const INSERT_BATCH_SIZE: usize = 5000;

const FK_CHECKS_OFF: &str = "SET FOREIGN_KEY_CHECKS = 0";
const FK_CHECKS_ON: &str = "SET FOREIGN_KEY_CHECKS = 1";

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source_table: String,
    pub destination_table: String,
    pub chunks: u64,
    pub rows_written: u64,
    pub elapsed: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copied {} rows from `{}` to `{}` in {} chunks ({:.2}s)",
            self.rows_written,
            self.source_table,
            self.destination_table,
            self.chunks,
            self.elapsed.as_secs_f64()
        )
    }
}

/// What a run would do, resolved without writing anything.
#[derive(Debug, Clone)]
pub struct CopyPlan {
    pub source_columns: Vec<String>,
    pub destination_columns: Vec<String>,
    pub shared_columns: Vec<String>,
    pub translated: bool,
    pub max_id: u64,
    pub windows: Vec<IdWindow>,
}

/// How one chunk moves its rows.
enum ChunkMode<'a> {
    /// Rows pass through the process: read, rewrite, bulk-load.
    Translated {
        mapping: &'a TranslationMapping,
        columns: &'a [String],
    },
    /// Rows move inside the database with INSERT ... SELECT.
    /// `columns` is `None` when source and destination schemas match.
    InsertSelect { columns: Option<&'a [String]> },
}

/// Copies a table chunk by chunk over its id column.
pub struct CopyEngine {
    db: Arc<dyn SqlAdapter>,
    introspector: SchemaIntrospector,
    loader: BulkLoader,
    notifier: Arc<dyn Notifier>,
    translations: TranslationRegistry,
}

impl CopyEngine {
    pub fn new(
        db: Arc<dyn SqlAdapter>,
        notifier: Arc<dyn Notifier>,
        translations: TranslationRegistry,
    ) -> Self {
        CopyEngine {
            introspector: SchemaIntrospector::new(db.clone()),
            loader: BulkLoader::new(db.clone()),
            db,
            notifier,
            translations,
        }
    }

    /// Runs the job to completion and delivers exactly one terminal
    /// notification, success or failure. Chunks written before a failure
    /// stay in the destination table.
    pub async fn run(&self, job: &CopyJob) -> Result<RunSummary, CopyError> {
        info!(
            source = %job.source_table,
            destination = %job.destination_table,
            chunk_size = job.chunk_size,
            "Starting table copy"
        );

        match self.execute(job).await {
            Ok(summary) => {
                info!("{summary}");
                let subject = format!(
                    "Table copy completed: {} -> {}",
                    job.source_table, job.destination_table
                );
                self.notifier.notify(&subject, &summary.to_string()).await;
                Ok(summary)
            }
            Err(err) => {
                error!(error = %err, "Table copy failed");
                let subject = format!(
                    "Table copy failed: {} -> {}",
                    job.source_table, job.destination_table
                );
                self.notifier.notify(&subject, &err.to_string()).await;
                Err(err)
            }
        }
    }

    /// Resolves everything a run would use and lays out its windows, without
    /// issuing any writes.
    pub async fn plan(&self, job: &CopyJob) -> Result<CopyPlan, CopyError> {
        job.validate()?;
        let translation = self.resolve_translation(job)?;

        let source_columns = self.introspector.columns(&job.source_table).await?;
        let destination_columns = self.introspector.columns(&job.destination_table).await?;
        let shared_columns = intersect_columns(&destination_columns, &source_columns);

        let max_id = self.current_max_id(job).await?;
        let windows = window::plan(job.starting_id, job.chunk_size, max_id);

        Ok(CopyPlan {
            source_columns,
            destination_columns,
            shared_columns,
            translated: translation.is_some(),
            max_id,
            windows,
        })
    }

    async fn execute(&self, job: &CopyJob) -> Result<RunSummary, CopyError> {
        job.validate()?;
        let started = Instant::now();

        // Configuration resolves before the first statement, so a bad
        // translation key aborts without touching the database.
        let translation = self.resolve_translation(job)?;

        let source_columns = self.introspector.columns(&job.source_table).await?;
        let destination_columns = self.introspector.columns(&job.destination_table).await?;
        let shared_columns = intersect_columns(&destination_columns, &source_columns);

        if (translation.is_some() || destination_columns != source_columns)
            && shared_columns.is_empty()
        {
            return Err(CopyError::Configuration(format!(
                "tables '{}' and '{}' share no columns",
                job.source_table, job.destination_table
            )));
        }

        let mode = match translation {
            Some(mapping) => ChunkMode::Translated {
                mapping,
                columns: &shared_columns,
            },
            None if destination_columns != source_columns => ChunkMode::InsertSelect {
                columns: Some(&shared_columns),
            },
            None => ChunkMode::InsertSelect { columns: None },
        };

        let mut max_id = self.current_max_id(job).await?;
        info!(max_id, "Resolved initial max id");

        let mut chunks = 0u64;
        let mut rows_written = 0u64;

        let mut window = IdWindow::opening(job.starting_id, job.chunk_size);
        while window.end <= max_id {
            rows_written += self.copy_window(job, window, &mode).await?;
            chunks += 1;

            window = window.advance(job.chunk_size);
            if window.end >= max_id {
                // The source may have grown while we were copying.
                max_id = self.current_max_id(job).await?;
            }
        }

        // The half-open bound excludes max_id itself; one widened final
        // window picks it up. This runs even when the table is empty.
        let closing = window.closing(max_id);
        rows_written += self.copy_window(job, closing, &mode).await?;
        chunks += 1;

        Ok(RunSummary {
            source_table: job.source_table.clone(),
            destination_table: job.destination_table.clone(),
            chunks,
            rows_written,
            elapsed: started.elapsed(),
        })
    }

    async fn copy_window(
        &self,
        job: &CopyJob,
        window: IdWindow,
        mode: &ChunkMode<'_>,
    ) -> Result<u64, CopyError> {
        info!(start = window.start, end = window.end, "Copying chunk");
        let started = Instant::now();

        let rows = match mode {
            ChunkMode::Translated { mapping, columns } => {
                self.copy_translated(job, window, mapping, columns).await?
            }
            ChunkMode::InsertSelect { columns } => {
                self.insert_select(job, window, *columns).await?
            }
        };

        let elapsed = started.elapsed().as_secs_f64();
        info!(
            start = window.start,
            end = window.end,
            rows,
            rows_per_sec = %format!("{:.2}", rows as f64 / elapsed),
            resume_from = window.end,
            "Chunk done"
        );
        Ok(rows)
    }

    /// Moves one window entirely inside the database.
    async fn insert_select(
        &self,
        job: &CopyJob,
        window: IdWindow,
        columns: Option<&[String]>,
    ) -> Result<u64, CopyError> {
        let id = quote_identifier(&job.id_column);
        let sql = match columns {
            Some(columns) => {
                let list = quote_identifier_list(columns);
                format!(
                    "INSERT INTO {} ({list}) SELECT {list} FROM {} WHERE {id} >= {} AND {id} < {} ORDER BY {id} ASC",
                    quote_identifier(&job.destination_table),
                    quote_identifier(&job.source_table),
                    window.start,
                    window.end,
                )
            }
            None => format!(
                "INSERT INTO {} SELECT * FROM {} WHERE {id} >= {} AND {id} < {} ORDER BY {id} ASC",
                quote_identifier(&job.destination_table),
                quote_identifier(&job.source_table),
                window.start,
                window.end,
            ),
        };

        self.with_fk_checks_disabled(|| self.db.execute(&sql)).await
    }

    /// Reads one window into memory, rewrites matched values, and loads the
    /// result in bounded sub-batches.
    async fn copy_translated(
        &self,
        job: &CopyJob,
        window: IdWindow,
        mapping: &TranslationMapping,
        columns: &[String],
    ) -> Result<u64, CopyError> {
        let rows = self.read_window(job, window, columns).await?;

        let mut translated = Vec::with_capacity(rows.len());
        for mut row in rows {
            mapping.apply(columns, &mut row);
            if row.len() != columns.len() {
                return Err(CopyError::DataIntegrity {
                    table: job.source_table.clone(),
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            translated.push(row);
        }

        let mut written = 0u64;
        for batch in translated.chunks(INSERT_BATCH_SIZE) {
            written += self
                .with_fk_checks_disabled(|| {
                    self.loader
                        .bulk_insert(&job.destination_table, columns, batch)
                })
                .await?;
        }
        Ok(written)
    }

    async fn read_window(
        &self,
        job: &CopyJob,
        window: IdWindow,
        columns: &[String],
    ) -> Result<Vec<Row>, CopyError> {
        let id = quote_identifier(&job.id_column);
        let sql = format!(
            "SELECT {} FROM {} WHERE {id} >= {} AND {id} < {} ORDER BY {id} ASC",
            quote_identifier_list(columns),
            quote_identifier(&job.source_table),
            window.start,
            window.end,
        );
        Ok(self.db.query_rows(&sql).await?)
    }

    async fn current_max_id(&self, job: &CopyJob) -> Result<u64, CopyError> {
        let max = self
            .db
            .max_value(&job.source_table, &job.id_column)
            .await?;
        Ok(max.unwrap_or(0))
    }

    fn resolve_translation(&self, job: &CopyJob) -> Result<Option<&TranslationMapping>, CopyError> {
        let key = match &job.translation {
            Some(key) => key,
            None => return Ok(None),
        };

        let mapping = self.translations.mapping(key).ok_or_else(|| {
            CopyError::Configuration(format!("translation mapping '{key}' is not configured"))
        })?;
        if mapping.is_empty() {
            return Err(CopyError::Configuration(format!(
                "translation mapping '{key}' has no rules"
            )));
        }
        Ok(Some(mapping))
    }

    /// Runs `op` with foreign-key checks off, restoring them afterwards even
    /// when `op` fails. Lets child rows land before their parents do.
    async fn with_fk_checks_disabled<T, F, Fut>(&self, op: F) -> Result<T, CopyError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DbError>>,
    {
        self.db.execute(FK_CHECKS_OFF).await?;
        let result = op().await;
        let restore = self.db.execute(FK_CHECKS_ON).await;

        match result {
            Ok(value) => {
                restore?;
                Ok(value)
            }
            Err(err) => {
                if let Err(restore_err) = restore {
                    warn!(error = %restore_err, "Failed to restore foreign key checks");
                }
                Err(err.into())
            }
        }
    }
}

/// Columns present in both tables, in the destination's order.
pub fn intersect_columns(destination: &[String], source: &[String]) -> Vec<String> {
    destination
        .iter()
        .filter(|column| source.contains(*column))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_intersection_preserves_destination_order() {
        let destination = columns(&["id", "status", "name"]);
        let source = columns(&["id", "name", "legacy", "status"]);

        let shared = intersect_columns(&destination, &source);
        assert_eq!(shared, columns(&["id", "status", "name"]));
    }

    #[test]
    fn test_intersection_idempotent() {
        let destination = columns(&["id", "status", "name"]);
        let source = columns(&["id", "name", "legacy", "status"]);

        let once = intersect_columns(&destination, &source);
        let twice = intersect_columns(&once, &source);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_disjoint_columns_intersect_empty() {
        let destination = columns(&["a", "b"]);
        let source = columns(&["c"]);
        assert!(intersect_columns(&destination, &source).is_empty());
    }
}
