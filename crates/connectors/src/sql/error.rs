use thiserror::Error;

/// Errors surfaced by adapter operations against a live database.
#[derive(Debug, Error)]
pub enum DbError {
    /// The driver reported a failure executing or reading a statement.
    #[error("SQL error: {0}")]
    Sql(#[from] mysql_async::Error),

    /// A statement could not be built from the inputs given.
    #[error("Query build error: {0}")]
    QueryBuild(String),

    /// The table does not exist in the connected schema.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Catch-all for failures without a more specific variant.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Errors raised while establishing a connection.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection URL: {0}")]
    Url(#[from] mysql_async::UrlError),

    #[error("MySQL connector creation failed: {0}")]
    MySql(#[from] mysql_async::Error),
}
