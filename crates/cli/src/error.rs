use connectors::sql::error::{ConnectorError, DbError};
use engine::error::CopyError;
use model::transform::mapping::TranslationConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the translations file: {0}")]
    TranslationsFileRead(#[from] std::io::Error),

    #[error("Failed to parse the translations file: {0}")]
    TranslationsParse(#[from] TranslationConfigError),

    #[error("--data-translation requires --translations <file>")]
    MissingTranslationsFile,

    #[error("Failed to connect: {0}")]
    Connect(#[from] ConnectorError),

    #[error("Copy failed: {0}")]
    Copy(#[from] CopyError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}
