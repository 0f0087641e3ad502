use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing generated artifacts.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("formatter failed on {path}: {message}")]
    Format { path: PathBuf, message: String },
    #[error("scaffold task failed: {0}")]
    Task(String),
}

/// Errors emitted while generating one table. None of them abort a batch.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("table '{table}' not found in database '{database}'")]
    NoSuchTable { table: String, database: String },
    #[error("distinct-value probe failed for {table}.{column}: {message}")]
    Probe {
        table: String,
        column: String,
        message: String,
    },
    #[error("invalid column metadata: {0}")]
    Validation(String),
    #[error("scaffold error: {0}")]
    Scaffold(#[from] ScaffoldError),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("catalog error: {0}")]
    Catalog(modelsmith_core::Error),
    #[error("table '{table}' timed out after {seconds}s")]
    Timeout { table: String, seconds: u64 },
    #[error("generation of table '{table}' panicked: {message}")]
    Panicked { table: String, message: String },
}

impl GenerationError {
    /// Stable identifier used in batch reports.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::NoSuchTable { .. } => "no_such_table",
            GenerationError::Probe { .. } => "probe_error",
            GenerationError::Validation(_) => "validation_error",
            GenerationError::Scaffold(_) => "scaffold_error",
            GenerationError::Connection(_) => "connection_error",
            GenerationError::Catalog(_) => "catalog_error",
            GenerationError::Timeout { .. } => "timeout",
            GenerationError::Panicked { .. } => "panicked",
        }
    }
}

impl From<modelsmith_core::Error> for GenerationError {
    fn from(err: modelsmith_core::Error) -> Self {
        match err {
            modelsmith_core::Error::Connection(message) => GenerationError::Connection(message),
            other => GenerationError::Catalog(other),
        }
    }
}
