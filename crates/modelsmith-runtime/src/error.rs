use thiserror::Error;

/// Errors surfaced by generated model code.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A value failed save-time validation (enum/set membership, missing required value).
    #[error("validation error: {0}")]
    Validation(String),
    /// The connection pool for a database could not be opened.
    #[error("connection error for database '{database}': {source}")]
    Connection {
        database: String,
        #[source]
        source: sqlx::Error,
    },
    /// The statement failed to execute.
    #[error("query error: {0}")]
    Query(#[from] sqlx::Error),
    /// A column could not be decoded into its field type.
    #[error("decode error at column {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: sqlx::Error,
    },
    /// The record's values do not line up with its column table.
    #[error("record for '{table}' has {values} values for {columns} columns")]
    ColumnMismatch {
        table: &'static str,
        columns: usize,
        values: usize,
    },
}

/// Convenience alias for generated model results.
pub type Result<T> = std::result::Result<T, RuntimeError>;
