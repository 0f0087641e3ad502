use thiserror::Error;

/// Core error type shared across modelsmith crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog query or driver failure.
    #[error("database error: {0}")]
    Db(String),
    /// No connection could be acquired from the pool.
    #[error("connection error: {0}")]
    Connection(String),
    /// A snapshot file is unreadable or incompatible.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    /// A catalog lookup named something that is not there.
    #[error("not found: {0}")]
    NotFound(String),
    /// A requested feature is not supported by this catalog.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience alias for results returned by modelsmith crates.
pub type Result<T> = std::result::Result<T, Error>;
