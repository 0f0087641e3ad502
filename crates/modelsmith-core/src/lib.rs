//! Core contracts and helpers for modelsmith.
//!
//! This crate defines the catalog column model, resolved field types, key
//! sets and the snapshot format shared by the catalog readers, the
//! generator and the CLI.

pub mod column;
pub mod constraints;
pub mod error;
pub mod field;
pub mod keys;
pub mod redaction;
pub mod snapshot;

pub use column::{
    ColumnDescriptor, KeyRole, dedupe_columns, normalize_columns, normalize_default,
    parse_nullable,
};
pub use constraints::ForeignKey;
pub use error::{Error, Result};
pub use field::{ResolvedField, TargetKind, TargetType};
pub use keys::{KeyField, KeySet, KeyShape};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use snapshot::{CatalogSnapshot, TableSnapshot, snapshot_schema};

/// Current contract version for snapshot files.
pub const SNAPSHOT_VERSION: &str = "0.1";
