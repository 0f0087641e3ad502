//! Catalog readers for modelsmith.

pub mod adapter;
pub mod mysql;
pub mod snapshot;

pub use adapter::CatalogReader;
pub use mysql::MySqlCatalog;
pub use snapshot::{SnapshotCatalog, capture_snapshot};

pub use modelsmith_core::CatalogSnapshot;
