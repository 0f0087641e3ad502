use async_trait::async_trait;

use modelsmith_core::{ColumnDescriptor, ForeignKey, Result};

/// Read-only access to a database catalog.
///
/// Implementations must be safe to share between generation workers.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Returns the engine identifier (e.g. `mysql`).
    fn engine(&self) -> &'static str;

    /// Names of every table in `database`, sorted.
    async fn list_tables(&self, database: &str) -> Result<Vec<String>>;

    /// Column descriptors in catalog order. An unknown table yields an
    /// empty list; callers decide whether that is an error.
    async fn read_columns(&self, database: &str, table: &str) -> Result<Vec<ColumnDescriptor>>;

    /// Foreign keys declared on `table` that reference the same database.
    async fn read_foreign_keys(&self, database: &str, table: &str) -> Result<Vec<ForeignKey>>;

    /// Distinct stored values of one column, rendered as text; `None` is `NULL`.
    async fn sample_distinct(
        &self,
        database: &str,
        table: &str,
        column: &str,
    ) -> Result<Vec<Option<String>>>;
}
