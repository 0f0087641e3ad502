use sqlx::MySqlPool;

use modelsmith_core::{ColumnDescriptor, ForeignKey, Result};

use crate::adapter::CatalogReader;

mod mapper;
mod queries;

/// Catalog reader for MySQL databases.
#[derive(Debug, Clone)]
pub struct MySqlCatalog {
    pool: MySqlPool,
}

impl MySqlCatalog {
    /// Create a reader using a pre-configured pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl CatalogReader for MySqlCatalog {
    fn engine(&self) -> &'static str {
        "mysql"
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        queries::list_tables(&self.pool, database).await
    }

    async fn read_columns(&self, database: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let raw = queries::list_columns(&self.pool, database, table).await?;
        tracing::debug!(database, table, columns = raw.len(), "catalog columns read");
        Ok(mapper::map_columns(raw))
    }

    async fn read_foreign_keys(&self, database: &str, table: &str) -> Result<Vec<ForeignKey>> {
        let raw = queries::list_foreign_key_columns(&self.pool, database, table).await?;
        Ok(mapper::map_foreign_keys(raw))
    }

    async fn sample_distinct(
        &self,
        database: &str,
        table: &str,
        column: &str,
    ) -> Result<Vec<Option<String>>> {
        queries::sample_distinct(&self.pool, database, table, column).await
    }
}
