use std::path::Path;

use modelsmith_core::{
    CatalogSnapshot, ColumnDescriptor, Error, ForeignKey, Result, TableSnapshot,
};

use crate::adapter::CatalogReader;

/// Catalog reader backed by a recorded [`CatalogSnapshot`].
///
/// Serves the exact columns, foreign keys and distinct samples captured
/// earlier, so generation can run without a database.
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    snapshot: CatalogSnapshot,
}

impl SnapshotCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Result<Self> {
        snapshot.ensure_supported()?;
        Ok(Self { snapshot })
    }

    /// Load a snapshot JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            Error::InvalidSnapshot(format!("failed to read {}: {err}", path.display()))
        })?;
        let snapshot: CatalogSnapshot = serde_json::from_slice(&bytes).map_err(|err| {
            Error::InvalidSnapshot(format!("failed to parse {}: {err}", path.display()))
        })?;
        Self::new(snapshot)
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    fn database_matches(&self, database: &str) -> Result<()> {
        if self.snapshot.database == database {
            Ok(())
        } else {
            Err(Error::NotFound(format!(
                "snapshot holds database '{}', not '{database}'",
                self.snapshot.database
            )))
        }
    }
}

#[async_trait::async_trait]
impl CatalogReader for SnapshotCatalog {
    fn engine(&self) -> &'static str {
        "snapshot"
    }

    async fn list_tables(&self, database: &str) -> Result<Vec<String>> {
        self.database_matches(database)?;
        let mut names: Vec<String> = self
            .snapshot
            .tables
            .iter()
            .map(|table| table.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn read_columns(&self, database: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.database_matches(database)?;
        Ok(self
            .snapshot
            .table(table)
            .map(|table| table.columns.clone())
            .unwrap_or_default())
    }

    async fn read_foreign_keys(&self, database: &str, table: &str) -> Result<Vec<ForeignKey>> {
        self.database_matches(database)?;
        Ok(self
            .snapshot
            .table(table)
            .map(|table| table.foreign_keys.clone())
            .unwrap_or_default())
    }

    async fn sample_distinct(
        &self,
        database: &str,
        table: &str,
        column: &str,
    ) -> Result<Vec<Option<String>>> {
        self.database_matches(database)?;
        self.snapshot
            .table(table)
            .and_then(|table| table.samples.get(column))
            .cloned()
            .ok_or_else(|| {
                Error::NotFound(format!("no recorded samples for {table}.{column}"))
            })
    }
}

/// Record everything generation reads for `tables` (all tables when empty).
///
/// Distinct samples are captured only for small-integer columns, the only
/// ones the type resolver probes.
pub async fn capture_snapshot(
    catalog: &dyn CatalogReader,
    database: &str,
    tables: &[String],
) -> Result<CatalogSnapshot> {
    let names = if tables.is_empty() {
        catalog.list_tables(database).await?
    } else {
        tables.to_vec()
    };

    let mut snapshot = CatalogSnapshot::new(catalog.engine(), database);

    for name in names {
        let columns = catalog.read_columns(database, &name).await?;
        if columns.is_empty() {
            return Err(Error::NotFound(format!("table '{name}' in database '{database}'")));
        }
        let foreign_keys = catalog.read_foreign_keys(database, &name).await?;

        let mut table = TableSnapshot {
            name: name.clone(),
            columns,
            foreign_keys,
            samples: Default::default(),
        };
        for column in table.columns.iter().filter(|column| column.is_small_integer()) {
            let values = catalog.sample_distinct(database, &name, &column.name).await?;
            table.samples.insert(column.name.clone(), values);
        }

        tracing::info!(table = %name, columns = table.columns.len(), "table captured");
        snapshot.tables.push(table);
    }

    Ok(snapshot)
}
