use std::collections::BTreeMap;

use schemars::JsonSchema;
use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};

use crate::column::ColumnDescriptor;
use crate::constraints::ForeignKey;
use crate::error::{Error, Result};

/// Offline copy of everything generation reads from a live catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogSnapshot {
    /// Contract version for this snapshot format.
    pub snapshot_version: String,
    /// Database engine identifier (e.g. `mysql`).
    pub engine: String,
    pub database: String,
    pub tables: Vec<TableSnapshot>,
}

/// Catalog facts for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableSnapshot {
    pub name: String,
    /// Columns in catalog order.
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    /// Distinct stored values per probed column; `None` stands for `NULL`.
    #[serde(default)]
    pub samples: BTreeMap<String, Vec<Option<String>>>,
}

impl CatalogSnapshot {
    pub fn new(engine: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            snapshot_version: crate::SNAPSHOT_VERSION.to_string(),
            engine: engine.into(),
            database: database.into(),
            tables: Vec::new(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableSnapshot> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Reject snapshots written by an incompatible version.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.snapshot_version != crate::SNAPSHOT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported snapshot_version '{}' (expected {})",
                self.snapshot_version,
                crate::SNAPSHOT_VERSION
            )));
        }
        Ok(())
    }
}

/// JSON Schema describing [`CatalogSnapshot`] files.
pub fn snapshot_schema() -> RootSchema {
    schemars::schema_for!(CatalogSnapshot)
}
