use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How generated functions are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    /// `save`, `read_by_key`, `read_all`, ...
    #[default]
    Plain,
    /// `orders_save`, `read_orders_by_key`, `read_all_orders`, ...
    Prefixed,
}

/// Options for the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Database whose tables are generated.
    pub database: String,
    /// Root directory for generated model modules.
    pub out_dir: PathBuf,
    pub naming: NamingMode,
    /// Concurrent table workers in a batch run.
    pub workers: usize,
    /// Emit foreign-key accessors and enqueue referenced tables.
    pub follow_foreign_keys: bool,
    /// Regenerate the output root `mod.rs` at the end of a batch.
    pub write_index: bool,
    /// Per-table time limit; `None` waits indefinitely.
    pub table_timeout: Option<Duration>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            database: String::new(),
            out_dir: PathBuf::from("models"),
            naming: NamingMode::Plain,
            workers: 8,
            follow_foreign_keys: false,
            write_index: true,
            table_timeout: None,
        }
    }
}

/// Which tables a batch run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    All,
    Named(Vec<String>),
}

/// Summary of one generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub module: String,
    /// Artifacts written this run, relative to the output root.
    pub written: Vec<String>,
    /// Create-if-absent artifacts left untouched.
    pub skipped: Vec<String>,
    pub fields: usize,
    pub key_arity: usize,
    /// Tables enqueued through foreign keys.
    pub dependencies: Vec<String>,
    pub duration_ms: u64,
}

/// A table that failed, with the stable error code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFailure {
    pub table: String,
    pub code: String,
    pub message: String,
}

/// Report for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: String,
    pub database: String,
    pub requested: usize,
    pub processed: usize,
    pub errored: usize,
    pub tables: Vec<TableReport>,
    pub failures: Vec<TableFailure>,
    /// Set when the output root `mod.rs` could not be written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_error: Option<String>,
    pub duration_ms: u64,
}

impl BatchReport {
    pub fn new(run_id: String, database: String, requested: usize) -> Self {
        Self {
            run_id,
            database,
            requested,
            processed: 0,
            errored: 0,
            tables: Vec::new(),
            failures: Vec::new(),
            index_error: None,
            duration_ms: 0,
        }
    }

    pub fn record_success(&mut self, report: TableReport) {
        self.processed += 1;
        self.tables.push(report);
    }

    pub fn record_failure(&mut self, table: &str, code: &str, message: String) {
        self.processed += 1;
        self.errored += 1;
        self.failures.push(TableFailure {
            table: table.to_string(),
            code: code.to_string(),
            message,
        });
    }

    pub fn is_success(&self) -> bool {
        self.errored == 0 && self.index_error.is_none()
    }

    /// Order tables and failures by name so reports diff cleanly.
    pub fn sort(&mut self) {
        self.tables.sort_by(|left, right| left.table.cmp(&right.table));
        self.failures.sort_by(|left, right| left.table.cmp(&right.table));
    }
}
