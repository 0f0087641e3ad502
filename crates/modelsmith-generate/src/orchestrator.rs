use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use modelsmith_core::normalize_columns;
use modelsmith_introspect::CatalogReader;

use crate::errors::{GenerationError, ScaffoldError};
use crate::model::{BatchReport, GenerateOptions, TableReport, TableSelection};
use crate::resolver::resolve_fields;
use crate::scaffold::{self, Scaffolder};
use crate::synth::{self, TableModel};

type TableEvent = (String, Result<TableReport, GenerationError>);

/// Drives catalog reads, synthesis and scaffolding for one database.
#[derive(Clone)]
pub struct Generator {
    catalog: Arc<dyn CatalogReader>,
    scaffolder: Arc<dyn Scaffolder>,
    options: GenerateOptions,
}

impl Generator {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        scaffolder: Arc<dyn Scaffolder>,
        options: GenerateOptions,
    ) -> Self {
        Self {
            catalog,
            scaffolder,
            options,
        }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate one table's module, honouring the per-table time limit.
    pub async fn generate_table(&self, table: &str) -> Result<TableReport, GenerationError> {
        match self.options.table_timeout {
            Some(limit) => tokio::time::timeout(limit, self.build_table(table))
                .await
                .map_err(|_| GenerationError::Timeout {
                    table: table.to_string(),
                    seconds: limit.as_secs(),
                })?,
            None => self.build_table(table).await,
        }
    }

    /// Generate one table on its own task so a panic is reported as that
    /// table's failure instead of taking its worker down.
    async fn generate_isolated(&self, table: &str) -> Result<TableReport, GenerationError> {
        let generator = self.clone();
        let name = table.to_string();
        tokio::spawn(async move { generator.generate_table(&name).await })
            .await
            .unwrap_or_else(|err| {
                Err(GenerationError::Panicked {
                    table: table.to_string(),
                    message: err.to_string(),
                })
            })
    }

    async fn build_table(&self, table: &str) -> Result<TableReport, GenerationError> {
        let started = Instant::now();
        let database = &self.options.database;

        let columns = normalize_columns(self.catalog.read_columns(database, table).await?);
        if columns.is_empty() {
            return Err(GenerationError::NoSuchTable {
                table: table.to_string(),
                database: database.clone(),
            });
        }

        let fields = resolve_fields(self.catalog.as_ref(), database, table, &columns).await?;
        synth::validate_fields(table, &fields)?;

        let mut model = TableModel::new(database.clone(), table, fields, self.options.naming);
        let mut dependencies: Vec<String> = Vec::new();
        if self.options.follow_foreign_keys {
            let foreign_keys = self.catalog.read_foreign_keys(database, table).await?;
            model = model.with_foreign_keys(&foreign_keys);
            for relation in &model.relations {
                if !relation.self_reference && !dependencies.contains(&relation.referenced_table) {
                    dependencies.push(relation.referenced_table.clone());
                }
            }
        }

        let artifacts = synth::synthesize(&model);
        let scaffolder = Arc::clone(&self.scaffolder);
        let root = self.options.out_dir.clone();
        let outcome =
            tokio::task::spawn_blocking(move || scaffold::apply(scaffolder.as_ref(), &root, &artifacts))
                .await
                .map_err(|err| ScaffoldError::Task(err.to_string()))??;

        let report = TableReport {
            table: table.to_string(),
            module: model.module.clone(),
            written: outcome.written.iter().map(|path| display_path(path)).collect(),
            skipped: outcome.skipped.iter().map(|path| display_path(path)).collect(),
            fields: model.fields.len(),
            key_arity: model.keys.arity(),
            dependencies,
            duration_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            table = %report.table,
            module = %report.module,
            fields = report.fields,
            key_arity = report.key_arity,
            written = report.written.len(),
            skipped = report.skipped.len(),
            "table generated"
        );
        Ok(report)
    }

    /// Generate every selected table with a pool of workers.
    ///
    /// Each table is processed at most once. Failures are recorded in the
    /// report and never stop other tables; only listing the catalog can fail
    /// the run as a whole.
    pub async fn run(&self, selection: TableSelection) -> Result<BatchReport, GenerationError> {
        let started = Instant::now();
        let database = self.options.database.clone();

        let requested = match selection {
            TableSelection::All => self.catalog.list_tables(&database).await?,
            TableSelection::Named(tables) => tables,
        };

        let mut processed: HashSet<String> = HashSet::new();
        let initial: Vec<String> = requested
            .into_iter()
            .filter(|table| processed.insert(table.clone()))
            .collect();

        let run_id = Uuid::new_v4().to_string();
        let mut report = BatchReport::new(run_id.clone(), database.clone(), initial.len());
        let workers = self.options.workers.max(1);
        info!(
            run_id = %run_id,
            database = %database,
            tables = initial.len(),
            workers,
            "generation started"
        );

        let (job_tx, job_rx) = mpsc::unbounded_channel::<String>();
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TableEvent>();

        let mut pending = 0usize;
        for table in initial {
            if job_tx.send(table).is_ok() {
                pending += 1;
            }
        }

        let mut pool = JoinSet::new();
        for worker in 0..workers {
            let generator = self.clone();
            let jobs = Arc::clone(&job_rx);
            let events = event_tx.clone();
            pool.spawn(async move {
                loop {
                    let next = jobs.lock().await.recv().await;
                    let Some(table) = next else {
                        break;
                    };
                    debug!(worker, table = %table, "table picked up");
                    let result = generator.generate_isolated(&table).await;
                    if events.send((table, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(event_tx);

        while pending > 0 {
            let Some((table, result)) = event_rx.recv().await else {
                break;
            };
            pending -= 1;

            match result {
                Ok(table_report) => {
                    for dependency in &table_report.dependencies {
                        if processed.insert(dependency.clone())
                            && job_tx.send(dependency.clone()).is_ok()
                        {
                            debug!(table = %table, dependency = %dependency, "dependency enqueued");
                            pending += 1;
                        }
                    }
                    report.record_success(table_report);
                }
                Err(err) => {
                    warn!(table = %table, code = err.code(), error = %err, "table failed");
                    report.record_failure(&table, err.code(), err.to_string());
                }
            }
        }

        drop(job_tx);
        while let Some(joined) = pool.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "generation worker stopped abnormally");
            }
        }

        if self.options.write_index {
            if let Err(err) = self.write_index().await {
                warn!(error = %err, "failed to write model index");
                report.index_error = Some(err.to_string());
            }
        }

        report.sort();
        report.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            run_id = %report.run_id,
            processed = report.processed,
            errored = report.errored,
            duration_ms = report.duration_ms,
            "generation finished"
        );
        Ok(report)
    }

    /// Rewrite the output root `mod.rs` from the module directories on disk.
    async fn write_index(&self) -> Result<(), ScaffoldError> {
        let scaffolder = Arc::clone(&self.scaffolder);
        let root = self.options.out_dir.clone();
        tokio::task::spawn_blocking(move || rewrite_index(scaffolder.as_ref(), &root))
            .await
            .map_err(|err| ScaffoldError::Task(err.to_string()))?
    }
}

fn rewrite_index(scaffolder: &dyn Scaffolder, root: &Path) -> Result<(), ScaffoldError> {
    scaffolder.create_dir_all(root)?;
    let modules = scaffolder.module_dirs(root)?;
    let path: PathBuf = root.join("mod.rs");
    scaffolder.write(&path, synth::render_index(&modules).as_bytes(), true)?;
    scaffolder.format_source(&path)
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
