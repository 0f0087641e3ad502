mod config;
mod registry;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sqlx::mysql::MySqlPoolOptions;
use thiserror::Error;

use config::{
    ConfigError, ConnectionFlags, ConnectionSettings, GenerateFlags, PASSWORD_ENV, load_config,
};
use modelsmith_core::{Error as CoreError, snapshot_schema};
use modelsmith_generate::{
    DiskScaffolder, Formatter, GenerationError, Generator, NamingMode, TableSelection,
};
use modelsmith_introspect::{CatalogReader, MySqlCatalog, SnapshotCatalog, capture_snapshot};
use registry::{init_logging, print_summary, write_json};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{errored} of {processed} table(s) failed")]
    TablesFailed { errored: usize, processed: usize },
}

#[derive(Parser, Debug)]
#[command(name = "modelsmith", version, about = "Generate Rust model modules from MySQL tables")]
struct Cli {
    /// Append JSON log lines to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate model modules for tables.
    Generate(GenerateArgs),
    /// Record a catalog snapshot for offline generation.
    Snapshot(SnapshotArgs),
    /// Print the JSON Schema of the snapshot format.
    SnapshotSchema(SnapshotSchemaArgs),
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Database (schema) name.
    #[arg(long = "db")]
    database: Option<String>,
    /// Database host.
    #[arg(long)]
    host: Option<String>,
    /// Database port (3306 when unset).
    #[arg(long)]
    port: Option<u16>,
    /// Database user; the password is read from MODELSMITH_PASSWORD.
    #[arg(long)]
    user: Option<String>,
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ConnectionArgs {
    fn flags(&self) -> ConnectionFlags {
        ConnectionFlags {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            database: self.database.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NamingArg {
    /// `save`, `read_by_key`, ...
    Plain,
    /// `orders_save`, `read_orders_by_key`, ...
    Prefixed,
}

impl From<NamingArg> for NamingMode {
    fn from(value: NamingArg) -> Self {
        match value {
            NamingArg::Plain => NamingMode::Plain,
            NamingArg::Prefixed => NamingMode::Prefixed,
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Comma separated list of tables.
    #[arg(long, required_unless_present = "all", conflicts_with = "all")]
    tables: Option<String>,
    /// Generate every table in the database.
    #[arg(long, default_value_t = false)]
    all: bool,
    /// Function naming scheme.
    #[arg(long, value_enum)]
    naming: Option<NamingArg>,
    /// Output directory for model modules.
    #[arg(long = "out")]
    out_dir: Option<PathBuf>,
    /// Concurrent table workers.
    #[arg(long)]
    workers: Option<usize>,
    /// Emit foreign-key accessors and generate referenced tables too.
    #[arg(long, default_value_t = false)]
    follow_foreign_keys: bool,
    /// Formatter program run on each written file (`rustfmt` by default).
    #[arg(long, conflicts_with = "no_format")]
    formatter: Option<String>,
    /// Skip formatting generated files.
    #[arg(long, default_value_t = false)]
    no_format: bool,
    /// Read the catalog from a snapshot file instead of a live database.
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Write the batch report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Give up on a table after this many seconds.
    #[arg(long)]
    table_timeout_secs: Option<u64>,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Comma separated list of tables; every table when omitted.
    #[arg(long)]
    tables: Option<String>,
    /// Output path for the snapshot JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SnapshotSchemaArgs {
    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Snapshot(args) => run_snapshot(args).await,
        Command::SnapshotSchema(args) => run_snapshot_schema(args),
    }
}

async fn connect(settings: &ConnectionSettings, max_connections: u32) -> Result<MySqlCatalog, CliError> {
    tracing::info!(connection = %settings.redacted(), "connecting");
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(settings.connect_options())
        .await?;
    Ok(MySqlCatalog::new(pool))
}

fn password_from_env() -> Option<String> {
    std::env::var(PASSWORD_ENV).ok()
}

fn formatter_flag(value: Option<&str>) -> Option<Formatter> {
    value.map(|program| match program {
        "rustfmt" => Formatter::Rustfmt,
        other => Formatter::Command {
            program: other.to_string(),
            args: Vec::new(),
        },
    })
}

async fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let file = load_config(args.connection.config.as_deref())?;

    let selection = if args.all {
        TableSelection::All
    } else {
        let tables = config::parse_table_list(args.tables.as_deref().unwrap_or_default());
        if tables.is_empty() {
            return Err(CliError::InvalidConfig(
                "--tables needs at least one table name".to_string(),
            ));
        }
        TableSelection::Named(tables)
    };

    let flags = GenerateFlags {
        out_dir: args.out_dir.clone(),
        naming: args.naming.map(NamingMode::from),
        workers: args.workers,
        follow_foreign_keys: args.follow_foreign_keys,
        table_timeout_secs: args.table_timeout_secs,
        formatter: formatter_flag(args.formatter.as_deref()),
        no_format: args.no_format,
    };

    let (catalog, database): (Arc<dyn CatalogReader>, String) = match &args.snapshot {
        Some(path) => {
            let catalog = SnapshotCatalog::from_path(path)?;
            let database = args
                .connection
                .database
                .clone()
                .or_else(|| file.connection.database.clone())
                .unwrap_or_else(|| catalog.snapshot().database.clone());
            tracing::info!(snapshot = %path.display(), database = %database, "using catalog snapshot");
            let catalog: Arc<dyn CatalogReader> = Arc::new(catalog);
            (catalog, database)
        }
        None => {
            let settings = ConnectionSettings::resolve(
                &args.connection.flags(),
                &file.connection,
                password_from_env(),
            )?;
            let workers = flags.workers.or(file.generate.workers).unwrap_or(8);
            let catalog = connect(&settings, u32::try_from(workers).unwrap_or(u32::MAX)).await?;
            let catalog: Arc<dyn CatalogReader> = Arc::new(catalog);
            (catalog, settings.database.clone())
        }
    };

    let (options, formatter) = config::generate_options(&database, &flags, &file.generate)?;
    tracing::info!(
        database = %options.database,
        out_dir = %options.out_dir.display(),
        naming = ?options.naming,
        follow_foreign_keys = options.follow_foreign_keys,
        "generating models"
    );

    let generator = Generator::new(catalog, Arc::new(DiskScaffolder::new(formatter)), options);
    let report = generator.run(selection).await?;

    print_summary(&report, &mut io::stderr()).map_err(registry::RegistryError::from)?;
    if let Some(path) = &args.report {
        write_json(path, &report)?;
        tracing::info!(path = %path.display(), "report written");
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::TablesFailed {
            errored: report.errored,
            processed: report.processed,
        })
    }
}

async fn run_snapshot(args: SnapshotArgs) -> Result<(), CliError> {
    let file = load_config(args.connection.config.as_deref())?;
    let settings =
        ConnectionSettings::resolve(&args.connection.flags(), &file.connection, password_from_env())?;
    let tables = args
        .tables
        .as_deref()
        .map(config::parse_table_list)
        .unwrap_or_default();

    let catalog = connect(&settings, 4).await?;
    let snapshot = capture_snapshot(&catalog, &settings.database, &tables).await?;
    write_json(&args.out, &snapshot)?;
    tracing::info!(
        path = %args.out.display(),
        tables = snapshot.tables.len(),
        "snapshot written"
    );
    Ok(())
}

fn run_snapshot_schema(args: SnapshotSchemaArgs) -> Result<(), CliError> {
    let schema = snapshot_schema();
    match &args.out {
        Some(path) => write_json(path, &schema)?,
        None => {
            let json = serde_json::to_string_pretty(&schema).map_err(registry::RegistryError::from)?;
            println!("{json}");
        }
    }
    Ok(())
}
