use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;
use thiserror::Error;

use modelsmith_core::{RedactedConnection, redact_connection_string};
use modelsmith_generate::{Formatter, GenerateOptions, NamingMode};

/// Environment variable holding the database password.
pub const PASSWORD_ENV: &str = "MODELSMITH_PASSWORD";

pub const DEFAULT_PORT: u16 = 3306;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Contents of a `--config` TOML file. Every key is optional; flags win.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub connection: ConnectionSection,
    pub generate: GenerateSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSection {
    pub out_dir: Option<PathBuf>,
    pub naming: Option<NamingMode>,
    pub workers: Option<usize>,
    pub follow_foreign_keys: Option<bool>,
    pub write_index: Option<bool>,
    pub table_timeout_secs: Option<u64>,
    pub formatter: Option<Formatter>,
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Connection flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionFlags {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub database: Option<String>,
}

/// Fully merged connection parameters.
#[derive(Clone)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    password: Option<String>,
    pub database: String,
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConnectionSettings({})", self.redacted())
    }
}

impl ConnectionSettings {
    /// Merge flags over the file section. `password_env` is the value of
    /// [`PASSWORD_ENV`], which wins over a password in the file.
    pub fn resolve(
        flags: &ConnectionFlags,
        file: &ConnectionSection,
        password_env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let database = flags
            .database
            .clone()
            .or_else(|| file.database.clone())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("database (--db)"))?;
        let host = flags
            .host
            .clone()
            .or_else(|| file.host.clone())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing("host (--host)"))?;

        Ok(Self {
            host,
            port: flags.port.or(file.port).unwrap_or(DEFAULT_PORT),
            user: flags.user.clone().or_else(|| file.user.clone()),
            password: password_env
                .filter(|value| !value.is_empty())
                .or_else(|| file.password.clone()),
            database,
        })
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database);
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        options
    }

    /// Loggable form with the password masked.
    pub fn redacted(&self) -> RedactedConnection {
        let credentials = match (&self.user, &self.password) {
            (Some(user), Some(_)) => format!("{user}:***@"),
            (Some(user), None) => format!("{user}@"),
            (None, Some(_)) => ":***@".to_string(),
            (None, None) => String::new(),
        };
        redact_connection_string(&format!(
            "mysql://{credentials}{}:{}/{}",
            self.host, self.port, self.database
        ))
    }
}

/// Generation flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct GenerateFlags {
    pub out_dir: Option<PathBuf>,
    pub naming: Option<NamingMode>,
    pub workers: Option<usize>,
    pub follow_foreign_keys: bool,
    pub table_timeout_secs: Option<u64>,
    pub formatter: Option<Formatter>,
    pub no_format: bool,
}

/// Merge generation flags over the file section and defaults.
pub fn generate_options(
    database: &str,
    flags: &GenerateFlags,
    file: &GenerateSection,
) -> Result<(GenerateOptions, Formatter), ConfigError> {
    let defaults = GenerateOptions::default();
    let workers = flags.workers.or(file.workers).unwrap_or(defaults.workers);
    if workers == 0 {
        return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
    }

    let formatter = if flags.no_format {
        Formatter::None
    } else {
        flags
            .formatter
            .clone()
            .or_else(|| file.formatter.clone())
            .unwrap_or(Formatter::Rustfmt)
    };

    let options = GenerateOptions {
        database: database.to_string(),
        out_dir: flags
            .out_dir
            .clone()
            .or_else(|| file.out_dir.clone())
            .unwrap_or(defaults.out_dir),
        naming: flags.naming.or(file.naming).unwrap_or(defaults.naming),
        workers,
        follow_foreign_keys: flags.follow_foreign_keys
            || file.follow_foreign_keys.unwrap_or(defaults.follow_foreign_keys),
        write_index: file.write_index.unwrap_or(defaults.write_index),
        table_timeout: flags
            .table_timeout_secs
            .or(file.table_timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
    };
    Ok((options, formatter))
}

/// Split a `--tables a, b,c` value into names, dropping blanks.
pub fn parse_table_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
