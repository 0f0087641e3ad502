use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::errors::ScaffoldError;

/// Whether an artifact may replace an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Derived output, rewritten on every run.
    AlwaysRegenerate,
    /// Hand-edited output, written once and never touched again.
    CreateIfAbsent,
}

/// A file the generator wants on disk, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub contents: String,
    pub policy: WritePolicy,
}

impl GeneratedArtifact {
    pub fn new(path: impl Into<PathBuf>, contents: String, policy: WritePolicy) -> Self {
        Self {
            path: path.into(),
            contents,
            policy,
        }
    }
}

/// Filesystem side of scaffolding.
pub trait Scaffolder: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> Result<(), ScaffoldError>;

    /// Write `bytes`; with `overwrite` unset an existing file is left alone
    /// and `Ok(false)` is returned.
    fn write(&self, path: &Path, bytes: &[u8], overwrite: bool) -> Result<bool, ScaffoldError>;

    /// Run the source formatter on a written file.
    fn format_source(&self, path: &Path) -> Result<(), ScaffoldError>;

    /// Names of the immediate subdirectories that hold a `mod.rs`.
    fn module_dirs(&self, path: &Path) -> Result<Vec<String>, ScaffoldError>;
}

/// External source formatter invoked after writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    None,
    Rustfmt,
    /// Any program taking the file path as its last argument.
    Command { program: String, args: Vec<String> },
}

impl Formatter {
    fn command(&self, path: &Path) -> Option<Command> {
        match self {
            Formatter::None => None,
            Formatter::Rustfmt => {
                let mut cmd = Command::new("rustfmt");
                cmd.args(["--edition", "2021"]).arg(path);
                Some(cmd)
            }
            Formatter::Command { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(path);
                Some(cmd)
            }
        }
    }
}

/// Scaffolder over the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskScaffolder {
    formatter: Formatter,
}

impl DiskScaffolder {
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }
}

fn write_error(path: &Path, source: io::Error) -> ScaffoldError {
    ScaffoldError::Write {
        path: path.to_path_buf(),
        source,
    }
}

impl Scaffolder for DiskScaffolder {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ScaffoldError> {
        fs::create_dir_all(path).map_err(|err| write_error(path, err))
    }

    fn write(&self, path: &Path, bytes: &[u8], overwrite: bool) -> Result<bool, ScaffoldError> {
        if overwrite {
            write_bytes_atomic(path, bytes).map_err(|err| write_error(path, err))?;
            return Ok(true);
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => return Err(write_error(path, err)),
        };
        file.write_all(bytes).map_err(|err| write_error(path, err))?;
        file.sync_all().map_err(|err| write_error(path, err))?;
        Ok(true)
    }

    fn format_source(&self, path: &Path) -> Result<(), ScaffoldError> {
        let Some(mut cmd) = self.formatter.command(path) else {
            return Ok(());
        };

        let output = cmd.output().map_err(|err| ScaffoldError::Format {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::Format {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn module_dirs(&self, path: &Path) -> Result<Vec<String>, ScaffoldError> {
        let entries = fs::read_dir(path).map_err(|err| write_error(path, err))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| write_error(path, err))?;
            let dir = entry.path();
            if dir.is_dir() && dir.join("mod.rs").is_file() {
                if let Some(name) = dir.file_name().and_then(|name| name.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Replace `path` through a temporary sibling and a rename, so a reader
/// never sees a half-written file.
fn write_bytes_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "invalid path for atomic write")
    })?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)
}

/// What scaffolding did for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write `artifacts` under `root` according to their policies, then format
/// every file that was written.
///
/// A formatter failure is reported after all files are written; the
/// unformatted files stay in place.
pub fn apply(
    scaffolder: &dyn Scaffolder,
    root: &Path,
    artifacts: &[GeneratedArtifact],
) -> Result<ScaffoldOutcome, ScaffoldError> {
    let mut outcome = ScaffoldOutcome::default();

    for artifact in artifacts {
        let path = root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            scaffolder.create_dir_all(parent)?;
        }

        let overwrite = artifact.policy == WritePolicy::AlwaysRegenerate;
        if !overwrite && scaffolder.exists(&path) {
            outcome.skipped.push(artifact.path.clone());
            continue;
        }

        if scaffolder.write(&path, artifact.contents.as_bytes(), overwrite)? {
            outcome.written.push(artifact.path.clone());
        } else {
            outcome.skipped.push(artifact.path.clone());
        }
    }

    let mut format_error = None;
    for relative in &outcome.written {
        if let Err(err) = scaffolder.format_source(&root.join(relative)) {
            tracing::warn!(path = %relative.display(), error = %err, "formatter failed");
            format_error.get_or_insert(err);
        }
    }

    match format_error {
        Some(err) => Err(err),
        None => Ok(outcome),
    }
}
