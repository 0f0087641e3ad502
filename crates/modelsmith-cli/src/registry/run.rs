use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use modelsmith_generate::BatchReport;

use super::{RegistryError, RegistryResult};

/// Write `value` as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(&mut file, value).map_err(RegistryError::from)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Human summary of a batch run: counts first, then one line per failure.
pub fn print_summary(report: &BatchReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "processed {} table(s), {} errored, in {} ms",
        report.processed, report.errored, report.duration_ms
    )?;
    for failure in &report.failures {
        writeln!(
            out,
            "  {} [{}]: {}",
            failure.table, failure.code, failure.message
        )?;
    }
    if let Some(error) = &report.index_error {
        writeln!(out, "  model index: {error}")?;
    }
    Ok(())
}
