//! CSV export writer: consumes the engine's 2-D export array (header row
//! plus per-column values for every filtered row).
//!
//! Spreadsheet and PDF writers consume the same array but live outside this
//! crate.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::path::Path;
use tracing::info;

/// Render the export table as CSV text.
pub fn csv_string(table: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in table {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().wrap_err("failed to finish CSV output")?;
    Ok(String::from_utf8(bytes)?)
}

/// Write the export table to a CSV file.
pub fn write_csv(table: &[Vec<String>], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .wrap_err_with(|| format!("failed to create {}", path.display()))?;
    for row in table {
        writer.write_record(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = table.len().saturating_sub(1), "exported CSV");
    Ok(())
}
