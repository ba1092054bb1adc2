//! CSV writing operations for detail tables.

use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::CsvWriter};

/// Encode `df` as CSV with a header row.
fn encode(df: &mut DataFrame) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    CsvWriter::new(&mut out)
        .include_header(true)
        .finish(df)
        .context("[io::csv::write] Failed to encode detail table as CSV")?;
    Ok(out)
}

/// Write a detail table to `path`, replacing any existing file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    std::fs::write(path, encode(df)?)
        .with_context(|| format!("[io::csv::write] Failed to write CSV file: {}", path.display()))
}

/// Render a detail table as CSV text.
pub(crate) fn write_csv_string(df: &mut DataFrame) -> Result<String> {
    String::from_utf8(encode(df)?)
        .context("[io::csv::write] CSV output is not valid UTF-8")
}
