//! Excel workbook reading (xlsx, xls, xlsb, ods) for clustering results.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{open_workbook_auto, Data, Reader};
use polars::{frame::DataFrame, prelude::Column};

/// Reads the first sheet of a workbook into a DataFrame.
///
/// The first row holds the headers. A column whose non-empty cells are all
/// numeric becomes Float64, anything else String; error cells are null.
pub(crate) fn read_xlsx(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("[io::xlsx] Failed to open workbook: {}", path.display()))?;
    let sheet = workbook.sheet_names().first().cloned()
        .ok_or_else(|| anyhow!("[io::xlsx] Workbook has no sheets: {}", path.display()))?;
    let range = workbook.worksheet_range(&sheet)
        .with_context(|| format!("[io::xlsx] Failed to read sheet {:?}", sheet))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else { return Ok(DataFrame::empty()) };
    let body: Vec<&[Data]> = rows.collect();

    let columns = header.iter().enumerate()
        .map(|(i, cell)| {
            let name = match cell {
                Data::Empty => format!("column_{}", i + 1),
                other => other.to_string().trim().to_string(),
            };
            let cells: Vec<Option<&Data>> = body.iter().map(|row| row.get(i)).collect();
            sheet_column(&name, &cells)
        })
        .collect();

    DataFrame::new(columns)
        .with_context(|| format!("[io::xlsx] Invalid table in sheet {:?}", sheet))
}

fn sheet_column(name: &str, cells: &[Option<&Data>]) -> Column {
    let numeric = cells.iter().flatten().all(|cell| {
        matches!(cell, Data::Int(_) | Data::Float(_) | Data::Empty | Data::Error(_))
    });

    if numeric {
        let values: Vec<Option<f64>> = cells.iter()
            .map(|cell| match cell {
                Some(Data::Int(n)) => Some(*n as f64),
                Some(Data::Float(n)) => Some(*n),
                _ => None,
            })
            .collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells.iter()
            .map(|cell| match cell {
                None | Some(Data::Empty | Data::Error(_)) => None,
                Some(Data::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
                Some(other) => Some(other.to_string()),
            })
            .collect();
        Column::new(name.into(), values)
    }
}
