//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path, sync::Arc};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{Column, CsvReader, DataType}};

use crate::{
    config::ClusterColumns,
    record::{ClusterRecord, ClusterSchema, ClusterTable, Value, ValueColumn},
};

/// Reads a CSV file from `path` into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Reads a CSV from a string.
pub(crate) fn read_csv_string(csv: &str) -> Result<DataFrame> {
    CsvReader::new(Cursor::new(csv.as_bytes()))
        .finish()
        .with_context(|| "[io::csv::read] Failed to read CSV from string")
}

/// Build the cluster table from a clustering-result DataFrame.
///
/// The name and cluster columns are required; the category column is used
/// when present. Every other column becomes a value column, numeric when its
/// dtype is numeric and text otherwise.
pub(crate) fn read_cluster_table(df: &DataFrame, columns: &ClusterColumns) -> Result<ClusterTable> {
    let height = df.height();
    let names = string_values(required(df, &columns.name)?)?;
    let clusters: Vec<Option<i64>> = required(df, &columns.cluster)?
        .cast(&DataType::Int64)
        .with_context(|| format!("[io::csv::read] Cluster column {:?} is not integral", columns.cluster))?
        .i64()?
        .into_iter()
        .collect();
    let categories = match df.column(&columns.category) {
        Ok(column) => string_values(column)?.into_iter()
            .map(|value| value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
            .collect(),
        Err(_) => vec![None; height],
    };

    let keys = [columns.name.as_str(), columns.cluster.as_str(), columns.category.as_str()];
    let mut schema = Vec::new();
    let mut values: Vec<Vec<Option<Value>>> = Vec::new();
    for column in df.get_columns() {
        let name = column.name().as_str();
        if keys.contains(&name) { continue }

        if is_numeric(column.dtype()) {
            let cast = column.cast(&DataType::Float64)?;
            values.push(cast.f64()?.into_iter().map(|v| v.map(Value::Number)).collect());
            schema.push(ValueColumn::number(name));
        } else {
            let cast = column.cast(&DataType::String)?;
            values.push(cast.str()?.into_iter().map(|v| v.map(|s| Value::Text(Arc::from(s)))).collect());
            schema.push(ValueColumn::text(name));
        }
    }

    let records = (0..height)
        .map(|row| ClusterRecord::new(
            row,
            names[row].clone(),
            clusters[row],
            categories[row].clone(),
            values.iter().map(|column| column[row].clone()).collect(),
        ))
        .collect();

    ClusterTable::new(ClusterSchema::new(schema), records)
}

fn required<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .with_context(|| format!("[io::csv::read] Missing required column {:?}", name))
}

fn string_values(column: &Column) -> Result<Vec<Option<String>>> {
    let cast = column.cast(&DataType::String)?;
    Ok(cast.str()?.into_iter().map(|value| value.map(str::to_string)).collect())
}

/// Numeric dtypes the CSV reader can infer.
fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 | DataType::Float32 | DataType::Float64
    )
}
