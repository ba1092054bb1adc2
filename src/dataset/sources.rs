use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use super::{assemble, Dataset};
use crate::{
    common,
    config::{ClusterColumns, GeometryColumns, LinkConfig},
    error::{SourceError, SourceKind},
    io,
    record::{ClusterTable, GeometryRecord},
};

/// Locations of the two inputs a dataset is assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub geometry: PathBuf,
    pub clusters: PathBuf,
}

impl Sources {
    pub fn new(geometry: impl Into<PathBuf>, clusters: impl Into<PathBuf>) -> Self {
        Self { geometry: geometry.into(), clusters: clusters.into() }
    }

    /// Read both sources with the column layout in `config`.
    pub fn load(&self, config: &LinkConfig) -> Result<(Vec<GeometryRecord>, ClusterTable)> {
        let geoms = load_geometry(&self.geometry, &config.geometry)?;
        let clusters = load_clusters(&self.clusters, &config.clusters)?;
        Ok((geoms, clusters))
    }

    /// Load both sources and assemble them into a dataset.
    pub fn assemble(&self, config: &LinkConfig) -> Result<Dataset> {
        config.validate()?;
        let (geoms, clusters) = self.load(config)?;
        assemble(&geoms, &clusters, config.cutoff)
    }
}

/// Load administrative boundaries from a shapefile (`.shp`) or GeoJSON
/// (`.geojson`, `.json`) file.
pub fn load_geometry(path: &Path, columns: &GeometryColumns) -> Result<Vec<GeometryRecord>> {
    let kind = SourceKind::Geometry;
    ensure_present(kind, path)?;

    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let records = match extension.as_deref() {
        Some("shp") => io::shp::read_shapefile(path, columns),
        Some("geojson" | "json") => io::geojson::read_geojson(path, columns),
        other => Err(anyhow::anyhow!("unsupported geometry file extension {:?}", other.unwrap_or(""))),
    }
    .map_err(|e| unreadable(kind, path, e))?;

    info!("[dataset::sources] loaded {} geometry records from {}", records.len(), path.display());
    Ok(records)
}

/// Load the clustering-result table from a CSV file (`.csv`) or the first
/// sheet of an Excel workbook (`.xlsx`, `.xls`, `.xlsb`, `.ods`).
pub fn load_clusters(path: &Path, columns: &ClusterColumns) -> Result<ClusterTable> {
    let kind = SourceKind::Clusters;
    ensure_present(kind, path)?;

    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let df = match extension.as_deref() {
        Some("xlsx" | "xls" | "xlsb" | "ods") => io::xlsx::read_xlsx(path),
        _ => io::csv::read_csv(path),
    };
    let table = df
        .and_then(|df| io::csv::read_cluster_table(&df, columns))
        .map_err(|e| unreadable(kind, path, e))?;

    info!(
        "[dataset::sources] loaded {} cluster records ({} value columns) from {}",
        table.len(), table.schema().len(), path.display()
    );
    Ok(table)
}

/// Build a cluster table from CSV text already in memory.
pub fn clusters_from_csv_str(csv: &str, columns: &ClusterColumns) -> Result<ClusterTable> {
    let df = io::csv::read_csv_string(csv)?;
    io::csv::read_cluster_table(&df, columns)
}

fn ensure_present(kind: SourceKind, path: &Path) -> Result<(), SourceError> {
    common::require_file_exists(path)
        .map_err(|_| SourceError::NotFound { kind, path: path.to_path_buf() })
}

pub(crate) fn unreadable(kind: SourceKind, path: &Path, error: anyhow::Error) -> SourceError {
    SourceError::Unreadable { kind, path: path.to_path_buf(), reason: format!("{error:#}") }
}
