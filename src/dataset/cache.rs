use std::{path::Path, sync::Arc};

use anyhow::Result;
use tracing::info;

use super::{sources::unreadable, Dataset, Sources};
use crate::{
    common,
    config::LinkConfig,
    error::{SourceError, SourceKind},
};

/// Content fingerprint of everything a dataset is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub geometry: String,
    pub clusters: String,
    pub config: String,
}

impl SourceKey {
    /// Hash the source files (a shapefile's `.dbf` included) and the configuration.
    pub fn compute(sources: &Sources, config: &LinkConfig) -> Result<Self> {
        Ok(Self {
            geometry: digest(SourceKind::Geometry, &sources.geometry)?,
            clusters: digest(SourceKind::Clusters, &sources.clusters)?,
            config: config.fingerprint()?,
        })
    }
}

fn digest(kind: SourceKind, path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(SourceError::NotFound { kind, path: path.to_path_buf() }.into());
    }
    common::sha256_files(&common::source_files(path))
        .map_err(|e| unreadable(kind, path, e).into())
}

/// Holds the most recently assembled dataset and reuses it while its sources
/// and configuration are unchanged.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<(SourceKey, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self { Self::default() }

    /// Return the cached dataset when the sources hash the same, else assemble afresh.
    pub fn get_or_assemble(&mut self, sources: &Sources, config: &LinkConfig) -> Result<Arc<Dataset>> {
        let key = SourceKey::compute(sources, config)?;
        if let Some((cached, dataset)) = &self.entry {
            if *cached == key {
                info!("[dataset::cache] reusing dataset for {}", sources.geometry.display());
                return Ok(dataset.clone());
            }
        }

        info!("[dataset::cache] assembling dataset for {}", sources.geometry.display());
        let dataset = Arc::new(sources.assemble(config)?);
        self.entry = Some((key, dataset.clone()));
        Ok(dataset)
    }

    /// Drop the cached dataset so the next request reassembles.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_cached(&self) -> bool { self.entry.is_some() }
}
