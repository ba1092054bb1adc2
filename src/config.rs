use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::link::DEFAULT_CUTOFF;

/// Attribute fields read from the boundary source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryColumns {
    pub name: String,
    pub parent: String,
}

impl Default for GeometryColumns {
    fn default() -> Self {
        Self { name: "NAME_2".into(), parent: "NAME_1".into() }
    }
}

/// Key columns of the cluster source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterColumns {
    pub name: String,
    pub cluster: String,
    /// Optional explicit category; derived from `cluster` where absent.
    pub category: String,
}

impl Default for ClusterColumns {
    fn default() -> Self {
        Self {
            name: "Kabupaten/Kota".into(),
            cluster: "Cluster".into(),
            category: "Kategori_Ketahanan_Pangan".into(),
        }
    }
}

/// Value columns used by the headline metrics and cluster summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorColumns {
    pub food_security_index: String,
    pub rice_productivity: String,
    pub rice_production: String,
    pub gross_regional_product: String,
}

impl Default for IndicatorColumns {
    fn default() -> Self {
        Self {
            food_security_index: "IKP".into(),
            rice_productivity: "Produktivitas_Padi".into(),
            rice_production: "Produksi_Padi".into(),
            gross_regional_product: "PDRB".into(),
        }
    }
}

/// Everything that shapes how the two sources are read and linked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Minimum similarity for a fuzzy match, in `[0, 1]`.
    pub cutoff: f64,
    pub geometry: GeometryColumns,
    pub clusters: ClusterColumns,
    pub indicators: IndicatorColumns,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            geometry: GeometryColumns::default(),
            clusters: ClusterColumns::default(),
            indicators: IndicatorColumns::default(),
        }
    }
}

impl LinkConfig {
    /// Parse and validate a JSON configuration; omitted fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .context("[config] Failed to parse configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read configuration file: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("[config] Invalid configuration in {}", path.display()))
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.cutoff),
            "[config] cutoff must lie in [0, 1], got {}", self.cutoff
        );
        let required = [
            ("geometry.name", &self.geometry.name),
            ("geometry.parent", &self.geometry.parent),
            ("clusters.name", &self.clusters.name),
            ("clusters.cluster", &self.clusters.cluster),
        ];
        for (field, value) in required {
            ensure!(!value.trim().is_empty(), "[config] {} must not be empty", field);
        }
        Ok(())
    }

    /// Stable text form, used to key cached datasets.
    pub(crate) fn fingerprint(&self) -> Result<String> {
        serde_json::to_string(self).context("[config] Failed to serialize configuration")
    }
}
