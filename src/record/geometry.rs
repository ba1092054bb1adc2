use std::sync::Arc;

use geo::MultiPolygon;

use crate::link::normalize;

/// One administrative sub-region from the boundary source.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    pub index: usize,           // Position in the geometry source
    pub name: Option<String>,   // Raw place name
    pub key: String,            // Normalized place name
    pub parent: Option<String>, // Top-level division (province)
    pub shape: Arc<MultiPolygon<f64>>,
}

impl GeometryRecord {
    pub fn new(index: usize, name: Option<String>, parent: Option<String>, shape: MultiPolygon<f64>) -> Self {
        let key = normalize(name.as_deref());
        Self { index, name, key, parent, shape: Arc::new(shape) }
    }

    /// Label for logs and reports: the raw name, or the source position when unnamed.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", self.index),
        }
    }
}
