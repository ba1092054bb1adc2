//! IO module for format-specific reading and writing operations.
//!
//! - `csv` - clustering results in, detail tables out
//! - `xlsx` - clustering results from Excel workbooks
//! - `shp` - administrative boundaries from ESRI shapefiles
//! - `geojson` - administrative boundaries from FeatureCollections, and
//!   geometry encoding for choropleth export

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod shp;
pub(crate) mod xlsx;
