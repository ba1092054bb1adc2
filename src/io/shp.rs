//! Shapefile reading for administrative boundaries.

use std::path::Path;

use anyhow::{Context, Result, bail};
use geo::Coord;
use shapefile::{dbase::{FieldValue, Record}, Reader, Shape};

use crate::{common, config::GeometryColumns, record::GeometryRecord};

/// Reads every polygon and its name attributes from a `.shp` file (with its `.dbf`).
pub(crate) fn read_shapefile(path: &Path, columns: &GeometryColumns) -> Result<Vec<GeometryRecord>> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    reader.iter_shapes_and_records()
        .enumerate()
        .map(|(index, item)| {
            let (shape, record) = item
                .with_context(|| format!("[io::shp] Error reading shape+record #{}", index))?;
            let shape = match shape {
                Shape::Polygon(polygon) => common::shp_to_geo(&polygon),
                Shape::PolygonZ(polygon) => common::rings_to_geo(polygon.rings(), |pt| Coord { x: pt.x, y: pt.y }),
                Shape::PolygonM(polygon) => common::rings_to_geo(polygon.rings(), |pt| Coord { x: pt.x, y: pt.y }),
                other => bail!("[io::shp] found non-areal shape at record {}: {:?}", index, other.shapetype()),
            };
            Ok(GeometryRecord::new(
                index,
                character_field(&record, &columns.name)?,
                character_field(&record, &columns.parent)?,
                shape,
            ))
        })
        .collect()
}

/// Get the value of a character field from a Record; blank values are missing.
fn character_field(record: &Record, field: &str) -> Result<Option<String>> {
    let text = match record.get(field) {
        Some(FieldValue::Character(value)) => value.as_deref(),
        Some(FieldValue::Memo(value)) => Some(value.as_str()),
        Some(other) => bail!("[io::shp] field {:?} is not a text field: {:?}", field, other),
        None => bail!("[io::shp] missing attribute field {:?}", field),
    };
    Ok(text.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
}
