//! GeoJSON geometry reading and writing.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Value};

use crate::{common, config::GeometryColumns, record::GeometryRecord};

/// Reads Polygon/MultiPolygon features and their name properties from a FeatureCollection.
pub(crate) fn read_geojson(path: &Path, columns: &GeometryColumns) -> Result<Vec<GeometryRecord>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("[io::geojson] Failed to open GeoJSON file: {}", path.display()))?;
    read_geojson_bytes(&bytes, columns)
}

pub(crate) fn read_geojson_bytes(bytes: &[u8], columns: &GeometryColumns) -> Result<Vec<GeometryRecord>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::geojson] Failed to parse GeoJSON")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] Expected a FeatureCollection with a features array"))?;

    features.iter().enumerate()
        .map(|(index, feature)| {
            let shape = parse_geometry(&feature["geometry"])
                .with_context(|| format!("[io::geojson] Invalid geometry in feature #{}", index))?;
            let properties = &feature["properties"];
            Ok(GeometryRecord::new(
                index,
                string_property(properties, &columns.name),
                string_property(properties, &columns.parent),
                shape,
            ))
        })
        .collect()
}

/// Convert geo::MultiPolygon<f64> to a GeoJSON MultiPolygon geometry.
pub(crate) fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    let ring = |ls: &LineString<f64>| ls.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>();
    let polygons: Vec<Vec<Vec<Vec<f64>>>> = mp.0.iter()
        .map(|polygon| std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(ring)
            .collect())
        .collect();
    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

fn string_property(properties: &Value, key: &str) -> Option<String> {
    match &properties[key] {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coords = &geometry["coordinates"];
    match geometry["type"].as_str() {
        Some("Polygon") => Ok(MultiPolygon(vec![parse_polygon(coords)?])),
        Some("MultiPolygon") => Ok(MultiPolygon(
            as_array(coords, "polygon list")?.iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>>>()?,
        )),
        Some(other) => bail!("unsupported geometry type {:?}", other),
        None => bail!("missing geometry type"),
    }
}

/// Parse `[exterior, hole, hole, ...]` into a polygon.
fn parse_polygon(rings: &Value) -> Result<Polygon<f64>> {
    let mut rings = as_array(rings, "ring list")?.iter().map(parse_ring);
    let exterior = rings.next().ok_or_else(|| anyhow!("polygon has no exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse `[[x, y], [x, y], ...]` into a closed ring.
fn parse_ring(positions: &Value) -> Result<LineString<f64>> {
    let coords = as_array(positions, "ring")?.iter()
        .map(|position| match position.as_array().map(Vec::as_slice) {
            Some([x, y, ..]) => Ok(Coord {
                x: x.as_f64().ok_or_else(|| anyhow!("x must be a number"))?,
                y: y.as_f64().ok_or_else(|| anyhow!("y must be a number"))?,
            }),
            _ => bail!("position must hold at least two numbers"),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(LineString(common::closed_ring(coords)))
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("expected {} array", what))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"NAME_1": "Aceh", "NAME_2": "Aceh Besar"},
                "geometry": {"type": "Polygon", "coordinates": [[[95.0, 5.0], [96.0, 5.0], [96.0, 6.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"NAME_1": "Aceh"},
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                    [[[5, 5], [6, 5], [6, 6], [5, 5]], [[5.2, 5.2], [5.4, 5.2], [5.4, 5.4], [5.2, 5.2]]]
                ]}
            }
        ]
    }"#;

    #[test]
    fn reads_polygons_and_names() {
        let records = read_geojson_bytes(COLLECTION.as_bytes(), &GeometryColumns::default()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name.as_deref(), Some("Aceh Besar"));
        assert_eq!(records[0].key, "ACEH BESAR");
        assert_eq!(records[0].parent.as_deref(), Some("Aceh"));
        assert_eq!(records[0].shape.0.len(), 1);
        assert_eq!(records[0].shape.0[0].exterior().0.len(), 4); // closed on read

        assert_eq!(records[1].name, None);
        assert_eq!(records[1].key, "");
        assert_eq!(records[1].shape.0.len(), 2);
        assert_eq!(records[1].shape.0[1].interiors().len(), 1);
    }

    #[test]
    fn rejects_points() {
        let json = r#"{"features": [{"geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {}}]}"#;
        assert!(read_geojson_bytes(json.as_bytes(), &GeometryColumns::default()).is_err());
    }

    #[test]
    fn writes_standard_coordinates() {
        let records = read_geojson_bytes(COLLECTION.as_bytes(), &GeometryColumns::default()).unwrap();
        let value = multipolygon_to_geojson(&records[1].shape);

        assert_eq!(value["type"], "MultiPolygon");
        assert_eq!(value["coordinates"][1][1][0], json!([5.2, 5.2]));
        assert_eq!(value["coordinates"][0][0].as_array().unwrap().len(), 4);
    }
}
