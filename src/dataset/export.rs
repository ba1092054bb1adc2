use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, prelude::Column};
use serde_json::{json, Map, Value as JsonValue};

use super::{Dataset, DatasetView};
use crate::{category, io, record::{Value, ValueKind}};

impl DatasetView<'_> {
    /// Detail table: linkage columns followed by every value column of the
    /// cluster source. Unmatched rows hold nulls outside the geometry fields.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let records = self.records();
        let mut columns = vec![
            Column::new("parent".into(), records.iter().map(|r| r.parent()).collect::<Vec<_>>()),
            Column::new("name".into(), records.iter().map(|r| r.name()).collect::<Vec<_>>()),
            Column::new("key".into(), records.iter().map(|r| r.geometry.key.as_str()).collect::<Vec<_>>()),
            Column::new("match".into(), records.iter().map(|r| r.kind.as_str()).collect::<Vec<_>>()),
            Column::new("score".into(), records.iter().map(|r| r.kind.score()).collect::<Vec<_>>()),
            Column::new(
                "cluster_name".into(),
                records.iter()
                    .map(|r| r.cluster.as_ref().and_then(|c| c.name.as_deref()))
                    .collect::<Vec<_>>(),
            ),
            Column::new("cluster".into(), records.iter().map(|r| r.cluster_id()).collect::<Vec<_>>()),
            Column::new("category".into(), records.iter().map(|r| r.category()).collect::<Vec<_>>()),
        ];

        for (position, column) in self.schema().columns().iter().enumerate() {
            let name = column.name.as_str().into();
            columns.push(match column.kind {
                ValueKind::Number => Column::new(
                    name,
                    records.iter().map(|r| r.number(position)).collect::<Vec<_>>(),
                ),
                ValueKind::Text => Column::new(
                    name,
                    records.iter()
                        .map(|r| match r.value(position) {
                            Some(Value::Text(text)) => Some(text.to_string()),
                            Some(Value::Number(n)) => Some(n.to_string()),
                            None => None,
                        })
                        .collect::<Vec<_>>(),
                ),
            });
        }

        DataFrame::new(columns).context("[dataset::export] Failed to build detail table")
    }

    pub fn to_csv_string(&self) -> Result<String> {
        io::csv::write_csv_string(&mut self.to_dataframe()?)
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        io::csv::write_csv(&mut self.to_dataframe()?, path)
    }

    /// Choropleth FeatureCollection; each feature carries its linkage fields,
    /// value columns, and a `fill` colour derived from the cluster id.
    pub fn to_geojson(&self) -> JsonValue {
        let features: Vec<JsonValue> = self.records().iter()
            .map(|record| {
                let mut properties = Map::new();
                properties.insert("parent".into(), json!(record.parent()));
                properties.insert("name".into(), json!(record.name()));
                properties.insert("key".into(), json!(record.geometry.key));
                properties.insert("match".into(), json!(record.kind.as_str()));
                properties.insert("score".into(), json!(record.kind.score()));
                properties.insert("cluster".into(), json!(record.cluster_id()));
                properties.insert("category".into(), json!(record.category()));
                properties.insert("fill".into(), json!(category::color(record.cluster_id())));
                for (position, column) in self.schema().columns().iter().enumerate() {
                    let value = match record.value(position) {
                        Some(Value::Number(n)) => json!(n),
                        Some(Value::Text(text)) => json!(text.as_ref()),
                        None => JsonValue::Null,
                    };
                    properties.insert(column.name.clone(), value);
                }

                json!({
                    "type": "Feature",
                    "properties": properties,
                    "geometry": io::geojson::multipolygon_to_geojson(&record.geometry.shape),
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }

    pub fn write_geojson(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string(&self.to_geojson())
            .context("[dataset::export] Failed to serialize GeoJSON")?;
        std::fs::write(path, text)
            .with_context(|| format!("[dataset::export] Failed to write GeoJSON file: {}", path.display()))
    }
}

impl Dataset {
    /// Detail table over every record.
    pub fn to_dataframe(&self) -> Result<DataFrame> { self.view().to_dataframe() }

    /// Choropleth FeatureCollection over every record.
    pub fn to_geojson(&self) -> JsonValue { self.view().to_geojson() }
}
