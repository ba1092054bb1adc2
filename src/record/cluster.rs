use std::{collections::{HashMap, HashSet, hash_map::Entry}, sync::Arc};

use anyhow::{Result, ensure};

use crate::link::normalize;

/// A value carried over from a non-key column of the cluster source.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(Arc<str>),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind { Number, Text }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueColumn {
    pub name: String,
    pub kind: ValueKind,
}

impl ValueColumn {
    pub fn number(name: impl Into<String>) -> Self { Self { name: name.into(), kind: ValueKind::Number } }

    pub fn text(name: impl Into<String>) -> Self { Self { name: name.into(), kind: ValueKind::Text } }
}

/// Ordered value columns shared by every record of one cluster source
/// (food-security index, rice productivity, and so on).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSchema {
    columns: Vec<ValueColumn>,
}

impl ClusterSchema {
    pub fn new(columns: Vec<ValueColumn>) -> Self { Self { columns } }

    pub fn columns(&self) -> &[ValueColumn] { &self.columns }

    pub fn len(&self) -> usize { self.columns.len() }

    pub fn is_empty(&self) -> bool { self.columns.is_empty() }

    /// Position of the column called `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

/// One row of the clustering result.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRecord {
    pub row: usize,                  // Position in the cluster source
    pub name: Option<String>,        // Raw place name
    pub key: String,                 // Normalized place name
    pub cluster: Option<i64>,        // Cluster identifier
    pub category: Option<String>,    // Explicit category, when the source carries one
    pub values: Vec<Option<Value>>,  // Aligned with ClusterSchema::columns
}

impl ClusterRecord {
    pub fn new(
        row: usize,
        name: Option<String>,
        cluster: Option<i64>,
        category: Option<String>,
        values: Vec<Option<Value>>,
    ) -> Self {
        let key = normalize(name.as_deref());
        Self { row, name, key, cluster, category, values }
    }
}

/// Cluster records plus the lookup structures both join stages read from.
///
/// Records sharing a normalized name resolve to the first one in source
/// order; records with an empty name are never joinable.
#[derive(Debug, Clone)]
pub struct ClusterTable {
    schema: Arc<ClusterSchema>,
    records: Vec<ClusterRecord>,
    index: HashMap<String, usize>, // key -> first record with that key
    distinct: Vec<usize>,          // first record per key, in source order
    duplicates: Vec<String>,       // keys seen more than once
}

impl ClusterTable {
    pub fn new(schema: ClusterSchema, records: Vec<ClusterRecord>) -> Result<Self> {
        let mut index = HashMap::new();
        let mut distinct = Vec::new();
        let mut duplicates = Vec::new();
        let mut reported = HashSet::new();

        for (i, record) in records.iter().enumerate() {
            ensure!(
                record.values.len() == schema.len(),
                "[record::cluster] row {} has {} values, expected {}",
                record.row, record.values.len(), schema.len()
            );
            if record.key.is_empty() { continue }
            match index.entry(record.key.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(i);
                    distinct.push(i);
                }
                Entry::Occupied(_) => {
                    if reported.insert(record.key.as_str()) {
                        duplicates.push(record.key.clone());
                    }
                }
            }
        }

        Ok(Self { schema: Arc::new(schema), records, index, distinct, duplicates })
    }

    pub fn schema(&self) -> &Arc<ClusterSchema> { &self.schema }

    pub fn records(&self) -> &[ClusterRecord] { &self.records }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// First record whose normalized name equals `key`.
    pub fn lookup(&self, key: &str) -> Option<&ClusterRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    /// One record per distinct non-empty key, in source order.
    pub fn candidates(&self) -> impl Iterator<Item = &ClusterRecord> + '_ {
        self.distinct.iter().map(|&i| &self.records[i])
    }

    /// Normalized names shared by more than one record.
    pub fn duplicates(&self) -> &[String] { &self.duplicates }
}
