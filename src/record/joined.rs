use super::{ClusterRecord, GeometryRecord, Value};

/// How a geometry record found (or failed to find) its cluster record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Fuzzy { score: f64 },
    Unmatched,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Fuzzy { .. } => "fuzzy",
            MatchKind::Unmatched => "unmatched",
        }
    }

    /// Similarity between the linked names; exact matches score 1.
    pub fn score(&self) -> Option<f64> {
        match self {
            MatchKind::Exact => Some(1.0),
            MatchKind::Fuzzy { score } => Some(*score),
            MatchKind::Unmatched => None,
        }
    }
}

/// A geometry record with the cluster attributes it was linked to, if any.
///
/// Unmatched records keep their geometry; every cluster field and the
/// category are then absent.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub geometry: GeometryRecord,
    pub cluster: Option<ClusterRecord>,
    pub kind: MatchKind,
    pub category: Option<String>,
}

impl JoinedRecord {
    pub(crate) fn exact(geometry: GeometryRecord, cluster: ClusterRecord) -> Self {
        Self { geometry, cluster: Some(cluster), kind: MatchKind::Exact, category: None }
    }

    pub(crate) fn fuzzy(geometry: GeometryRecord, cluster: ClusterRecord, score: f64) -> Self {
        Self { geometry, cluster: Some(cluster), kind: MatchKind::Fuzzy { score }, category: None }
    }

    pub(crate) fn unmatched(geometry: GeometryRecord) -> Self {
        Self { geometry, cluster: None, kind: MatchKind::Unmatched, category: None }
    }

    pub fn name(&self) -> Option<&str> { self.geometry.name.as_deref() }

    pub fn parent(&self) -> Option<&str> { self.geometry.parent.as_deref() }

    pub fn is_matched(&self) -> bool { self.cluster.is_some() }

    pub fn cluster_id(&self) -> Option<i64> {
        self.cluster.as_ref().and_then(|cluster| cluster.cluster)
    }

    pub fn category(&self) -> Option<&str> { self.category.as_deref() }

    /// Value at schema position `column`, absent when unmatched.
    pub fn value(&self, column: usize) -> Option<&Value> {
        self.cluster.as_ref()
            .and_then(|cluster| cluster.values.get(column))
            .and_then(Option::as_ref)
    }

    /// Numeric value at schema position `column`.
    pub fn number(&self, column: usize) -> Option<f64> {
        self.value(column).and_then(Value::as_f64)
    }
}
