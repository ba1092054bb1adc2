use std::collections::BTreeMap;

use serde::Serialize;

/// A fuzzy match whose best score was shared by other candidates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyTie {
    pub query: String,
    pub chosen: String,
    pub tied: Vec<String>,
    pub score: f64,
}

/// A geometry record that failed both exact and fuzzy matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedRegion {
    pub index: usize,
    pub name: Option<String>,
    pub parent: Option<String>,
    pub key: String,
}

/// Data-quality counters gathered while assembling a dataset.
///
/// None of these conditions stop assembly; they only explain the nulls in
/// the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkReport {
    pub exact: usize,
    pub fuzzy: usize,
    pub unmatched: Vec<UnmatchedRegion>,
    pub duplicate_keys: Vec<String>,
    pub fuzzy_ties: Vec<FuzzyTie>,
    pub unknown_clusters: BTreeMap<i64, usize>, // cluster id -> affected records
}

impl LinkReport {
    pub fn total(&self) -> usize { self.exact + self.fuzzy + self.unmatched.len() }

    /// Number of records that would render as "unknown".
    pub fn unlabeled(&self) -> usize {
        self.unmatched.len() + self.unknown_clusters.values().sum::<usize>()
    }

    /// Count of every warning-level condition recorded.
    pub fn warnings(&self) -> usize {
        self.unmatched.len()
            + self.duplicate_keys.len()
            + self.fuzzy_ties.len()
            + self.unknown_clusters.values().sum::<usize>()
    }
}
