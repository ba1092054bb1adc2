use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    category::{self, UNKNOWN_CATEGORY},
    config::IndicatorColumns,
    record::{ClusterSchema, JoinedRecord},
};

/// Headline metrics for a set of regions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub regions: usize,
    pub matched: usize,
    pub food_security_index_mean: Option<f64>,
    pub rice_productivity_mean: Option<f64>,
    pub rice_production_total: f64,
    pub gross_regional_product_total: f64,
}

/// Aggregates over the regions sharing one cluster id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster: i64,
    pub category: Option<&'static str>,
    pub regions: usize,
    pub food_security_index_mean: Option<f64>,
    pub rice_productivity_mean: Option<f64>,
    pub rice_production_mean: Option<f64>,
    pub gross_regional_product_mean: Option<f64>,
}

/// One slice of the category distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Share {
    pub cluster: i64,
    pub category: &'static str,
    pub color: &'static str,
    pub regions: usize,
}

/// Borrowed selection of dataset records.
#[derive(Debug, Clone)]
pub struct DatasetView<'a> {
    schema: &'a ClusterSchema,
    records: Vec<&'a JoinedRecord>,
}

impl<'a> DatasetView<'a> {
    pub(crate) fn new(schema: &'a ClusterSchema, records: Vec<&'a JoinedRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &'a ClusterSchema { self.schema }

    pub fn records(&self) -> &[&'a JoinedRecord] { &self.records }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn headline(&self, indicators: &IndicatorColumns) -> Headline {
        let records = &self.records;
        Headline {
            regions: records.len(),
            matched: records.iter().filter(|r| r.is_matched()).count(),
            food_security_index_mean: mean(self.numbers(records, &indicators.food_security_index)),
            rice_productivity_mean: mean(self.numbers(records, &indicators.rice_productivity)),
            rice_production_total: self.numbers(records, &indicators.rice_production).iter().sum(),
            gross_regional_product_total: self.numbers(records, &indicators.gross_regional_product).iter().sum(),
        }
    }

    /// Per-cluster aggregates in ascending cluster order; records without a
    /// cluster id are left out.
    pub fn cluster_summary(&self, indicators: &IndicatorColumns) -> Vec<ClusterSummary> {
        let mut groups: BTreeMap<i64, Vec<&JoinedRecord>> = BTreeMap::new();
        for &record in &self.records {
            if let Some(cluster) = record.cluster_id() {
                groups.entry(cluster).or_default().push(record);
            }
        }

        groups.into_iter()
            .map(|(cluster, members)| ClusterSummary {
                cluster,
                category: category::label(Some(cluster)),
                regions: members.len(),
                food_security_index_mean: mean(self.numbers(&members, &indicators.food_security_index)),
                rice_productivity_mean: mean(self.numbers(&members, &indicators.rice_productivity)),
                rice_production_mean: mean(self.numbers(&members, &indicators.rice_production)),
                gross_regional_product_mean: mean(self.numbers(&members, &indicators.gross_regional_product)),
            })
            .collect()
    }

    /// Region counts per category, for the distribution chart.
    pub fn distribution(&self) -> Vec<Share> {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for cluster in self.records.iter().filter_map(|r| r.cluster_id()) {
            *counts.entry(cluster).or_default() += 1;
        }

        counts.into_iter()
            .map(|(cluster, regions)| Share {
                cluster,
                category: category::label(Some(cluster)).unwrap_or(UNKNOWN_CATEGORY),
                color: category::color(Some(cluster)),
                regions,
            })
            .collect()
    }

    /// Present numeric values of `column` across `records`.
    fn numbers(&self, records: &[&JoinedRecord], column: &str) -> Vec<f64> {
        let Some(position) = self.schema.position(column) else { return Vec::new() };
        records.iter().filter_map(|record| record.number(position)).collect()
    }
}

fn mean(values: Vec<f64>) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
