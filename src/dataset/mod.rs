mod assemble;
mod cache;
mod export;
mod sources;
mod view;

use std::{collections::BTreeSet, sync::Arc};

use crate::{link::LinkReport, record::{ClusterSchema, JoinedRecord}};

pub use assemble::assemble;
pub use cache::{DatasetCache, SourceKey};
pub use sources::{clusters_from_csv_str, load_clusters, load_geometry, Sources};
pub use view::{ClusterSummary, DatasetView, Headline, Share};

/// The fully joined, labeled dataset handed to display code.
///
/// Built once per load and read-only afterwards; filtering yields borrowed
/// views rather than modified copies.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Arc<ClusterSchema>,
    records: Vec<JoinedRecord>,
    report: LinkReport,
}

impl Dataset {
    pub(crate) fn new(schema: Arc<ClusterSchema>, records: Vec<JoinedRecord>, report: LinkReport) -> Self {
        Self { schema, records, report }
    }

    pub fn schema(&self) -> &ClusterSchema { &self.schema }

    pub fn records(&self) -> &[JoinedRecord] { &self.records }

    pub fn report(&self) -> &LinkReport { &self.report }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Distinct parent-region names, sorted.
    pub fn parents(&self) -> Vec<&str> {
        self.records.iter()
            .filter_map(JoinedRecord::parent)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// View over every record.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView::new(&self.schema, self.records.iter().collect())
    }

    /// View over the records of one parent region.
    pub fn filter_parent(&self, parent: &str) -> DatasetView<'_> {
        DatasetView::new(
            &self.schema,
            self.records.iter().filter(|record| record.parent() == Some(parent)).collect(),
        )
    }
}
