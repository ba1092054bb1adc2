use anyhow::{Result, ensure};
use tracing::{debug, info, warn};

use super::Dataset;
use crate::{
    category,
    link::{exact_join, reconcile, ExactJoin, LinkReport, Reconciled, UnmatchedRegion},
    record::{ClusterTable, GeometryRecord, JoinedRecord},
};

/// Join geometry records to cluster records and label the result.
///
/// Exact matches on normalized names are taken first; the remainder go through
/// fuzzy reconciliation at `cutoff`; finally every record lacking a category is
/// labeled from its cluster id. The result holds exactly one record per input
/// geometry record, in geometry source order.
pub fn assemble(geoms: &[GeometryRecord], clusters: &ClusterTable, cutoff: f64) -> Result<Dataset> {
    ensure!(
        (0.0..=1.0).contains(&cutoff),
        "[dataset::assemble] cutoff must lie in [0, 1], got {}", cutoff
    );

    let mut report = LinkReport::default();
    for key in clusters.duplicates() {
        warn!("[dataset::assemble] cluster name {:?} appears more than once; using the first row", key);
    }
    report.duplicate_keys = clusters.duplicates().to_vec();

    let ExactJoin { matched: exact, unmatched } = exact_join(geoms, clusters);
    debug!("[dataset::assemble] exact join: {} matched, {} left", exact.len(), unmatched.len());

    let Reconciled { matched: fuzzy, unmatched: remaining, ties } = reconcile(unmatched, clusters, cutoff);
    debug!("[dataset::assemble] fuzzy join: {} matched, {} left", fuzzy.len(), remaining.len());

    report.exact = exact.len();
    report.fuzzy = fuzzy.len();
    report.fuzzy_ties = ties;
    for geom in &remaining {
        warn!("[dataset::assemble] no cluster record for {:?} ({:?})", geom.display_name(), geom.key);
        report.unmatched.push(UnmatchedRegion {
            index: geom.index,
            name: geom.name.clone(),
            parent: geom.parent.clone(),
            key: geom.key.clone(),
        });
    }

    let mut records: Vec<JoinedRecord> = exact.into_iter()
        .chain(fuzzy)
        .chain(remaining.into_iter().map(JoinedRecord::unmatched))
        .map(|record| with_category(record, &mut report))
        .collect();
    records.sort_by_key(|record| record.geometry.index);

    ensure!(
        records.len() == geoms.len(),
        "[dataset::assemble] produced {} records from {} geometry records",
        records.len(), geoms.len()
    );
    info!(
        "[dataset::assemble] {} records: {} exact, {} fuzzy, {} unmatched",
        records.len(), report.exact, report.fuzzy, report.unmatched.len()
    );

    Ok(Dataset::new(clusters.schema().clone(), records, report))
}

/// Fill the category of a record that has none from its cluster id.
///
/// An explicit category from the cluster source is never overwritten.
fn with_category(mut record: JoinedRecord, report: &mut LinkReport) -> JoinedRecord {
    if record.category.is_some() { return record }

    let explicit = record.cluster.as_ref().and_then(|cluster| cluster.category.clone());
    record.category = match explicit {
        Some(category) => Some(category),
        None => {
            let cluster = record.cluster_id();
            let label = category::label(cluster);
            if let (Some(id), None) = (cluster, label) {
                warn!(
                    "[dataset::assemble] unknown cluster id {} for {:?}; leaving category empty",
                    id, record.geometry.display_name()
                );
                *report.unknown_clusters.entry(id).or_default() += 1;
            }
            label.map(str::to_string)
        }
    };
    record
}

#[cfg(test)]
mod tests {
    use geo::MultiPolygon;

    use super::*;
    use crate::record::{ClusterRecord, ClusterSchema, MatchKind};

    fn geom(index: usize, name: &str, parent: &str) -> GeometryRecord {
        GeometryRecord::new(index, Some(name.into()), Some(parent.into()), MultiPolygon(vec![]))
    }

    fn cluster(row: usize, name: &str, id: Option<i64>, category: Option<&str>) -> ClusterRecord {
        ClusterRecord::new(row, Some(name.into()), id, category.map(str::to_string), vec![])
    }

    fn table(records: Vec<ClusterRecord>) -> ClusterTable {
        ClusterTable::new(ClusterSchema::default(), records).unwrap()
    }

    #[test]
    fn keeps_one_record_per_geometry_in_source_order() {
        let geoms = vec![
            geom(0, "Pulau Terpencil", "Aceh"),
            geom(1, "Kota Banda Aceh", "Aceh"),
            geom(2, "Kabupaten Aceh Besar", "Aceh"),
            geom(3, "Kabupaten Aceh Besar", "Aceh"),
        ];
        let clusters = table(vec![cluster(0, "ACEH BESAR", Some(0), None), cluster(1, "BANDA ATJEH", Some(5), None)]);

        let dataset = assemble(&geoms, &clusters, 0.75).unwrap();
        assert_eq!(dataset.len(), geoms.len());
        let indices: Vec<_> = dataset.records().iter().map(|r| r.geometry.index).collect();
        assert_eq!(indices, [0, 1, 2, 3]);

        let kinds: Vec<_> = dataset.records().iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, ["unmatched", "fuzzy", "exact", "exact"]);
        assert_eq!(dataset.records()[1].category(), Some("Sangat Rentan"));
        assert_eq!(dataset.records()[2].category(), Some("Sangat Tahan"));

        let report = dataset.report();
        assert_eq!((report.exact, report.fuzzy, report.unmatched.len()), (2, 1, 1));
        assert_eq!(report.total(), geoms.len());
    }

    #[test]
    fn unmatched_records_have_no_cluster_fields() {
        let geoms = vec![geom(0, "Pulau Terpencil", "Aceh")];
        let dataset = assemble(&geoms, &table(vec![cluster(0, "SIAK", Some(1), None)]), 0.75).unwrap();

        let record = &dataset.records()[0];
        assert_eq!(record.kind, MatchKind::Unmatched);
        assert_eq!(record.cluster_id(), None);
        assert_eq!(record.category(), None);
        assert_eq!(dataset.report().unmatched[0].key, "PULAU TERPENCIL");
    }

    #[test]
    fn explicit_category_wins_over_derived_label() {
        let geoms = vec![geom(0, "Siak", "Riau"), geom(1, "Pidie", "Aceh")];
        let clusters = table(vec![
            cluster(0, "SIAK", Some(0), Some("Tahan")),
            cluster(1, "PIDIE", Some(3), None),
        ]);

        let dataset = assemble(&geoms, &clusters, 0.75).unwrap();
        assert_eq!(dataset.records()[0].category(), Some("Tahan"));
        assert_eq!(dataset.records()[1].category(), Some("Rentan"));

        // Re-labeling an assembled record leaves it untouched.
        let mut report = LinkReport::default();
        let relabeled = with_category(dataset.records()[0].clone(), &mut report);
        assert_eq!(relabeled.category(), Some("Tahan"));
    }

    #[test]
    fn unknown_cluster_id_is_counted_not_fatal() {
        let geoms = vec![geom(0, "Siak", "Riau"), geom(1, "Kampar", "Riau")];
        let clusters = table(vec![cluster(0, "SIAK", Some(6), None), cluster(1, "KAMPAR", None, None)]);

        let dataset = assemble(&geoms, &clusters, 0.75).unwrap();
        assert_eq!(dataset.records()[0].cluster_id(), Some(6));
        assert_eq!(dataset.records()[0].category(), None);
        assert_eq!(dataset.records()[1].category(), None);
        assert_eq!(dataset.report().unknown_clusters.get(&6), Some(&1));
        assert_eq!(dataset.report().unknown_clusters.len(), 1);
    }

    #[test]
    fn duplicate_cluster_names_are_reported() {
        let geoms = vec![geom(0, "Aceh Besar", "Aceh")];
        let clusters = table(vec![cluster(0, "ACEH BESAR", Some(2), None), cluster(1, "Aceh Besar", Some(4), None)]);

        let first = assemble(&geoms, &clusters, 0.75).unwrap();
        let second = assemble(&geoms, &clusters, 0.75).unwrap();
        assert_eq!(first.records()[0].cluster_id(), Some(2));
        assert_eq!(first.records(), second.records());
        assert_eq!(first.report().duplicate_keys, ["ACEH BESAR"]);
    }

    #[test]
    fn rejects_invalid_cutoff() {
        assert!(assemble(&[], &table(vec![]), 1.2).is_err());
    }

    #[test]
    fn empty_inputs_give_empty_dataset() {
        let dataset = assemble(&[], &table(vec![]), 0.75).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.report(), &LinkReport::default());
    }
}
