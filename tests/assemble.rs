use std::{fs, path::Path, sync::Arc};

use pangan::{DatasetCache, LinkConfig, MatchKind, SourceError, SourceKind, Sources};
use serde_json::json;

fn feature(province: &str, name: &str, x: f64) -> serde_json::Value {
    json!({
        "type": "Feature",
        "properties": {"NAME_1": province, "NAME_2": name},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0], [x, 0.0]]],
        },
    })
}

fn write_sources(dir: &Path, regions: &[(&str, &str)], csv: &str) -> Sources {
    let features: Vec<_> = regions.iter().enumerate()
        .map(|(i, (province, name))| feature(province, name, i as f64))
        .collect();
    let geometry = dir.join("regions.geojson");
    let clusters = dir.join("clusters.csv");
    fs::write(&geometry, json!({"type": "FeatureCollection", "features": features}).to_string()).unwrap();
    fs::write(&clusters, csv).unwrap();
    Sources::new(geometry, clusters)
}

const CLUSTERS: &str = "\
Kabupaten/Kota,Cluster,IKP,Produktivitas_Padi,Produksi_Padi,PDRB
ACEH BESAR,0,81.2,55.1,210000,12.5
BANDA ATJEH,5,70.4,,0,30.1
SIAK,3,64.0,48.9,90000,40.0
";

#[test]
fn end_to_end_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let regions = [
        ("Aceh", "Kabupaten Aceh Besar"),
        ("Aceh", "Kota Banda Aceh"),
        ("Aceh", "Pulau Terpencil"),
        ("Riau", "Siak"),
    ];
    let sources = write_sources(dir.path(), &regions, CLUSTERS);
    let dataset = sources.assemble(&LinkConfig::default()).unwrap();

    assert_eq!(dataset.len(), regions.len());

    // Prefix stripped, exact on the normalized name.
    let aceh_besar = &dataset.records()[0];
    assert_eq!(aceh_besar.kind, MatchKind::Exact);
    assert_eq!(aceh_besar.category(), Some("Sangat Tahan"));

    // Spelling variant reconciled above the cutoff, fields copied.
    let banda_aceh = &dataset.records()[1];
    assert!(matches!(banda_aceh.kind, MatchKind::Fuzzy { score } if score >= 0.75));
    assert_eq!(banda_aceh.cluster_id(), Some(5));
    assert_eq!(banda_aceh.category(), Some("Sangat Rentan"));

    // No similar name: kept, with nothing attached.
    let remote = &dataset.records()[2];
    assert_eq!(remote.kind, MatchKind::Unmatched);
    assert_eq!(remote.cluster_id(), None);
    assert_eq!(remote.category(), None);
    assert_eq!(remote.name(), Some("Pulau Terpencil"));

    let report = dataset.report();
    assert_eq!((report.exact, report.fuzzy, report.unmatched.len()), (2, 1, 1));
    assert!(report.duplicate_keys.is_empty());
}

#[test]
fn kota_suffix_row_joins_kota_prefixed_region() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "\
Kabupaten/Kota,Cluster,IKP,Produktivitas_Padi,Produksi_Padi,PDRB
PIDIE,2,66.3,50.2,180000,9.8
BANDA ACEH KOTA,1,74.9,,0,28.4
";
    let regions = [("Aceh", "Kota Banda Aceh"), ("Aceh", "Pidie")];
    let sources = write_sources(dir.path(), &regions, csv);
    let config = LinkConfig::default();
    let dataset = sources.assemble(&config).unwrap();

    assert_eq!(dataset.len(), regions.len());

    // KOTA is removed wherever it appears, so both sides reduce to BANDA ACEH.
    let banda_aceh = &dataset.records()[0];
    assert_eq!(banda_aceh.kind, MatchKind::Exact);
    assert_eq!(banda_aceh.geometry.key, "BANDA ACEH");
    assert_eq!(banda_aceh.cluster.as_ref().and_then(|c| c.name.as_deref()), Some("BANDA ACEH KOTA"));
    assert_eq!(banda_aceh.cluster_id(), Some(1));
    assert_eq!(banda_aceh.category(), Some("Agak Tahan"));

    let schema = dataset.schema();
    let ikp = schema.position(&config.indicators.food_security_index).unwrap();
    let productivity = schema.position(&config.indicators.rice_productivity).unwrap();
    let grp = schema.position(&config.indicators.gross_regional_product).unwrap();
    assert_eq!(banda_aceh.number(ikp), Some(74.9));
    assert_eq!(banda_aceh.number(productivity), None);
    assert_eq!(banda_aceh.number(grp), Some(28.4));

    assert_eq!(dataset.records()[1].cluster_id(), Some(2));
    assert_eq!(dataset.report().unmatched.len(), 0);
}

#[test]
fn duplicate_names_take_first_row_every_run() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "Kabupaten/Kota,Cluster\nACEH BESAR,2\nKabupaten Aceh Besar,4\n";
    let sources = write_sources(dir.path(), &[("Aceh", "Aceh Besar")], csv);
    let config = LinkConfig::default();

    for _ in 0..3 {
        let dataset = sources.assemble(&config).unwrap();
        assert_eq!(dataset.records()[0].cluster_id(), Some(2));
        assert_eq!(dataset.records()[0].category(), Some("Agak Rentan"));
        assert_eq!(dataset.report().duplicate_keys, ["ACEH BESAR"]);
    }
}

#[test]
fn missing_cluster_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), &[("Riau", "Siak")], CLUSTERS);
    fs::remove_file(&sources.clusters).unwrap();

    let err = sources.assemble(&LinkConfig::default()).unwrap_err();
    let source = err.downcast_ref::<SourceError>().unwrap();
    assert!(matches!(source, SourceError::NotFound { .. }));
    assert_eq!(source.kind(), SourceKind::Clusters);
}

#[test]
fn cluster_file_without_name_column_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), &[("Riau", "Siak")], "Nama,Cluster\nSIAK,3\n");

    let err = sources.assemble(&LinkConfig::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SourceError>(),
        Some(SourceError::Unreadable { kind: SourceKind::Clusters, .. })
    ));
}

#[test]
fn stricter_cutoff_leaves_variant_unmatched() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), &[("Aceh", "Kota Banda Aceh")], CLUSTERS);

    let dataset = sources.assemble(&LinkConfig::default().with_cutoff(0.95)).unwrap();
    assert_eq!(dataset.records()[0].kind, MatchKind::Unmatched);
    assert_eq!(dataset.len(), 1);
}

#[test]
fn province_summary_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let regions = [("Aceh", "Aceh Besar"), ("Aceh", "Banda Aceh"), ("Riau", "Siak")];
    let sources = write_sources(dir.path(), &regions, CLUSTERS);
    let config = LinkConfig::default();
    let dataset = sources.assemble(&config).unwrap();

    assert_eq!(dataset.parents(), ["Aceh", "Riau"]);

    let riau = dataset.filter_parent("Riau");
    let headline = riau.headline(&config.indicators);
    assert_eq!(headline.regions, 1);
    assert_eq!(headline.food_security_index_mean, Some(64.0));
    assert_eq!(headline.rice_production_total, 90000.0);

    let shares = dataset.view().distribution();
    assert_eq!(shares.iter().map(|s| s.regions).sum::<usize>(), 3);

    let csv_path = dir.path().join("detail.csv");
    riau.write_csv(&csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().next().unwrap().ends_with("IKP,Produktivitas_Padi,Produksi_Padi,PDRB"));

    let collection = dataset.to_geojson();
    assert_eq!(collection["features"].as_array().unwrap().len(), 3);
    assert_eq!(collection["features"][2]["properties"]["category"], "Rentan");
}

#[test]
fn cache_reuses_until_cluster_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let sources = write_sources(dir.path(), &[("Riau", "Siak")], CLUSTERS);
    let config = LinkConfig::default();
    let mut cache = DatasetCache::new();

    let first = cache.get_or_assemble(&sources, &config).unwrap();
    assert!(Arc::ptr_eq(&first, &cache.get_or_assemble(&sources, &config).unwrap()));

    fs::write(&sources.clusters, "Kabupaten/Kota,Cluster\nSIAK,1\n").unwrap();
    let updated = cache.get_or_assemble(&sources, &config).unwrap();
    assert_eq!(updated.records()[0].category(), Some("Agak Tahan"));
}
