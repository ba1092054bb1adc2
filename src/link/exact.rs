use crate::record::{ClusterTable, GeometryRecord, JoinedRecord};

/// Outcome of the exact-key join: a partition of the geometry records.
#[derive(Debug, Clone, Default)]
pub struct ExactJoin {
    pub matched: Vec<JoinedRecord>,
    pub unmatched: Vec<GeometryRecord>,
}

/// Left-outer join of geometry records onto cluster records by normalized name.
///
/// Every geometry record lands in exactly one side of the result. When several
/// cluster records share a name, the first in source order is used.
pub fn exact_join(geoms: &[GeometryRecord], clusters: &ClusterTable) -> ExactJoin {
    let mut join = ExactJoin::default();
    for geom in geoms {
        match clusters.lookup(&geom.key) {
            Some(cluster) => join.matched.push(JoinedRecord::exact(geom.clone(), cluster.clone())),
            None => join.unmatched.push(geom.clone()),
        }
    }
    join
}
