mod cluster;
mod geometry;
mod joined;

pub use cluster::{ClusterRecord, ClusterSchema, ClusterTable, Value, ValueColumn, ValueKind};
pub use geometry::GeometryRecord;
pub use joined::{JoinedRecord, MatchKind};
