#![doc = "Pangan: links regional clustering results to administrative boundaries for food-security mapping"]
mod category;
mod common;
mod config;
mod dataset;
mod error;
mod io;
mod link;
mod record;

#[doc(inline)]
pub use dataset::{
    assemble, clusters_from_csv_str, load_clusters, load_geometry,
    ClusterSummary, Dataset, DatasetCache, DatasetView, Headline, Share, SourceKey, Sources,
};

#[doc(inline)]
pub use config::{ClusterColumns, GeometryColumns, IndicatorColumns, LinkConfig};

#[doc(inline)]
pub use category::{color, label, CategoryLabel, UNKNOWN_CATEGORY, UNMATCHED_COLOR};

#[doc(inline)]
pub use link::{
    best_match, exact_join, normalize, reconcile, similarity,
    Candidate, ExactJoin, FuzzyTie, LinkReport, Matcher, Reconciled, UnmatchedRegion,
    ADMIN_DESIGNATIONS, DEFAULT_CUTOFF,
};

#[doc(inline)]
pub use record::{
    ClusterRecord, ClusterSchema, ClusterTable, GeometryRecord, JoinedRecord, MatchKind,
    Value, ValueColumn, ValueKind,
};

#[doc(inline)]
pub use error::{SourceError, SourceKind};
