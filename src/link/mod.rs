//! Record linkage between boundary records and cluster records.
//!
//! Names on both sides are reduced by [`normalize`], joined exactly with
//! [`exact_join`], and whatever is left is offered to [`reconcile`], which
//! accepts the closest cluster name scoring at least the cutoff.

mod exact;
mod fuzzy;
mod normalize;
mod report;
mod similarity;

pub use exact::{exact_join, ExactJoin};
pub use fuzzy::{best_match, reconcile, Candidate, Reconciled, DEFAULT_CUTOFF};
pub use normalize::{normalize, ADMIN_DESIGNATIONS};
pub use report::{FuzzyTie, LinkReport, UnmatchedRegion};
pub use similarity::{similarity, Matcher};
