use tracing::{debug, warn};

use super::{report::FuzzyTie, similarity::Matcher};
use crate::record::{ClusterRecord, ClusterTable, GeometryRecord, JoinedRecord};

/// Default minimum similarity for accepting a fuzzy match.
pub const DEFAULT_CUTOFF: f64 = 0.75;

/// Best cluster candidate for one name.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub record: &'a ClusterRecord,
    pub score: f64,
    pub tied: Vec<&'a str>, // Other distinct keys reaching the same score
}

/// Outcome of fuzzy reconciliation over the records the exact join missed.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub matched: Vec<JoinedRecord>,
    pub unmatched: Vec<GeometryRecord>,
    pub ties: Vec<FuzzyTie>,
}

/// Highest-scoring cluster candidate for `key` with score at least `cutoff`.
///
/// Candidates are the distinct cluster keys in source order; the first one to
/// reach the best score wins. Empty keys never match.
pub fn best_match<'a>(key: &str, clusters: &'a ClusterTable, cutoff: f64) -> Option<Candidate<'a>> {
    if key.is_empty() { return None }

    let matcher = Matcher::new(key);
    let mut best: Option<Candidate<'a>> = None;

    for record in clusters.candidates() {
        let Some(score) = matcher.score(&record.key, cutoff) else { continue };
        let replace = match &best {
            None => true,
            Some(current) => score > current.score,
        };
        if replace {
            best = Some(Candidate { record, score, tied: Vec::new() });
        } else if let Some(current) = best.as_mut() {
            if score == current.score {
                current.tied.push(&record.key);
            }
        }
    }

    best
}

/// Link each unmatched geometry record to its closest cluster record.
///
/// Records without a candidate at or above `cutoff` pass through unchanged.
/// Only the given records are consulted; exact matches are never revisited.
pub fn reconcile(unmatched: Vec<GeometryRecord>, clusters: &ClusterTable, cutoff: f64) -> Reconciled {
    let mut result = Reconciled::default();

    for geom in unmatched {
        let Some(candidate) = best_match(&geom.key, clusters, cutoff) else {
            result.unmatched.push(geom);
            continue;
        };

        debug!(
            "[link::fuzzy] {:?} -> {:?} (score {:.3})",
            geom.key, candidate.record.key, candidate.score
        );
        if !candidate.tied.is_empty() {
            warn!(
                "[link::fuzzy] {:?} tied at {:.3} between {:?} and {:?}; keeping the first",
                geom.key, candidate.score, candidate.record.key, candidate.tied
            );
            result.ties.push(FuzzyTie {
                query: geom.key.clone(),
                chosen: candidate.record.key.clone(),
                tied: candidate.tied.iter().map(|key| key.to_string()).collect(),
                score: candidate.score,
            });
        }

        result.matched.push(JoinedRecord::fuzzy(geom, candidate.record.clone(), candidate.score));
    }

    result
}
