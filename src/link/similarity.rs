//! Ratcliff/Obershelp ("gestalt pattern matching") similarity.
//!
//! The score between two sequences is `2 * M / T`, where `T` is their total
//! length and `M` counts the elements covered by matching blocks: the longest
//! common block is found first, then the search recurses on the pieces to its
//! left and right. Ties between equally long blocks go to the one starting
//! earliest in the candidate, then earliest in the query.

use std::collections::HashMap;

/// Similarity scorer anchored on one query string.
///
/// The query is indexed once, so scoring many candidates against the same
/// query only walks each candidate.
#[derive(Debug, Clone)]
pub struct Matcher {
    query: Vec<char>,
    positions: HashMap<char, Vec<usize>>, // ascending query positions per char
}

impl Matcher {
    pub fn new(query: &str) -> Self {
        let query: Vec<char> = query.chars().collect();
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in query.iter().enumerate() {
            positions.entry(c).or_default().push(j);
        }
        Self { query, positions }
    }

    /// Similarity ratio of `candidate` against the query, in `[0, 1]`.
    pub fn ratio(&self, candidate: &str) -> f64 {
        let candidate: Vec<char> = candidate.chars().collect();
        ratio_of(self.matching_len(&candidate), candidate.len() + self.query.len())
    }

    /// Score `candidate`, returning `None` when it cannot reach `cutoff`.
    ///
    /// Two cheap upper bounds are checked before the full block search.
    pub fn score(&self, candidate: &str, cutoff: f64) -> Option<f64> {
        let candidate: Vec<char> = candidate.chars().collect();
        let total = candidate.len() + self.query.len();

        if ratio_of(candidate.len().min(self.query.len()), total) < cutoff { return None }
        if ratio_of(self.shared_len(&candidate), total) < cutoff { return None }

        let score = ratio_of(self.matching_len(&candidate), total);
        (score >= cutoff).then_some(score)
    }

    /// Size of the multiset intersection of candidate and query characters.
    fn shared_len(&self, candidate: &[char]) -> usize {
        let mut available: HashMap<char, usize> = HashMap::new();
        candidate.iter()
            .filter(|c| {
                let left = available.entry(**c)
                    .or_insert_with(|| self.positions.get(*c).map_or(0, Vec::len));
                let hit = *left > 0;
                *left = left.saturating_sub(1);
                hit
            })
            .count()
    }

    /// Total length of all matching blocks between candidate and query.
    fn matching_len(&self, candidate: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, candidate.len(), 0, self.query.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_block(candidate, alo, ahi, blo, bhi);
            if k == 0 { continue }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// Longest common block of `a[alo..ahi]` and `query[blo..bhi]` as `(i, j, len)`.
    fn longest_block(&self, a: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);

        // run_end[j] = length of the common run ending at a[i - 1], query[j]
        let mut run_end: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next = HashMap::new();
            for &j in self.positions.get(c).map_or(&[][..], Vec::as_slice) {
                if j < blo { continue }
                if j >= bhi { break }
                let len = j.checked_sub(1)
                    .and_then(|prev| run_end.get(&prev))
                    .copied()
                    .unwrap_or(0) + 1;
                next.insert(j, len);
                if len > best_len {
                    (best_i, best_j, best_len) = (i + 1 - len, j + 1 - len, len);
                }
            }
            run_end = next;
        }

        (best_i, best_j, best_len)
    }
}

/// Similarity of two strings; symmetric only up to block tie-breaking.
pub fn similarity(query: &str, candidate: &str) -> f64 {
    Matcher::new(query).ratio(candidate)
}

fn ratio_of(matches: usize, total: usize) -> f64 {
    if total == 0 { 1.0 } else { 2.0 * matches as f64 / total as f64 }
}
