use crate::query::PostingSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub path: String,
    pub score: f64,
}

/// Score every matching posting with tf * ln(N / |matches|) and sort by
/// descending score, ties by ascending path. No matches, no results.
pub fn rank(matches: &PostingSet<'_>, num_docs: u32) -> Vec<QueryResult> {
    if matches.is_empty() {
        return Vec::new();
    }
    let idf = (num_docs as f64 / matches.len() as f64).ln();

    let mut results: Vec<QueryResult> = matches
        .iter()
        .map(|posting| QueryResult { path: posting.path.to_string(), score: posting.tf() * idf })
        .collect();
    results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.path.cmp(&b.path)));
    results
}
