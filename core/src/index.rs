use crate::query::{self, QueryError};
use crate::score::{self, QueryResult};
use crate::set::Set;
use crate::tokenizer::tokenize_query;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Index guarded by a read-write lock: concurrent queries, exclusive ingestion.
pub type SharedIndex = Arc<RwLock<InvertedIndex>>;

/// Occurrence statistics for one term in one document.
///
/// Postings are ordered and compared by `path` alone, so a term's posting set
/// holds at most one posting per document.
#[derive(Debug, Clone)]
pub struct Posting {
    pub path: Arc<str>,
    pub term_count: u32,
    /// Token count of the whole document at ingestion time.
    pub total_terms: u32,
}

impl Posting {
    pub fn new(path: Arc<str>, term_count: u32, total_terms: u32) -> Self {
        Self { path, term_count, total_terms }
    }

    /// Term frequency: occurrences over document length.
    pub fn tf(&self) -> f64 {
        if self.total_terms == 0 {
            return 0.0;
        }
        self.term_count as f64 / self.total_terms as f64
    }
}

impl PartialEq for Posting {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Posting {}

impl PartialOrd for Posting {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Posting {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl Borrow<str> for Posting {
    fn borrow(&self) -> &str {
        &self.path
    }
}

/// Counts past `u32::MAX` stick at the maximum.
fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[derive(Default)]
pub struct InvertedIndex {
    terms: HashMap<String, Set<Posting>>,
    paths: HashSet<Arc<str>>,
    /// One per `add_document` call; the corpus size N in IDF.
    num_docs: u32,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn into_shared(self) -> SharedIndex {
        Arc::new(RwLock::new(self))
    }

    /// Index `tokens` under `path`. Repeated tokens raise the posting's
    /// `term_count`; an empty token list still counts as a document.
    ///
    /// Each path is meant to be added once; check [`InvertedIndex::has_document`]
    /// first. Adding a path again merges the new counts into its existing
    /// postings but keeps their original `total_terms`, so `tf` of those
    /// postings is no longer bounded by 1.
    pub fn add_document(&mut self, path: impl Into<String>, tokens: Vec<String>) {
        let path: Arc<str> = Arc::from(path.into());
        let total_terms = saturating_u32(tokens.len());

        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for token in tokens {
            let count = tf_counts.entry(token).or_insert(0);
            *count = count.saturating_add(1);
        }
        let distinct = tf_counts.len();

        for (term, count) in tf_counts {
            let postings = self.terms.entry(term).or_default();
            let posting = match postings.take(&*path) {
                Some(mut existing) => {
                    existing.term_count = existing.term_count.saturating_add(count);
                    existing
                }
                None => Posting::new(Arc::clone(&path), count, total_terms),
            };
            postings.add(posting);
        }

        tracing::debug!(path = %path, total_terms, distinct, "added document");
        self.paths.insert(path);
        self.num_docs = self.num_docs.saturating_add(1);
    }

    pub fn has_document(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// The posting set stored for `term`, if the term was ever indexed.
    pub fn postings(&self, term: &str) -> Option<&Set<Posting>> {
        self.terms.get(term)
    }

    /// Evaluate a tokenized boolean query and rank the matching documents.
    /// An empty `Ok` means the query was valid but matched nothing.
    pub fn query<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<QueryResult>, QueryError> {
        let matches = query::evaluate(self, tokens)?;
        let results = score::rank(&matches, self.num_docs);
        tracing::debug!(hits = results.len(), "query evaluated");
        Ok(results)
    }

    /// Same as [`InvertedIndex::query`] for a raw query string.
    pub fn query_str(&self, text: &str) -> Result<Vec<QueryResult>, QueryError> {
        self.query(&tokenize_query(text))
    }
}
