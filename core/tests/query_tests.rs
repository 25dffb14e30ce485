use boolsearch_core::corpus::index_directory;
use boolsearch_core::{InvertedIndex, QueryError};
use std::fs;
use tempfile::tempdir;

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn corpus() -> InvertedIndex {
    let mut index = InvertedIndex::new();
    index.add_document("doc1", words("x z"));
    index.add_document("doc2", words("y z"));
    index.add_document("doc3", words("x"));
    index
}

fn paths(index: &InvertedIndex, query: &str) -> Vec<String> {
    let mut paths: Vec<String> = index.query_str(query).unwrap().into_iter().map(|r| r.path).collect();
    paths.sort();
    paths
}

#[test]
fn word_query_returns_documents_containing_it() {
    let index = corpus();
    assert_eq!(paths(&index, "x"), vec!["doc1", "doc3"]);
    assert_eq!(paths(&index, "z"), vec!["doc1", "doc2"]);
}

#[test]
fn boolean_operators() {
    let index = corpus();
    assert_eq!(paths(&index, "x AND z"), vec!["doc1"]);
    assert_eq!(paths(&index, "x OR y"), vec!["doc1", "doc2", "doc3"]);
    assert_eq!(paths(&index, "x ANDNOT z"), vec!["doc3"]);
    assert_eq!(paths(&index, "(x OR y) AND z"), vec!["doc1", "doc2"]);
}

#[test]
fn valid_query_with_no_matches_is_empty() {
    let index = corpus();
    assert!(index.query_str("x AND y").unwrap().is_empty());
}

#[test]
fn errors_are_reported() {
    let index = corpus();
    assert_eq!(index.query_str("x AND nothing"), Err(QueryError::UnknownTerm("nothing".into())));
    assert!(matches!(index.query_str("(x AND y"), Err(QueryError::Syntax { .. })));
    assert!(matches!(index.query_str("x OR"), Err(QueryError::Syntax { .. })));
}

#[test]
fn compound_query_words_match_their_parts() {
    let mut index = InvertedIndex::new();
    index.add_document("scan", words("the x ray machine"));
    index.add_document("other", words("the machine"));
    assert_eq!(paths(&index, "x-ray"), vec!["scan"]);
    assert_eq!(paths(&index, "machine ANDNOT x-ray"), vec!["other"]);
}

#[test]
fn query_words_that_never_index_are_unknown() {
    let mut index = InvertedIndex::new();
    index.add_document("a", words("machine"));
    assert_eq!(index.query_str("machine AND 42"), Err(QueryError::UnknownTerm("42".into())));
}

#[test]
fn tf_idf_scores() {
    let mut index = InvertedIndex::new();
    index.add_document("a", words("t u v"));
    index.add_document("b", words("u v"));
    let results = index.query_str("t").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "a");
    assert!((results[0].score - 0.2310).abs() < 1e-4);
}

#[test]
fn results_are_ranked() {
    let mut index = InvertedIndex::new();
    index.add_document("low", words("k a b c d e f g"));
    index.add_document("high", words("k k k a"));
    index.add_document("mid", words("k a b c"));
    index.add_document("none", words("a b"));
    let results = index.query_str("k").unwrap();
    let order: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(order, vec!["high", "mid", "low"]);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn queries_a_directory_corpus() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("rust.txt"), "Rust is a systems language. Rust is fast.").unwrap();
    fs::write(dir.path().join("go.txt"), "Go is a systems language too.").unwrap();
    fs::write(dir.path().join("cooking.txt"), "Pasta is fast food.").unwrap();

    let index = index_directory(dir.path()).unwrap();
    let results = index.query_str("Systems ANDNOT rust").unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].path.ends_with("go.txt"));

    let results = index.query_str("fast AND (rust OR pasta)").unwrap();
    assert_eq!(results.len(), 2);
}
