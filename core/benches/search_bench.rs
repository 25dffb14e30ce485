use boolsearch_core::tokenizer::{tokenize, tokenize_query};
use boolsearch_core::{InvertedIndex, Set};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const WORDS: &[&str] = &["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];

fn synthetic_index(docs: usize) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for d in 0..docs {
        let tokens = (0..64)
            .map(|i| WORDS[(d * 7 + i * 3) % WORDS.len()].to_string())
            .filter(|w| (d + w.len()) % 3 != 0)
            .collect();
        index.add_document(format!("doc{d:05}"), tokens);
    }
    index
}

fn bench_set(c: &mut Criterion) {
    let a: Set<u32> = (0..10_000).step_by(2).collect();
    let b: Set<u32> = (0..10_000).step_by(3).collect();
    c.bench_function("set_add_10k", |bench| {
        bench.iter(|| {
            let mut s = Set::new();
            for i in 0..10_000u32 {
                s.add(black_box(i.wrapping_mul(2_654_435_761)));
            }
            s
        })
    });
    c.bench_function("set_union", |bench| bench.iter(|| a.union(black_box(&b))));
    c.bench_function("set_intersection", |bench| bench.iter(|| a.intersection(black_box(&b))));
    c.bench_function("set_difference", |bench| bench.iter(|| a.difference(black_box(&b))));
}

fn bench_index(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(200);
    c.bench_function("tokenize_text", |b| b.iter(|| tokenize(black_box(&text))));
    c.bench_function("ingest_1k_docs", |b| b.iter(|| synthetic_index(1_000)));

    let index = synthetic_index(5_000);
    let query = tokenize_query("(alpha OR beta) AND gamma ANDNOT (delta AND theta)");
    c.bench_function("query_5k_docs", |b| b.iter(|| index.query(black_box(&query))));
}

criterion_group!(benches, bench_set, bench_index);
criterion_main!(benches);
