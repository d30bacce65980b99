use criterion::{Criterion, criterion_group, criterion_main};
use pawprint::search::{Catalog, Document, highlight, search, tokenize};
use std::hint::black_box;

fn synthetic_catalog(size: usize) -> Catalog {
    let documents = (0..size)
        .map(|i| Document {
            url: format!("/blog/post-{}", i),
            title: format!("Dog walking tips part {}", i),
            blurb: "Lead training, recall and keeping walks interesting in winter.".to_string(),
            tags: vec!["dog".to_string(), "walking".to_string(), format!("tag{}", i % 7)],
        })
        .collect();
    Catalog::new(documents).unwrap()
}

fn search_benchmark(c: &mut Criterion) {
    let builtin = Catalog::builtin().unwrap();
    let large = synthetic_catalog(500);

    let mut group = c.benchmark_group("search");

    group.bench_function("tokenize", |b| {
        b.iter(|| tokenize(black_box("Dog-walking & cat sitting in Harrogate, 2+ pets")))
    });

    group.bench_function("builtin_catalog", |b| {
        b.iter(|| search(black_box(&builtin), black_box("home boarding for dogs")))
    });

    group.bench_function("synthetic_500", |b| {
        b.iter(|| search(black_box(&large), black_box("winter walking tips")))
    });

    let tokens = tokenize("dog walking");
    group.bench_function("highlight", |b| {
        b.iter(|| highlight(black_box("Dog walking tips for dog owners who love walking"), &tokens))
    });

    group.finish();
}

criterion_group!(benches, search_benchmark);
criterion_main!(benches);
