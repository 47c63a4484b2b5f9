//! Benchmarks for combination generation and ranking
//!
//! Run with: cargo bench --package packager
//!
//! Uses a synthetic catalog: four categories with 25 offerings each, i.e.
//! 390,625 combinations per request.

use catalog::{Catalog, Offering};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use packager::{PackageRequest, Packager, rank_combinations};

const CATEGORIES: [&str; 4] = ["venue", "buffet", "photography", "music"];

fn build_catalog(per_category: usize) -> Catalog {
    let mut offerings = Vec::with_capacity(CATEGORIES.len() * per_category);
    for (c, category) in CATEGORIES.iter().enumerate() {
        for i in 0..per_category {
            // Deterministic spread of prices and ratings
            let price = 50.0 + ((i * 37 + c * 11) % 97) as f64 * 7.5;
            let rating = ((i + c) % 6) as f64 * 0.8;
            offerings.push(
                Offering::new(*category, price)
                    .with_id(format!("{category}-{i}"))
                    .with_rating(rating),
            );
        }
    }
    Catalog::from_offerings(offerings)
}

fn bench_recommend(c: &mut Criterion) {
    let catalog = build_catalog(25);
    let packager = Packager::default();
    let request = PackageRequest::new(CATEGORIES, 2000.0, "2024-06-01").expect("valid request");

    c.bench_function("recommend_4x25", |b| {
        b.iter(|| {
            let packages = packager.recommend(black_box(&catalog), black_box(&request));
            black_box(packages)
        })
    });
}

fn bench_rank_only(c: &mut Criterion) {
    let catalog = build_catalog(25);
    let pools: Vec<Vec<&Offering>> = CATEGORIES
        .iter()
        .map(|category| catalog.get_offerings_by_category(category))
        .collect();

    c.bench_function("rank_combinations_4x25", |b| {
        b.iter(|| {
            let combinations =
                packager::Combinations::new(pools.iter().map(|p| p.as_slice()).collect());
            black_box(rank_combinations(combinations, black_box(2400.0), 3))
        })
    });
}

criterion_group!(benches, bench_recommend, bench_rank_only);
criterion_main!(benches);
