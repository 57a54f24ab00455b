//! Benchmarks for the startup computation
//!
//! Run with: cargo bench --package similarity
//!
//! Uses the real ml-latest-small ratings when `../../data/ml-latest-small`
//! exists, a synthetic matrix of the same order of magnitude otherwise.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Catalog, Rating};
use similarity::{NeighborRanker, PopularityRanker, RatingMatrix, SimilarityMatrix};
use std::path::Path;
use std::sync::Arc;

fn load_test_ratings() -> Vec<Rating> {
    let data_dir = Path::new("../../data/ml-latest-small");
    if let Ok(catalog) = Catalog::load_from_files(data_dir) {
        return catalog.ratings().to_vec();
    }

    // ~2000 movies x 600 users, roughly 5% dense
    let mut ratings = Vec::new();
    for movie_id in 1..=2000u32 {
        for user_id in 1..=600u32 {
            if (movie_id * 31 + user_id * 17) % 20 == 0 {
                ratings.push(Rating {
                    user_id,
                    movie_id,
                    rating: ((movie_id + user_id) % 10) as f32 / 2.0 + 0.5,
                    timestamp: 0,
                });
            }
        }
    }
    ratings
}

fn bench_build_rating_matrix(c: &mut Criterion) {
    let ratings = load_test_ratings();

    c.bench_function("build_rating_matrix", |b| {
        b.iter(|| black_box(RatingMatrix::build(black_box(&ratings))))
    });
}

fn bench_compute_similarity(c: &mut Criterion) {
    let matrix = RatingMatrix::build(&load_test_ratings());

    let mut group = c.benchmark_group("similarity");
    group.sample_size(10);
    group.bench_function("compute_similarity", |b| {
        b.iter(|| black_box(SimilarityMatrix::compute(black_box(&matrix))))
    });
    group.finish();
}

fn bench_rankers(c: &mut Criterion) {
    let matrix = RatingMatrix::build(&load_test_ratings());
    let ranker = NeighborRanker::new(Arc::new(SimilarityMatrix::compute(&matrix)));
    let first = matrix.row_index().ids()[0];

    c.bench_function("neighbor_top_k", |b| {
        b.iter(|| black_box(ranker.top_k(black_box(first), 5)))
    });

    c.bench_function("popularity_rank", |b| {
        b.iter(|| black_box(PopularityRanker::new().rank(black_box(&matrix))))
    });
}

criterion_group!(
    benches,
    bench_build_rating_matrix,
    bench_compute_similarity,
    bench_rankers
);
criterion_main!(benches);
