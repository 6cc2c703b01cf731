use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gilt_benchmark::engine::evaluation::BenchmarkEngine;
use gilt_benchmark::simulation::synthetic::{generate_gilt_book, BookConfig};

fn target() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 5, 15).unwrap()
}

fn bench_evaluate_60_gilts(c: &mut Criterion) {
    let book = generate_gilt_book(&BookConfig {
        gilt_count: 60,
        seed: Some(7),
        ..Default::default()
    });
    let engine = BenchmarkEngine::default();

    c.bench_function("evaluate_60_gilts", |b| {
        b.iter(|| engine.evaluate(black_box(&book), black_box(target())))
    });
}

fn bench_select_500_gilts(c: &mut Criterion) {
    let book = generate_gilt_book(&BookConfig {
        gilt_count: 500,
        seed: Some(7),
        ..Default::default()
    });
    let engine = BenchmarkEngine::default();

    c.bench_function("select_500_gilts", |b| {
        b.iter(|| engine.select_benchmark(black_box(&book), black_box(target())))
    });
}

fn bench_sweep_one_year(c: &mut Criterion) {
    let book = generate_gilt_book(&BookConfig {
        gilt_count: 60,
        seed: Some(7),
        ..Default::default()
    });
    let engine = BenchmarkEngine::default();
    let from = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap();

    c.bench_function("sweep_one_year_60_gilts", |b| {
        b.iter(|| engine.sweep(black_box(&book), from, to))
    });
}

criterion_group!(
    benches,
    bench_evaluate_60_gilts,
    bench_select_500_gilts,
    bench_sweep_one_year
);
criterion_main!(benches);
