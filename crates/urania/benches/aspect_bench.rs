use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::{AspectCalculator, Body};

fn spread_positions(offset: f64) -> Vec<(Body, f64)> {
    Body::ALL
        .iter()
        .enumerate()
        .map(|(i, body)| (*body, (offset + i as f64 * 31.7) % 360.0))
        .collect()
}

fn bench_match_separation(c: &mut Criterion) {
    let calculator = AspectCalculator::new();

    c.bench_function("match_separation", |b| {
        b.iter(|| calculator.match_separation(black_box(92.5)).count())
    });
}

fn bench_natal_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let positions = spread_positions(0.0);

    c.bench_function("find_aspects_natal", |b| {
        b.iter(|| calculator.find_aspects(black_box(&positions)))
    });
}

fn bench_transit_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let natal = spread_positions(0.0);
    let transits = spread_positions(47.3);

    c.bench_function("find_cross_aspects_transit", |b| {
        b.iter(|| calculator.find_cross_aspects(black_box(&transits), black_box(&natal)))
    });
}

criterion_group!(
    benches,
    bench_match_separation,
    bench_natal_aspects,
    bench_transit_aspects
);
criterion_main!(benches);
