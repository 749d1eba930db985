use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::{BirthTime, Body, Ephemeris, JulianDay, NatalCalculator, TransitCalculator};

fn bench_body_positions(c: &mut Criterion) {
    let ephemeris = Ephemeris::analytic();
    let jd = JulianDay(2_460_000.5);

    c.bench_function("all_body_positions", |b| {
        b.iter(|| {
            Body::ALL
                .iter()
                .map(|body| ephemeris.position(*body, black_box(jd)))
                .collect::<Vec<_>>()
        })
    });
}

fn bench_placidus_houses(c: &mut Criterion) {
    let ephemeris = Ephemeris::analytic();
    let jd = JulianDay(2_460_000.5);

    c.bench_function("placidus_houses", |b| {
        b.iter(|| ephemeris.houses(black_box(jd), black_box(55.75), black_box(37.62)))
    });
}

fn bench_full_chart_and_transits(c: &mut Criterion) {
    let ephemeris = Ephemeris::analytic();
    let date = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
    let time = BirthTime::Known(NaiveTime::from_hms_opt(14, 30, 0).unwrap());
    let natal = NatalCalculator::new(&ephemeris)
        .compute_full_natal_chart(date, time, 55.75, 37.62, "Europe/Moscow")
        .unwrap();
    let target = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    c.bench_function("full_natal_chart", |b| {
        b.iter(|| {
            NatalCalculator::new(&ephemeris).compute_full_natal_chart(
                black_box(date),
                black_box(time),
                55.75,
                37.62,
                "Europe/Moscow",
            )
        })
    });

    c.bench_function("daily_transits", |b| {
        b.iter(|| {
            TransitCalculator::new(&ephemeris).compute_daily_transits(
                black_box(&natal),
                black_box(target),
                "Europe/Moscow",
            )
        })
    });
}

criterion_group!(
    benches,
    bench_body_positions,
    bench_placidus_houses,
    bench_full_chart_and_transits
);
criterion_main!(benches);
