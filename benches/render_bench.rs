//! Benchmarks for chart rendering
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vetchart::chart::{to_svg, ChartVariant, Selection, Theme, WeightChart};
use vetchart::weight::{SortOrder, WeightEntry, WeightHistory, WeightUnit};

fn create_test_entries(count: usize) -> Vec<WeightEntry> {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
    let units = WeightUnit::all();

    (0..count)
        .map(|i| {
            let unit = units[i % units.len()];
            let kg = 20.0 + (i as f64 * 0.7).sin() * 3.0;
            WeightEntry::new(start + Duration::days(i as i64 * 7), unit.from_kg(kg), unit)
        })
        .collect()
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");

    for size in [10, 100, 1000] {
        let entries = create_test_entries(size);
        group.throughput(Throughput::Elements(size as u64));

        for variant in [ChartVariant::Basic, ChartVariant::Detailed] {
            let chart = WeightChart::default().variant(variant);
            group.bench_function(format!("{}_{}", variant, size), |b| {
                b.iter(|| chart.render(black_box(&entries), SortOrder::Desc).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("svg");

    let sample = WeightHistory::sample();
    let chart = WeightChart::default().theme(Theme::Dark);
    let scene = chart.render(sample.entries(), SortOrder::Asc).unwrap();
    let selection = Selection::at(&scene, 1);

    group.bench_function("sample", |b| b.iter(|| to_svg(black_box(&scene), None)));
    group.bench_function("sample_with_tooltip", |b| {
        b.iter(|| to_svg(black_box(&scene), selection.active()))
    });

    let entries = create_test_entries(1000);
    let scene = chart.render(&entries, SortOrder::Asc).unwrap();
    group.throughput(Throughput::Elements(1000));
    group.bench_function("entries_1000", |b| b.iter(|| to_svg(black_box(&scene), None)));

    group.finish();
}

criterion_group!(benches, bench_scene, bench_svg);
criterion_main!(benches);
