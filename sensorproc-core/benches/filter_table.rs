//! Per-call cost of the two hot paths a tick handler runs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sensorproc_core::{time::MockTimeSource, FilterConfig, SampleTable, ValueFilter};

fn bench_filter(c: &mut Criterion) {
    let clock = MockTimeSource::new(0);
    let mut filter = ValueFilter::new(FilterConfig::new(10, 60, 0.1), &clock);
    let mut raw = 20.0_f64;

    c.bench_function("filter_f64", |b| {
        b.iter(|| {
            raw = if raw > 21.0 { 20.0 } else { raw + 0.013 };
            clock.advance(100);
            let mut value = black_box(raw);
            black_box(filter.filter(&mut value))
        })
    });

    let mut count = 1000_i32;
    c.bench_function("filter_i32", |b| {
        b.iter(|| {
            count = if count > 1100 { 1000 } else { count + 7 };
            let mut value = black_box(count);
            black_box(filter.filter(&mut value))
        })
    });
}

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpol");

    for size in [4usize, 16, 64] {
        let xs: Vec<f64> = (0..size).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 100.0 - x * x).collect();
        let span = (size - 1) as f64;

        match size {
            4 => bench_table_size::<4>(&mut group, &xs, &ys, span),
            16 => bench_table_size::<16>(&mut group, &xs, &ys, span),
            _ => bench_table_size::<64>(&mut group, &xs, &ys, span),
        }
    }

    group.finish();
}

fn bench_table_size<const N: usize>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    xs: &[f64],
    ys: &[f64],
    span: f64,
) {
    let table: SampleTable<f64, N> = SampleTable::new(xs, ys, true);
    let mut x = 0.0;
    group.bench_with_input(BenchmarkId::from_parameter(N), &table, |b, table| {
        b.iter(|| {
            x = if x > span { -0.5 } else { x + 0.37 };
            black_box(table.interpol(black_box(x)))
        })
    });
}

criterion_group!(benches, bench_filter, bench_table);
criterion_main!(benches);
