//! Benchmarks for the series transformations
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rv_tracker::dashboard::{Dashboard, DashboardOptions};
use rv_tracker::dataset::{DailyRecord, Dataset};
use rv_tracker::series::*;

fn create_test_dataset(days: usize) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2021, 12, 1).unwrap();
    let records = (0..days)
        .map(|i| {
            let approvals = if i % 7 >= 5 { 0 } else { (i % 40) as u64 };
            DailyRecord::new(start + chrono::Duration::days(i as i64))
                .applied(100 + (i % 13) as u64, 250 + (i % 29) as u64)
                .approved(approvals, approvals * 2)
        })
        .collect();
    Dataset::from_records(records).unwrap()
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    for size in [100, 1000, 10000] {
        let dataset = create_test_dataset(size);
        let daily = daily_approvals(&dataset);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("cumulative_sum_{}", size), |b| {
            b.iter(|| cumulative_sum(black_box(&daily)))
        });

        group.bench_function(format!("resample_to_ohlc_{}", size), |b| {
            b.iter(|| resample_to_ohlc(black_box(&daily), 5).unwrap())
        });

        group.bench_function(format!("ema26_{}", size), |b| {
            b.iter(|| exponential_moving_average(black_box(&daily), 26).unwrap())
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");

    let dataset = create_test_dataset(1000);
    let options = DashboardOptions {
        working_days_only: true,
        ..DashboardOptions::default()
    };
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    group.bench_function("build_1000_days", |b| {
        b.iter(|| Dashboard::build(black_box(&dataset), &options, today).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_primitives, bench_dashboard);
criterion_main!(benches);
