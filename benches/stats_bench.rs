//! Benchmarks for dashboard derivations and the reels estimate
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use reeltrack::estimate::{estimate_reels, SecondsPerReel};
use reeltrack::model::{DailySummary, Streaks, WeeklySummary};
use reeltrack::stats::{DashboardData, DashboardStats};

fn create_dashboard(days: usize) -> DashboardData {
    let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let daily = (0..days)
        .map(|i| DailySummary {
            date: first + Duration::days(i as i64),
            total_sessions: (i % 5) as u32,
            total_reels: (i * 7 % 120) as u32,
            total_minutes: (i * 3 % 90) as u32,
        })
        .collect();

    let weekly = (0..days / 7)
        .map(|w| WeeklySummary {
            year: 2024,
            week: (w % 52) as u32 + 1,
            start_date: None,
            end_date: None,
            total_sessions: 10,
            total_reels: (w * 13 % 500) as u32,
            total_minutes: 200,
        })
        .collect();

    DashboardData {
        daily,
        weekly,
        monthly: Vec::new(),
        streaks: Streaks {
            current_streak: 4,
            longest_streak: 30,
        },
    }
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    for days in [30, 365, 3650] {
        let data = create_dashboard(days);
        group.throughput(Throughput::Elements(days as u64));

        group.bench_function(format!("derive_{}_days", days), |b| {
            b.iter(|| DashboardStats::derive_at(black_box(today), black_box(&data)))
        });
    }

    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let rate = SecondsPerReel::new(8);

    c.bench_function("estimate_reels", |b| {
        b.iter(|| estimate_reels(black_box(5_423), black_box(rate)))
    });
}

criterion_group!(benches, bench_derive, bench_estimate);
criterion_main!(benches);
