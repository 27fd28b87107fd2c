// ABOUTME: Criterion benchmarks for metrics extraction, plan generation and plan validation
// ABOUTME: Measures latency across activity history sizes and planning horizons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the planning pipeline.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::{Days, Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pierre_plan_core::models::{ActivityRecord, ActivityRecordBuilder, RaceGoal};
use pierre_training_planner::{
    MetricsExtractor, PlanRequest, PlanValidator, PlanningConfig, ServiceConfig,
    TrainingPlanService,
};

/// Deterministic history of runs, one every other day
fn generate_runs(count: usize) -> Vec<ActivityRecord> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    (0..count)
        .map(|index| {
            let distance_km = 4.0 + ((index * 37) % 120) as f64 / 10.0;
            let pace = 5.0 + ((index * 13) % 20) as f64 / 10.0;
            let timestamp = start + Duration::days(index as i64 * 2);
            ActivityRecordBuilder::new(distance_km, distance_km * pace)
                .timestamp(timestamp)
                .average_heart_rate(140.0 + (index % 20) as f64)
                .build()
        })
        .collect()
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn request(weeks: u64, race_goal: Option<RaceGoal>, snapshot_runs: &[ActivityRecord]) -> PlanRequest {
    let target = start_date() + Days::new(weeks * 7);
    PlanRequest {
        user_id: format!("bench-{weeks}"),
        target_date: target.format("%Y-%m-%d").to_string(),
        start_date: start_date(),
        snapshot: MetricsExtractor::default().extract(snapshot_runs),
        runs_per_week: Some(5),
        race_goal,
    }
}

fn bench_metrics_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics_extraction");
    let extractor = MetricsExtractor::new(PlanningConfig::default().metrics);

    for count in [10, 100, 1_000] {
        let runs = generate_runs(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("extract", count), &runs, |b, runs| {
            b.iter(|| extractor.extract(black_box(runs)));
        });
    }

    group.finish();
}

fn bench_plan_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_generation");
    let service = TrainingPlanService::in_memory(&ServiceConfig::default());
    let history = generate_runs(60);

    for weeks in [12_u64, 26, 52] {
        group.bench_with_input(BenchmarkId::new("generate", weeks), &weeks, |b, &weeks| {
            b.iter(|| {
                service
                    .generate(black_box(request(weeks, Some(RaceGoal::Marathon), &history)))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_plan_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_validation");
    let service = TrainingPlanService::in_memory(&ServiceConfig::default());
    let validator = PlanValidator::from_config(&PlanningConfig::default());
    let history = generate_runs(60);

    for weeks in [12_u64, 52] {
        let plan = service.generate(request(weeks, None, &history)).unwrap();
        group.throughput(Throughput::Elements(plan.workouts.len() as u64));
        group.bench_with_input(BenchmarkId::new("validate", weeks), &plan, |b, plan| {
            b.iter(|| validator.validate(black_box(plan)));
        });
    }

    group.finish();
}

fn bench_batch_generation(c: &mut Criterion) {
    let service = TrainingPlanService::in_memory(&ServiceConfig::default());
    let history = generate_runs(60);

    c.bench_function("generate_batch_32", |b| {
        b.iter(|| {
            let requests = (0..32)
                .map(|index| PlanRequest {
                    user_id: format!("batch-{index}"),
                    ..request(16, None, &history)
                })
                .collect();
            service.generate_batch(black_box(requests))
        });
    });
}

criterion_group!(
    benches,
    bench_metrics_extraction,
    bench_plan_generation,
    bench_plan_validation,
    bench_batch_generation,
);
criterion_main!(benches);
