// ABOUTME: Shared fixtures for planning engine integration tests
// ABOUTME: Builds activity records, snapshots, progressions and assembled plans with default config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]

use std::env;
use std::sync::Once;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use pierre_plan_core::models::{
    ActivityRecord, ActivityRecordBuilder, FitnessSnapshot, RaceGoal, TrainingPlan,
    WeeklyStructure,
};
use pierre_plan_engine::config::PlanningConfig;
use pierre_plan_engine::{ProgressionPlanner, ScheduleAssembler, ScheduleRequest};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Default engine configuration, independent of the environment
pub fn test_config() -> PlanningConfig {
    PlanningConfig::default()
}

/// Undated run
pub fn run(distance_km: f64, duration_minutes: f64) -> ActivityRecord {
    ActivityRecordBuilder::new(distance_km, duration_minutes).build()
}

/// Run at noon UTC on a calendar day
pub fn dated_run(year: i32, month: u32, day: u32, distance_km: f64, duration_minutes: f64) -> ActivityRecord {
    ActivityRecordBuilder::new(distance_km, duration_minutes)
        .timestamp(noon(year, month, day))
        .build()
}

pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A Monday used as the default plan start
pub fn plan_start() -> NaiveDate {
    date(2025, 1, 6)
}

/// Snapshot of an intermediate runner
pub fn intermediate_snapshot() -> FitnessSnapshot {
    FitnessSnapshot {
        max_distance_km: 12.0,
        ..FitnessSnapshot::with_weekly_mileage(20.0, 6.0)
    }
}

/// Draft plan straight from the assembler
pub fn assemble_draft(
    start_date: NaiveDate,
    weeks: u32,
    runs_per_week: u8,
    race_goal: Option<RaceGoal>,
) -> TrainingPlan {
    let config = test_config();
    let snapshot = intermediate_snapshot();
    let planner = ProgressionPlanner::new(config.progression.clone());
    let progression = planner.plan(&snapshot, weeks).unwrap();
    let long_run_curve = race_goal.map(|goal| {
        planner
            .plan_with_terminal(snapshot.max_distance_km, weeks, goal.distance_km())
            .unwrap()
    });

    ScheduleAssembler::from_config(&config)
        .assemble(ScheduleRequest {
            user_id: "athlete-1".to_owned(),
            start_date,
            target_date: start_date + Days::new(u64::from(weeks) * 7),
            snapshot,
            progression,
            long_run_curve,
            weekly_structure: WeeklyStructure::from_runs_per_week(runs_per_week),
            race_goal,
        })
        .unwrap()
}
