// ABOUTME: Shared test utilities for training planner service integration tests
// ABOUTME: Provides quiet logging, an environment-independent service and request fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_training_planner`

use std::env;
use std::sync::{Arc, Once};

use chrono::NaiveDate;
use pierre_plan_core::models::{FitnessSnapshot, ProgressEntry};
use pierre_training_planner::{
    InMemoryPlanStore, PlanRequest, PlanStore, ServiceConfig, TrainingPlanService,
};

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

/// Service over default settings and a fresh store, ignoring the environment
pub fn test_service() -> (TrainingPlanService, Arc<dyn PlanStore>) {
    init_test_logging();
    let store: Arc<dyn PlanStore> = Arc::new(InMemoryPlanStore::new());
    let service = TrainingPlanService::new(&ServiceConfig::default(), Arc::clone(&store));
    (service, store)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A Monday
pub fn plan_start() -> NaiveDate {
    date(2025, 1, 6)
}

/// Thirteen whole weeks after `plan_start`
pub const TARGET_DATE: &str = "2025-04-07";

pub fn intermediate_snapshot() -> FitnessSnapshot {
    FitnessSnapshot {
        max_distance_km: 12.0,
        ..FitnessSnapshot::with_weekly_mileage(20.0, 6.0)
    }
}

pub fn request(user_id: &str, target_date: &str) -> PlanRequest {
    PlanRequest {
        user_id: user_id.to_owned(),
        target_date: target_date.to_owned(),
        start_date: plan_start(),
        snapshot: intermediate_snapshot(),
        runs_per_week: Some(4),
        race_goal: None,
    }
}

pub fn progress(year: i32, month: u32, day: u32, distance_km: f64) -> ProgressEntry {
    ProgressEntry {
        date: date(year, month, day),
        distance_km,
        duration_minutes: distance_km * 6.0,
        notes: None,
    }
}
