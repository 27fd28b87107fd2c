// ABOUTME: Main library entry point for the Pierre training planner
// ABOUTME: Wires the engine stages into a plan service with storage, configuration and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Training Planner
//!
//! Turns a runner's recorded activities into a periodized, week-by-week
//! training plan towards a target date.
//!
//! ## Architecture
//!
//! - **`pierre-plan-core`**: data model, errors and planning constants
//! - **`pierre-plan-engine`**: metrics extraction, progression, schedule
//!   assembly and plan validation
//! - **this crate**: the [`TrainingPlanService`] facade, plan storage,
//!   service configuration and logging
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use pierre_training_planner::{PlanRequest, ServiceConfig, TrainingPlanService};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let service = TrainingPlanService::in_memory(&ServiceConfig::from_env()?);
//! let snapshot = service.analyze_activity_data(&json!([
//!     { "distance_km": 8.0, "duration_minutes": 48.0 },
//!     { "distance_km": 12.0, "duration_minutes": 75.0 },
//! ]))?;
//! let plan = service.generate(PlanRequest {
//!     user_id: "runner-1".into(),
//!     target_date: "2025-06-01".into(),
//!     start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap_or_default(),
//!     snapshot,
//!     runs_per_week: Some(4),
//!     race_goal: None,
//! })?;
//! println!("{} workouts", plan.workouts.len());
//! # Ok(())
//! # }
//! ```

/// Service error types and the JSON error payload
pub mod errors;

/// Logging configuration and plan lifecycle log events
pub mod logging;

/// Training plan service facade
pub mod plan_service;

/// Plan storage abstraction and in-memory backend
pub mod plan_store;

/// Environment and file driven service configuration
pub mod service_config;

pub use errors::{ErrorCode, ErrorResponse, PlanError, PlanResult};
pub use plan_service::{PlanRequest, TrainingPlanService};
pub use plan_store::{InMemoryPlanStore, PlanStore};
pub use service_config::ServiceConfig;

pub use pierre_plan_core::models;
pub use pierre_plan_engine::config::PlanningConfig;
pub use pierre_plan_engine::{
    MetricsExtractor, PlanValidator, ProgressionPlanner, ScheduleAssembler, ScheduleRequest,
};
