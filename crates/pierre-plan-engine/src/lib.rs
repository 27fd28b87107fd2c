// ABOUTME: Plan-generation engine turning activity history into a validated training plan
// ABOUTME: Metrics extraction, mileage progression, schedule assembly and plan validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Plan Engine
//!
//! Deterministic, synchronous stages of the training-plan pipeline:
//!
//! - [`metrics_extractor`]: raw activity records to a [`FitnessSnapshot`]
//! - [`progression`]: snapshot to a week-indexed target-mileage curve
//! - [`schedule`]: curve to a day-by-day draft plan
//! - [`validator`]: draft plan to a repaired plan that satisfies every
//!   scheduling invariant
//!
//! All thresholds live in [`config::PlanningConfig`].
//!
//! [`FitnessSnapshot`]: pierre_plan_core::models::FitnessSnapshot

/// Engine configuration and environment overrides
pub mod config;
/// Activity records to fitness snapshot
pub mod metrics_extractor;
/// Target-mileage curve generation
pub mod progression;
/// Day-by-day plan assembly
pub mod schedule;
/// Order statistics used by the extractor
pub mod statistics;
/// Plan repair and invariant enforcement
pub mod validator;

pub use config::{ConfigError, PlanningConfig};
pub use metrics_extractor::MetricsExtractor;
pub use progression::ProgressionPlanner;
pub use schedule::{ScheduleAssembler, ScheduleRequest};
pub use validator::PlanValidator;
