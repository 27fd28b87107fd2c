// ABOUTME: Core data models for the Pierre training planner
// ABOUTME: Re-exports activity records, fitness snapshots, progression weeks, workouts and plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Typed replacements for the loosely shaped mappings a fitness provider
//! hands over. Records are validated once at the metrics boundary; every
//! model downstream of that boundary can be trusted.
//!
//! ## Core Models
//!
//! - `ActivityRecord`: One completed run as supplied by the provider
//! - `FitnessSnapshot`: Metrics reduced from the activity history
//! - `ProgressionWeek`: One week of the target-mileage curve
//! - `Workout`: One scheduled calendar day
//! - `TrainingPlan`: The complete generated plan

mod activity;
mod plan;
mod progression;
mod snapshot;
mod workout;

pub use activity::{ActivityRecord, ActivityRecordBuilder, ProgressEntry};
pub use plan::{CorrectionKind, PlanCorrection, RaceGoal, TrainingPlan, WeeklyStructure};
pub use progression::{ProgressionWeek, TrainingPhase};
pub use snapshot::{CoveragePeriod, FitnessSnapshot, FitnessTier, InjuryRiskTier};
pub use workout::{HeartRateZone, PaceRange, Workout, WorkoutType};
