// ABOUTME: Core types and constants for the Pierre training planner
// ABOUTME: Foundation crate with the typed plan data model, error handling and planning constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Plan Core
//!
//! Foundation crate providing shared types for the Pierre training planner.
//! It changes infrequently so the engine and service crates compile
//! incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: `PlanError` with stable `ErrorCode` values
//! - **constants**: Planning defaults (progression ratios, pace offsets, race distances)
//! - **models**: Activity records, fitness snapshots, progression weeks, workouts and plans

/// Plan-generation error types with stable error codes
pub mod errors;

/// Planning constants organized by domain
pub mod constants;

/// Core data models (`ActivityRecord`, `FitnessSnapshot`, `Workout`, `TrainingPlan`)
pub mod models;

pub use errors::{ErrorCode, PlanError, PlanResult};
