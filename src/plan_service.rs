// ABOUTME: Training plan service orchestrating extraction, progression, assembly and validation
// ABOUTME: Validates requests, stores generated plans per user and records progress entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Plan Service
//!
//! Entry point for callers. A request flows through the engine stages in a
//! fixed order:
//!
//! ```text
//! snapshot -> ProgressionPlanner -> ScheduleAssembler -> PlanValidator -> PlanStore
//! ```
//!
//! Business-rule failures are returned as [`PlanError`] and never logged
//! here; surfacing them is the caller's job.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use pierre_plan_core::models::{
    FitnessSnapshot, ProgressEntry, RaceGoal, TrainingPlan, WeeklyStructure,
};
use pierre_plan_core::{PlanError, PlanResult};
use pierre_plan_engine::config::PlanningConfig;
use pierre_plan_engine::schedule::MAX_RUNS_PER_WEEK;
use pierre_plan_engine::{
    MetricsExtractor, PlanValidator, ProgressionPlanner, ScheduleAssembler, ScheduleRequest,
};
use rayon::prelude::*;
use serde_json::Value;

use crate::logging::PlanLogger;
use crate::plan_store::{InMemoryPlanStore, PlanStore};
use crate::service_config::ServiceConfig;

/// Calendar format accepted for target dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parameters of one plan generation
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Owner of the plan
    pub user_id: String,
    /// Goal date as `YYYY-MM-DD`
    pub target_date: String,
    /// First scheduled day
    pub start_date: NaiveDate,
    /// Athlete snapshot
    pub snapshot: FitnessSnapshot,
    /// Sessions per week; derived from the fitness tier when absent
    pub runs_per_week: Option<u8>,
    /// Goal event
    pub race_goal: Option<RaceGoal>,
}

impl PlanRequest {
    /// Request starting today with tier-based sessions and no race goal
    #[must_use]
    pub fn starting_today(
        user_id: impl Into<String>,
        target_date: impl Into<String>,
        snapshot: FitnessSnapshot,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            target_date: target_date.into(),
            start_date: Utc::now().date_naive(),
            snapshot,
            runs_per_week: None,
            race_goal: None,
        }
    }
}

/// Generates, stores and tracks training plans
pub struct TrainingPlanService {
    extractor: MetricsExtractor,
    planner: ProgressionPlanner,
    assembler: ScheduleAssembler,
    validator: PlanValidator,
    long_run_share: f64,
    default_runs_per_week: Option<u8>,
    store: Arc<dyn PlanStore>,
}

impl Default for TrainingPlanService {
    fn default() -> Self {
        Self::new(
            &ServiceConfig {
                planning: PlanningConfig::global().clone(),
                default_runs_per_week: None,
            },
            Arc::new(InMemoryPlanStore::new()),
        )
    }
}

impl TrainingPlanService {
    /// Create a service over a store
    #[must_use]
    pub fn new(config: &ServiceConfig, store: Arc<dyn PlanStore>) -> Self {
        let planning = &config.planning;
        Self {
            extractor: MetricsExtractor::new(planning.metrics.clone()),
            planner: ProgressionPlanner::new(planning.progression.clone()),
            assembler: ScheduleAssembler::from_config(planning),
            validator: PlanValidator::from_config(planning),
            long_run_share: planning.schedule.long_run_share,
            default_runs_per_week: config.default_runs_per_week,
            store,
        }
    }

    /// Create a service with an in-memory store
    #[must_use]
    pub fn in_memory(config: &ServiceConfig) -> Self {
        Self::new(config, Arc::new(InMemoryPlanStore::new()))
    }

    /// Backing store
    #[must_use]
    pub fn store(&self) -> &Arc<dyn PlanStore> {
        &self.store
    }

    /// Reduce a raw activity payload to a fitness snapshot
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` for a malformed payload
    pub fn analyze_activity_data(&self, payload: &Value) -> PlanResult<FitnessSnapshot> {
        self.extractor.extract_from_json(payload)
    }

    /// Generate a plan starting today
    ///
    /// # Errors
    ///
    /// See [`Self::generate`]
    pub fn generate_training_plan(
        &self,
        user_id: &str,
        target_date: &str,
        snapshot: FitnessSnapshot,
    ) -> PlanResult<TrainingPlan> {
        self.generate(PlanRequest::starting_today(user_id, target_date, snapshot))
    }

    /// Generate, validate and store a plan
    ///
    /// # Errors
    ///
    /// - `PlanError::InvalidIdentifier` for an empty user id
    /// - `PlanError::InvalidDate` when the target date is not `YYYY-MM-DD`
    /// - `PlanError::InsufficientHorizon` when fewer whole weeks than the
    ///   minimum remain before the target date
    /// - `PlanError::HorizonTooLong` when more whole weeks than the maximum
    ///   remain before the target date
    /// - `PlanError::InvalidInput` for a session count outside `1..=6`
    pub fn generate(&self, request: PlanRequest) -> PlanResult<TrainingPlan> {
        let started = Instant::now();
        let user_id = validate_user_id(&request.user_id)?;
        let target_date = parse_target_date(&request.target_date)?;
        let weeks = self.weeks_until(request.start_date, target_date)?;
        let weekly_structure = self.weekly_structure(&request)?;

        let progression = self.planner.plan(&request.snapshot, weeks)?;
        let long_run_curve = request
            .race_goal
            .map(|goal| {
                let start = if request.snapshot.max_distance_km > 0.0 {
                    request.snapshot.max_distance_km
                } else {
                    progression
                        .first()
                        .map_or(0.0, |week| week.target_mileage_km * self.long_run_share)
                };
                self.planner
                    .plan_with_terminal(start, weeks, goal.distance_km())
            })
            .transpose()?;

        let draft = self.assembler.assemble(ScheduleRequest {
            user_id: user_id.to_owned(),
            start_date: request.start_date,
            target_date,
            snapshot: request.snapshot,
            progression,
            long_run_curve,
            weekly_structure,
            race_goal: request.race_goal,
        })?;
        let plan = self.validator.validate(&draft);

        PlanLogger::log_plan_generated(&plan, started.elapsed());
        self.store.put(plan.clone());
        Ok(plan)
    }

    /// Generate independent plans in parallel
    ///
    /// Results are returned in request order; one failing request does not
    /// affect the others.
    #[must_use]
    pub fn generate_batch(&self, requests: Vec<PlanRequest>) -> Vec<PlanResult<TrainingPlan>> {
        requests
            .into_par_iter()
            .map(|request| self.generate(request))
            .collect()
    }

    /// Current plan of a user
    #[must_use]
    pub fn get_training_plan(&self, user_id: &str) -> Option<TrainingPlan> {
        self.store.get(user_id.trim())
    }

    /// Record a progress entry against the user's plan
    ///
    /// Returns `false` when the user has no plan; no plan is created.
    pub fn update_progress(&self, user_id: &str, entry: ProgressEntry) -> bool {
        let user_id = user_id.trim();
        let date = entry.date;
        let updated = self.store.append_progress(user_id, entry);
        PlanLogger::log_progress_update(user_id, date, updated);
        updated
    }

    /// Progress entries recorded for a user
    #[must_use]
    pub fn progress_log(&self, user_id: &str) -> Vec<ProgressEntry> {
        self.store.progress(user_id.trim())
    }

    fn weeks_until(&self, start_date: NaiveDate, target_date: NaiveDate) -> PlanResult<u32> {
        let weeks = (target_date - start_date).num_days().div_euclid(7);
        let config = self.planner.config();
        if weeks < i64::from(config.min_weeks) {
            return Err(PlanError::insufficient_horizon(weeks, config.min_weeks));
        }
        if weeks > i64::from(config.max_weeks) {
            return Err(PlanError::horizon_too_long(weeks, config.max_weeks));
        }
        u32::try_from(weeks)
            .map_err(|_| PlanError::invalid_input(format!("Planning horizon too long: {weeks} weeks")))
    }

    fn weekly_structure(&self, request: &PlanRequest) -> PlanResult<WeeklyStructure> {
        match request.runs_per_week.or(self.default_runs_per_week) {
            Some(runs) if (1..=MAX_RUNS_PER_WEEK).contains(&runs) => {
                Ok(WeeklyStructure::from_runs_per_week(runs))
            }
            Some(runs) => Err(PlanError::invalid_input(format!(
                "runs_per_week must be between 1 and {MAX_RUNS_PER_WEEK}, got {runs}"
            ))),
            None => Ok(WeeklyStructure::for_tier(request.snapshot.fitness_tier)),
        }
    }
}

fn validate_user_id(user_id: &str) -> PlanResult<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(PlanError::invalid_identifier("User ID cannot be empty"));
    }
    Ok(trimmed)
}

fn parse_target_date(value: &str) -> PlanResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| PlanError::invalid_date(value))
}
