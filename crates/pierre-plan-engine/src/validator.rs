// ABOUTME: Repairs draft plans so every scheduling invariant holds in the returned plan
// ABOUTME: Substitutes corrupt sessions, pins long runs and rest days, clamps growth, fixes durations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan validation
//!
//! Validation is a pure rebuild: the draft is never mutated and every repair
//! is appended to the returned plan's `corrections`. Passes run in a fixed
//! order so later passes see the output of earlier ones:
//!
//! 1. chronological sort and weekday re-derivation
//! 2. malformed sessions replaced by the default Base session
//! 3. rest days normalized to zero volume
//! 4. long runs moved onto the long-run weekday of their week
//! 5. the rest weekday forced to Rest
//! 6. long-run growth clamped against the previous long run
//! 7. durations recomputed from distance and pace

use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};
use pierre_plan_core::models::{
    CorrectionKind, HeartRateZone, PaceRange, PlanCorrection, TrainingPlan, Workout, WorkoutType,
};
use tracing::{debug, warn};

use crate::config::{PlanningConfig, ScheduleConfig, ValidationConfig};

/// Tolerance for floating-point comparisons of repaired distances
const DISTANCE_EPSILON: f64 = 1e-9;

/// Enforces scheduling invariants on assembled plans
#[derive(Debug, Clone)]
pub struct PlanValidator {
    config: ValidationConfig,
    long_run_day: Weekday,
    standard_warm_up_cool_down: (f64, f64),
    default_pace: PaceRange,
}

impl Default for PlanValidator {
    fn default() -> Self {
        Self::from_config(PlanningConfig::global())
    }
}

impl PlanValidator {
    /// Create a validator; the long-run weekday and pace band come from `schedule`
    #[must_use]
    pub fn new(config: ValidationConfig, schedule: &ScheduleConfig) -> Self {
        Self {
            long_run_day: schedule.long_run_day,
            standard_warm_up_cool_down: schedule.warm_up_cool_down(WorkoutType::Base),
            default_pace: PaceRange::around(
                config.default_session_pace_min_per_km,
                schedule.pace_range_half_width,
                schedule.pace_floor_min_per_km,
            ),
            config,
        }
    }

    /// Create a validator from a full configuration
    #[must_use]
    pub fn from_config(config: &PlanningConfig) -> Self {
        Self::new(config.validation.clone(), &config.schedule)
    }

    /// Designated rest weekday
    #[must_use]
    pub fn rest_day(&self) -> Weekday {
        self.long_run_day.succ()
    }

    /// Return a repaired copy of `draft`
    #[must_use]
    pub fn validate(&self, draft: &TrainingPlan) -> TrainingPlan {
        let mut workouts = draft.workouts.clone();
        workouts.sort_by_key(|workout| workout.date);
        let mut corrections = draft.corrections.clone();
        let already_recorded = corrections.len();

        for workout in &mut workouts {
            self.repair_workout(workout, &mut corrections);
        }
        self.place_long_runs(draft, &mut workouts, &mut corrections);
        self.enforce_rest_day(&mut workouts, &mut corrections);
        self.clamp_long_run_growth(&mut workouts, &mut corrections);
        self.reconcile_durations(&mut workouts, &mut corrections);

        debug!(
            user_id = %draft.user_id,
            corrections = corrections.len() - already_recorded,
            "Validated training plan"
        );

        TrainingPlan {
            workouts,
            corrections,
            ..draft.clone()
        }
    }

    /// Why a workout cannot be trusted, `None` when it is well formed
    #[must_use]
    pub fn malformation(workout: &Workout) -> Option<&'static str> {
        let numbers = [
            workout.distance_km,
            workout.duration_minutes,
            workout.warm_up_minutes,
            workout.cool_down_minutes,
        ];
        if numbers.iter().any(|value| !value.is_finite()) {
            return Some("non-finite value");
        }
        if numbers.iter().any(|value| *value < 0.0) {
            return Some("negative value");
        }
        if !workout.is_training() {
            return None;
        }
        match (workout.target_pace, workout.heart_rate_zone) {
            (None, _) => Some("missing target pace"),
            (_, None) => Some("missing heart-rate zone"),
            (Some(pace), _) if !pace.is_well_formed() => Some("invalid pace range"),
            _ => None,
        }
    }

    fn repair_workout(&self, workout: &mut Workout, corrections: &mut Vec<PlanCorrection>) {
        let weekday = workout.date.weekday();
        if workout.weekday != weekday {
            record(
                corrections,
                workout,
                CorrectionKind::WeekdayRealigned,
                format!("{} is a {weekday}, not {}", workout.date, workout.weekday),
            );
            workout.weekday = weekday;
        }

        if let Some(reason) = Self::malformation(workout) {
            warn!(
                date = %workout.date,
                workout_type = %workout.workout_type,
                reason,
                "Substituting default Base session for malformed workout"
            );
            record(
                corrections,
                workout,
                CorrectionKind::SubstitutedDefault,
                format!("{} replaced: {reason}", workout.workout_type),
            );
            *workout = self.default_session(workout);
            return;
        }

        if !workout.is_training() && !is_clean_rest(workout) {
            record(
                corrections,
                workout,
                CorrectionKind::RestNormalized,
                format!("rest day carried {:.2} km", workout.distance_km),
            );
            *workout = Workout::rest(workout.date, workout.week_index, workout.phase);
        }
    }

    /// Default Base session on the same day
    #[must_use]
    pub fn default_session(&self, original: &Workout) -> Workout {
        let target_pace = self.default_pace;
        let (warm_up_minutes, cool_down_minutes) = self.standard_warm_up_cool_down;
        Workout {
            date: original.date,
            weekday: original.date.weekday(),
            week_index: original.week_index,
            phase: original.phase,
            workout_type: WorkoutType::Base,
            distance_km: self.config.default_session_distance_km,
            duration_minutes: self.config.default_session_distance_km * target_pace.midpoint(),
            warm_up_minutes,
            cool_down_minutes,
            target_pace: Some(target_pace),
            heart_rate_zone: HeartRateZone::for_workout(WorkoutType::Base),
        }
    }

    /// Each week keeps at most one long run, on the long-run weekday
    fn place_long_runs(
        &self,
        draft: &TrainingPlan,
        workouts: &mut [Workout],
        corrections: &mut Vec<PlanCorrection>,
    ) {
        let mut weeks: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (index, workout) in workouts.iter().enumerate() {
            let week = (workout.date - draft.start_date).num_days().div_euclid(7);
            weeks.entry(week).or_default().push(index);
        }

        for days in weeks.values() {
            let slot = days
                .iter()
                .copied()
                .find(|&index| workouts[index].weekday == self.long_run_day);
            let mut slot_has_long_run =
                slot.is_some_and(|index| workouts[index].workout_type == WorkoutType::LongRun);

            for &index in days {
                if workouts[index].workout_type != WorkoutType::LongRun || Some(index) == slot {
                    continue;
                }
                match slot {
                    Some(slot_index) if !slot_has_long_run => {
                        record(
                            corrections,
                            &workouts[index],
                            CorrectionKind::LongRunMoved,
                            format!(
                                "long run moved from {} to {}",
                                workouts[index].weekday, self.long_run_day
                            ),
                        );
                        swap_sessions(workouts, index, slot_index);
                        slot_has_long_run = true;
                    }
                    _ => {
                        record(
                            corrections,
                            &workouts[index],
                            CorrectionKind::LongRunDowngraded,
                            "long run has no free long-run day in its week".to_owned(),
                        );
                        self.downgrade_to_base(&mut workouts[index]);
                    }
                }
            }
        }
    }

    fn enforce_rest_day(&self, workouts: &mut [Workout], corrections: &mut Vec<PlanCorrection>) {
        let rest_day = self.rest_day();
        for workout in workouts
            .iter_mut()
            .filter(|workout| workout.weekday == rest_day && workout.is_training())
        {
            record(
                corrections,
                workout,
                CorrectionKind::RestDayEnforced,
                format!("{} on {rest_day} replaced by rest", workout.workout_type),
            );
            *workout = Workout::rest(workout.date, workout.week_index, workout.phase);
        }
    }

    fn clamp_long_run_growth(&self, workouts: &mut [Workout], corrections: &mut Vec<PlanCorrection>) {
        let growth = 1.0 + self.config.long_run_increase_cap;
        let mut previous: Option<f64> = None;

        for workout in workouts
            .iter_mut()
            .filter(|workout| workout.workout_type == WorkoutType::LongRun)
        {
            if let Some(limit) = previous.map(|distance| distance * growth) {
                if workout.distance_km > limit + DISTANCE_EPSILON {
                    record(
                        corrections,
                        workout,
                        CorrectionKind::LongRunClamped,
                        format!("{:.2} km clamped to {limit:.2} km", workout.distance_km),
                    );
                    workout.distance_km = limit;
                    if let Some(pace) = workout.target_pace {
                        workout.duration_minutes = limit * pace.midpoint();
                    }
                }
            }
            previous = Some(workout.distance_km);
        }
    }

    fn reconcile_durations(&self, workouts: &mut [Workout], corrections: &mut Vec<PlanCorrection>) {
        for workout in workouts.iter_mut().filter(|workout| workout.is_training()) {
            let Some(pace) = workout.target_pace else {
                continue;
            };
            let midpoint = pace.midpoint();
            let implied_distance = workout.duration_minutes / midpoint;
            if (implied_distance - workout.distance_km).abs() > self.config.distance_tolerance_km {
                let duration = workout.distance_km * midpoint;
                record(
                    corrections,
                    workout,
                    CorrectionKind::DurationRecomputed,
                    format!(
                        "duration {:.1} min recomputed to {duration:.1} min",
                        workout.duration_minutes
                    ),
                );
                workout.duration_minutes = duration;
            }
        }
    }

    fn downgrade_to_base(&self, workout: &mut Workout) {
        let (warm_up_minutes, cool_down_minutes) = self.standard_warm_up_cool_down;
        workout.workout_type = WorkoutType::Base;
        workout.warm_up_minutes = warm_up_minutes;
        workout.cool_down_minutes = cool_down_minutes;
        workout.heart_rate_zone = HeartRateZone::for_workout(WorkoutType::Base);
    }
}

fn is_clean_rest(workout: &Workout) -> bool {
    workout.distance_km == 0.0
        && workout.duration_minutes == 0.0
        && workout.warm_up_minutes == 0.0
        && workout.cool_down_minutes == 0.0
        && workout.target_pace.is_none()
        && workout.heart_rate_zone.is_none()
}

/// Exchange session content between two days, keeping each day's calendar fields
fn swap_sessions(workouts: &mut [Workout], a: usize, b: usize) {
    let calendar = |workout: &Workout| {
        (workout.date, workout.weekday, workout.week_index, workout.phase)
    };
    let (first, second) = (calendar(&workouts[a]), calendar(&workouts[b]));
    workouts.swap(a, b);
    for (index, (date, weekday, week_index, phase)) in [(a, first), (b, second)] {
        let workout = &mut workouts[index];
        workout.date = date;
        workout.weekday = weekday;
        workout.week_index = week_index;
        workout.phase = phase;
    }
}

fn record(
    corrections: &mut Vec<PlanCorrection>,
    workout: &Workout,
    kind: CorrectionKind,
    detail: String,
) {
    corrections.push(PlanCorrection {
        date: workout.date,
        kind,
        detail,
    });
}
