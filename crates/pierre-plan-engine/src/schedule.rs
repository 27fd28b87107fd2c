// ABOUTME: Expands a progression curve into one concrete workout per calendar day
// ABOUTME: Places the long run, spaces quality sessions and prescribes pace, duration and zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Schedule assembly
//!
//! Each plan week covers seven consecutive days from the plan start. The
//! long run always lands on the configured weekday and the following day is
//! rest. The remaining sessions are spread over the five weekdays in between
//! using fixed patterns that keep sessions apart where the count allows:
//!
//! | sessions | slots (first weekday after rest = 0) |
//! |----------|--------------------------------------|
//! | 1        | 1                                    |
//! | 2        | 1, 3                                 |
//! | 3        | 0, 2, 4                              |
//! | 4        | 0, 1, 3, 4                           |
//! | 5        | 0 - 4                                |
//!
//! Supporting sessions split whatever the weekly target leaves after the
//! long run, but never drop below `min_session_distance_km` (3 km by
//! default). In low-volume weeks the floor wins, so the scheduled total can
//! exceed the week's `target_mileage_km`. The assembler does not record this
//! as a correction.
//!
//! The plan runs from the start date through the target date. Days after
//! the last full week belong to the final progression week. The goal race
//! falls on the target date when that is the long-run weekday, otherwise on
//! the closest long-run weekday before it. Every day after the race is rest.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use pierre_plan_core::models::{
    FitnessSnapshot, HeartRateZone, PaceRange, ProgressionWeek, RaceGoal, TrainingPlan,
    WeeklyStructure, Workout, WorkoutType,
};
use pierre_plan_core::{PlanError, PlanResult};
use tracing::debug;
use uuid::Uuid;

use crate::config::{PlanningConfig, ScheduleConfig};

/// Most sessions a week may hold; one day is always rest
pub const MAX_RUNS_PER_WEEK: u8 = 6;

/// Slot patterns indexed by the number of non-long sessions
const SLOT_PATTERNS: [&[usize]; 6] = [&[], &[1], &[1, 3], &[0, 2, 4], &[0, 1, 3, 4], &[0, 1, 2, 3, 4]];

/// Everything needed to lay out a plan
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Owner of the plan
    pub user_id: String,
    /// First scheduled day
    pub start_date: NaiveDate,
    /// Goal date
    pub target_date: NaiveDate,
    /// Athlete snapshot
    pub snapshot: FitnessSnapshot,
    /// Weekly target-mileage curve
    pub progression: Vec<ProgressionWeek>,
    /// Per-week long-run distances, one entry per progression week
    pub long_run_curve: Option<Vec<ProgressionWeek>>,
    /// Sessions per week
    pub weekly_structure: WeeklyStructure,
    /// Goal event
    pub race_goal: Option<RaceGoal>,
}

/// Lays out draft plans
#[derive(Debug, Clone)]
pub struct ScheduleAssembler {
    config: ScheduleConfig,
    long_run_increase_cap: f64,
}

/// Per-plan facts shared by every week
struct WeekLayout {
    training_days: Vec<Weekday>,
    supporting_sessions: usize,
    hard_runs: u8,
    base_pace: f64,
    race_date: NaiveDate,
    race_goal: Option<RaceGoal>,
}

/// Prescriptions shared by the days of one block
struct BlockSessions {
    long_type: WorkoutType,
    long_distance: f64,
    supporting_distance: f64,
    hard_quota: u8,
}

/// State carried across week boundaries
#[derive(Default)]
struct AssemblyState {
    previous_long_run: Option<f64>,
    previous_day_hard: bool,
    hard_sessions_placed: usize,
}

impl AssemblyState {
    /// Next quality type in the plan-wide rotation
    fn next_hard_type(&mut self) -> WorkoutType {
        let rotation = WorkoutType::HARD_ROTATION;
        let hard_type = rotation[self.hard_sessions_placed % rotation.len()];
        self.hard_sessions_placed += 1;
        hard_type
    }
}

impl Default for ScheduleAssembler {
    fn default() -> Self {
        Self::from_config(PlanningConfig::global())
    }
}

impl ScheduleAssembler {
    /// Create an assembler from schedule settings and the long-run cap
    #[must_use]
    pub const fn new(config: ScheduleConfig, long_run_increase_cap: f64) -> Self {
        Self {
            config,
            long_run_increase_cap,
        }
    }

    /// Create an assembler from a full configuration
    #[must_use]
    pub fn from_config(config: &PlanningConfig) -> Self {
        Self::new(
            config.schedule.clone(),
            config.validation.long_run_increase_cap,
        )
    }

    /// Weekdays that receive non-long sessions, in calendar order after the rest day
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` when more sessions are requested
    /// than there are free weekdays
    pub fn training_days(&self, sessions: usize) -> PlanResult<Vec<Weekday>> {
        let pattern = SLOT_PATTERNS.get(sessions).ok_or_else(|| {
            PlanError::invalid_input(format!(
                "Cannot place {sessions} sessions besides the long run"
            ))
        })?;
        let first_slot = self.config.rest_day().succ();
        Ok(pattern
            .iter()
            .map(|slot| (0..*slot).fold(first_slot, |weekday, _| weekday.succ()))
            .collect())
    }

    /// Lay out a draft plan, one workout per day from the start date through
    /// the target date
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` for a session count outside
    /// `1..=6`, an empty progression, a long-run curve whose length does
    /// not match the progression, or a target date outside the seven days
    /// following the last progression week
    pub fn assemble(&self, request: ScheduleRequest) -> PlanResult<TrainingPlan> {
        let structure = request.weekly_structure;
        if !(1..=MAX_RUNS_PER_WEEK).contains(&structure.runs_per_week) {
            return Err(PlanError::invalid_input(format!(
                "runs_per_week must be between 1 and {MAX_RUNS_PER_WEEK}, got {}",
                structure.runs_per_week
            )));
        }
        if request.progression.is_empty() {
            return Err(PlanError::invalid_input("Progression has no weeks"));
        }
        if let Some(curve) = &request.long_run_curve {
            if curve.len() != request.progression.len() {
                return Err(PlanError::invalid_input(format!(
                    "Long-run curve has {} weeks, progression has {}",
                    curve.len(),
                    request.progression.len()
                )));
            }
        }

        let week_count = request.progression.len();
        let blocks_end = offset_date(request.start_date, week_count * 7 - 1)?;
        let trailing_days = (request.target_date - blocks_end).num_days();
        if !(1..=7).contains(&trailing_days) {
            return Err(PlanError::invalid_input(format!(
                "Target date {} must fall within seven days after {blocks_end}",
                request.target_date
            )));
        }

        let supporting_sessions = usize::from(structure.runs_per_week - 1);
        let layout = WeekLayout {
            training_days: self.training_days(supporting_sessions)?,
            supporting_sessions,
            hard_runs: structure.hard_runs,
            base_pace: self.base_pace(&request.snapshot),
            race_date: self.race_date(request.target_date)?,
            race_goal: request.race_goal,
        };

        let mut state = AssemblyState::default();
        let mut workouts = Vec::with_capacity(week_count * 7 + 7);
        for (index, week) in request.progression.iter().enumerate() {
            let long_run_week = request
                .long_run_curve
                .as_ref()
                .and_then(|curve| curve.get(index));
            let block_start = offset_date(request.start_date, index * 7)?;
            self.assemble_block(&layout, &mut state, week, long_run_week, block_start, 7, &mut workouts)?;
        }

        // days between the last full week and the target date
        let final_index = week_count - 1;
        let final_long_run = request
            .long_run_curve
            .as_ref()
            .and_then(|curve| curve.get(final_index));
        self.assemble_block(
            &layout,
            &mut state,
            &request.progression[final_index],
            final_long_run,
            offset_date(blocks_end, 1)?,
            trailing_days as usize,
            &mut workouts,
        )?;

        let weeks_to_target = week_count as u32;
        debug!(
            user_id = %request.user_id,
            weeks = weeks_to_target,
            workouts = workouts.len(),
            hard_sessions = state.hard_sessions_placed,
            "Assembled draft training plan"
        );

        Ok(TrainingPlan {
            plan_id: Uuid::new_v4(),
            user_id: request.user_id,
            target_date: request.target_date,
            start_date: request.start_date,
            weeks_to_target,
            race_goal: request.race_goal,
            snapshot: request.snapshot,
            progression: request.progression,
            weekly_structure: structure,
            workouts,
            corrections: Vec::new(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble_block(
        &self,
        layout: &WeekLayout,
        state: &mut AssemblyState,
        week: &ProgressionWeek,
        long_run_week: Option<&ProgressionWeek>,
        block_start: NaiveDate,
        days: usize,
        workouts: &mut Vec<Workout>,
    ) -> PlanResult<()> {
        let long_slot = offset_date(
            block_start,
            days_between(block_start.weekday(), self.config.long_run_day),
        )?;
        let block_end = offset_date(block_start, days - 1)?;
        let long_distance = self.long_run_distance(layout, week, long_run_week, state.previous_long_run);
        if long_slot <= block_end && long_slot <= layout.race_date {
            state.previous_long_run = Some(long_distance);
        }

        let (long_type, long_distance) = if long_slot == layout.race_date {
            (
                WorkoutType::GoalRace,
                layout.race_goal.map_or(long_distance, RaceGoal::distance_km),
            )
        } else {
            (WorkoutType::LongRun, long_distance)
        };

        let supporting_distance = if layout.supporting_sessions == 0 {
            0.0
        } else {
            let share = (week.target_mileage_km - long_distance).max(0.0)
                / layout.supporting_sessions as f64;
            share.max(self.config.min_session_distance_km)
        };

        let mut sessions = BlockSessions {
            long_type,
            long_distance,
            supporting_distance,
            hard_quota: layout.hard_runs,
        };
        for day in 0..days {
            let date = offset_date(block_start, day)?;
            let workout = self.day_workout(layout, state, week, &mut sessions, date);
            state.previous_day_hard = workout.workout_type.is_hard();
            workouts.push(workout);
        }
        Ok(())
    }

    fn day_workout(
        &self,
        layout: &WeekLayout,
        state: &mut AssemblyState,
        week: &ProgressionWeek,
        sessions: &mut BlockSessions,
        date: NaiveDate,
    ) -> Workout {
        let weekday = date.weekday();
        if date > layout.race_date {
            Workout::rest(date, week.week_index, week.phase)
        } else if weekday == self.config.long_run_day {
            self.session(date, week, sessions.long_type, sessions.long_distance, layout.base_pace)
        } else if layout.training_days.contains(&weekday) {
            let eve_of_race = date.succ_opt() == Some(layout.race_date);
            let workout_type = if sessions.hard_quota > 0 && !state.previous_day_hard && !eve_of_race {
                sessions.hard_quota -= 1;
                state.next_hard_type()
            } else {
                WorkoutType::Base
            };
            self.session(date, week, workout_type, sessions.supporting_distance, layout.base_pace)
        } else {
            Workout::rest(date, week.week_index, week.phase)
        }
    }

    /// Curve value or share of the weekly target, capped against the previous long run
    fn long_run_distance(
        &self,
        layout: &WeekLayout,
        week: &ProgressionWeek,
        long_run_week: Option<&ProgressionWeek>,
        previous_long_run: Option<f64>,
    ) -> f64 {
        let target = long_run_week.map_or_else(
            || {
                if layout.supporting_sessions == 0 {
                    week.target_mileage_km
                } else {
                    week.target_mileage_km * self.config.long_run_share
                }
            },
            |curve_week| curve_week.target_mileage_km,
        );
        previous_long_run.map_or(target, |previous| {
            target.min(previous * (1.0 + self.long_run_increase_cap))
        })
    }

    /// Prescribe one training session
    #[must_use]
    pub fn session(
        &self,
        date: NaiveDate,
        week: &ProgressionWeek,
        workout_type: WorkoutType,
        distance_km: f64,
        base_pace: f64,
    ) -> Workout {
        if !workout_type.is_training() {
            return Workout::rest(date, week.week_index, week.phase);
        }

        let floor = self.config.pace_floor_min_per_km;
        let pace = (base_pace + self.config.pace_offsets.for_workout(workout_type)).max(floor);
        let target_pace = PaceRange::around(pace, self.config.pace_range_half_width, floor);
        let (warm_up_minutes, cool_down_minutes) = self.config.warm_up_cool_down(workout_type);

        Workout {
            date,
            weekday: date.weekday(),
            week_index: week.week_index,
            phase: week.phase,
            workout_type,
            distance_km,
            duration_minutes: distance_km * target_pace.midpoint(),
            warm_up_minutes,
            cool_down_minutes,
            target_pace: Some(target_pace),
            heart_rate_zone: HeartRateZone::for_workout(workout_type),
        }
    }

    /// Athlete pace, or the fallback pace when none is known
    #[must_use]
    pub fn base_pace(&self, snapshot: &FitnessSnapshot) -> f64 {
        if snapshot.average_pace_min_per_km.is_finite() && snapshot.average_pace_min_per_km > 0.0 {
            snapshot.average_pace_min_per_km
        } else {
            self.config.fallback_pace_min_per_km
        }
    }

    /// Goal race day: the target date itself on the long-run weekday,
    /// otherwise the closest long-run weekday before it
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidDate` when the race day precedes the
    /// earliest representable date
    pub fn race_date(&self, target_date: NaiveDate) -> PlanResult<NaiveDate> {
        let days_back = days_between(self.config.long_run_day, target_date.weekday());
        target_date
            .checked_sub_days(Days::new(days_back as u64))
            .ok_or_else(|| PlanError::invalid_date(format!("{target_date} - {days_back} days")))
    }
}

/// Days from `from` forward to the next `to`, zero when they match
const fn days_between(from: Weekday, to: Weekday) -> usize {
    ((to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7) as usize
}

fn offset_date(date: NaiveDate, days: usize) -> PlanResult<NaiveDate> {
    date.checked_add_days(Days::new(days as u64))
        .ok_or_else(|| PlanError::invalid_date(format!("{date} + {days} days")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pierre_plan_core::models::TrainingPhase;

    #[test]
    fn test_training_days_follow_slot_patterns() {
        let assembler = ScheduleAssembler::new(ScheduleConfig::default(), 0.10);
        assert_eq!(assembler.training_days(0).unwrap(), Vec::<Weekday>::new());
        assert_eq!(assembler.training_days(1).unwrap(), vec![Weekday::Tue]);
        assert_eq!(
            assembler.training_days(2).unwrap(),
            vec![Weekday::Tue, Weekday::Thu]
        );
        assert_eq!(
            assembler.training_days(3).unwrap(),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert_eq!(assembler.training_days(5).unwrap().len(), 5);
        assert!(assembler.training_days(6).is_err());
    }

    #[test]
    fn test_training_days_shift_with_long_run_day() {
        let config = ScheduleConfig {
            long_run_day: Weekday::Sun,
            ..ScheduleConfig::default()
        };
        let assembler = ScheduleAssembler::new(config, 0.10);
        assert_eq!(
            assembler.training_days(2).unwrap(),
            vec![Weekday::Wed, Weekday::Fri]
        );
    }

    #[test]
    fn test_race_date_is_target_or_previous_long_run_day() {
        let assembler = ScheduleAssembler::new(ScheduleConfig::default(), 0.10);
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        assert_eq!(assembler.race_date(saturday).unwrap(), saturday);
        let friday = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        assert_eq!(
            assembler.race_date(friday).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
        );
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        assert_eq!(
            assembler.race_date(monday).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()
        );
    }

    #[test]
    fn test_session_pace_is_floored() {
        let assembler = ScheduleAssembler::new(ScheduleConfig::default(), 0.10);
        let week = ProgressionWeek {
            week_index: 1,
            target_mileage_km: 30.0,
            phase: TrainingPhase::BaseBuilding,
            is_recovery_week: false,
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let workout = assembler.session(date, &week, WorkoutType::Interval, 6.0, 3.2);
        let pace = workout.target_pace.unwrap();
        assert!(pace.min_min_per_km >= 3.0);
        assert!(pace.max_min_per_km >= pace.min_min_per_km);
        assert_eq!(workout.heart_rate_zone, Some(HeartRateZone::Zone3To4));
    }
}
