// ABOUTME: Training plan model, weekly structure, race goals and validator corrections
// ABOUTME: A plan is an immutable value; regeneration always produces a new instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::progression::ProgressionWeek;
use super::snapshot::{FitnessSnapshot, FitnessTier};
use super::workout::{Workout, WorkoutType};
use crate::constants::race_distances::{FIVE_K_KM, HALF_MARATHON_KM, MARATHON_KM, TEN_K_KM};
use crate::errors::PlanError;

/// Goal event the plan builds towards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceGoal {
    /// 5 km race
    FiveK,
    /// 10 km race
    TenK,
    /// 21.0975 km
    HalfMarathon,
    /// 42.195 km
    Marathon,
    /// Any other distance
    Custom {
        /// Race distance (km)
        distance_km: f64,
    },
}

impl RaceGoal {
    /// Race distance in kilometres
    #[must_use]
    pub const fn distance_km(self) -> f64 {
        match self {
            Self::FiveK => FIVE_K_KM,
            Self::TenK => TEN_K_KM,
            Self::HalfMarathon => HALF_MARATHON_KM,
            Self::Marathon => MARATHON_KM,
            Self::Custom { distance_km } => distance_km,
        }
    }
}

impl Display for RaceGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::FiveK => write!(f, "5k"),
            Self::TenK => write!(f, "10k"),
            Self::HalfMarathon => write!(f, "half_marathon"),
            Self::Marathon => write!(f, "marathon"),
            Self::Custom { distance_km } => write!(f, "{distance_km}km"),
        }
    }
}

impl FromStr for RaceGoal {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "5k" => Ok(Self::FiveK),
            "10k" => Ok(Self::TenK),
            "half" | "half_marathon" | "half-marathon" => Ok(Self::HalfMarathon),
            "marathon" => Ok(Self::Marathon),
            other => other
                .trim_end_matches("km")
                .parse::<f64>()
                .ok()
                .filter(|km| km.is_finite() && *km > 0.0)
                .map(|distance_km| Self::Custom { distance_km })
                .ok_or_else(|| PlanError::invalid_input(format!("Unknown race goal: {s}"))),
        }
    }
}

/// Sessions per week and how they split between easy and hard running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStructure {
    /// Running sessions per week, long run included
    pub runs_per_week: u8,
    /// Easy sessions (Base and the long run)
    pub easy_runs: u8,
    /// Quality sessions (Tempo, Interval, Fartlek)
    pub hard_runs: u8,
    /// Days without running
    pub rest_days: u8,
}

impl WeeklyStructure {
    /// Structure for a given session count.
    ///
    /// At most two quality sessions per week, and never more than half of
    /// the non-long sessions.
    #[must_use]
    pub fn from_runs_per_week(runs_per_week: u8) -> Self {
        let runs = runs_per_week.clamp(1, 7);
        let hard_runs = (runs - 1).div_ceil(2).min(2);
        Self {
            runs_per_week: runs,
            easy_runs: runs - hard_runs,
            hard_runs,
            rest_days: 7 - runs,
        }
    }

    /// Default structure for a fitness tier
    #[must_use]
    pub fn for_tier(tier: FitnessTier) -> Self {
        match tier {
            FitnessTier::Beginner => Self::from_runs_per_week(3),
            FitnessTier::Intermediate => Self::from_runs_per_week(4),
            FitnessTier::Advanced => Self::from_runs_per_week(5),
        }
    }
}

/// Kind of repair applied by the plan validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    /// Corrupt workout replaced by the default Base session
    SubstitutedDefault,
    /// Weekday field disagreed with the date
    WeekdayRealigned,
    /// Long run swapped onto the long-run weekday
    LongRunMoved,
    /// Surplus or unplaceable long run turned into a Base run
    LongRunDowngraded,
    /// Training session on the rest weekday turned into rest
    RestDayEnforced,
    /// Long run reduced to the allowed increase over the previous one
    LongRunClamped,
    /// Duration recomputed from distance and pace
    DurationRecomputed,
    /// Rest day carrying distance or pace cleared
    RestNormalized,
}

/// One repair applied while validating a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCorrection {
    /// Day of the repaired workout
    pub date: NaiveDate,
    /// What was repaired
    pub kind: CorrectionKind,
    /// Human-readable detail
    pub detail: String,
}

/// A generated multi-week training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Unique identifier of this generation
    pub plan_id: Uuid,
    /// Owner of the plan
    pub user_id: String,
    /// Goal date
    pub target_date: NaiveDate,
    /// First scheduled day
    pub start_date: NaiveDate,
    /// Whole weeks between start and target
    pub weeks_to_target: u32,
    /// Goal event, when one was requested
    pub race_goal: Option<RaceGoal>,
    /// Snapshot the plan was generated from
    pub snapshot: FitnessSnapshot,
    /// Target-mileage curve
    pub progression: Vec<ProgressionWeek>,
    /// Sessions per week
    pub weekly_structure: WeeklyStructure,
    /// One workout per calendar day, ordered by date
    pub workouts: Vec<Workout>,
    /// Repairs applied by the validator
    pub corrections: Vec<PlanCorrection>,
}

impl TrainingPlan {
    /// Workouts of a 1-based plan week
    pub fn week(&self, week_index: u32) -> impl Iterator<Item = &Workout> {
        self.workouts
            .iter()
            .filter(move |workout| workout.week_index == week_index)
    }

    /// Workouts falling on a weekday
    pub fn on_weekday(&self, weekday: Weekday) -> impl Iterator<Item = &Workout> {
        self.workouts
            .iter()
            .filter(move |workout| workout.weekday == weekday)
    }

    /// Workouts of a type
    pub fn of_type(&self, workout_type: WorkoutType) -> impl Iterator<Item = &Workout> {
        self.workouts
            .iter()
            .filter(move |workout| workout.workout_type == workout_type)
    }

    /// Total prescribed distance (km)
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.workouts.iter().map(|workout| workout.distance_km).sum()
    }

    /// Last scheduled day
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.workouts.last().map(|workout| workout.date)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_weekly_structure_by_tier() {
        let beginner = WeeklyStructure::for_tier(FitnessTier::Beginner);
        assert_eq!(
            (beginner.runs_per_week, beginner.easy_runs, beginner.hard_runs, beginner.rest_days),
            (3, 2, 1, 4)
        );
        let intermediate = WeeklyStructure::for_tier(FitnessTier::Intermediate);
        assert_eq!((intermediate.easy_runs, intermediate.hard_runs), (2, 2));
        let advanced = WeeklyStructure::for_tier(FitnessTier::Advanced);
        assert_eq!((advanced.easy_runs, advanced.hard_runs, advanced.rest_days), (3, 2, 2));
    }

    #[test]
    fn test_single_run_week_has_no_quality_session() {
        let structure = WeeklyStructure::from_runs_per_week(1);
        assert_eq!(structure.hard_runs, 0);
        assert_eq!(structure.rest_days, 6);
    }

    #[test]
    fn test_race_goal_parsing() {
        assert!(matches!("Half_Marathon".parse::<RaceGoal>(), Ok(RaceGoal::HalfMarathon)));
        assert!(matches!("marathon".parse::<RaceGoal>(), Ok(RaceGoal::Marathon)));
        match "30km".parse::<RaceGoal>() {
            Ok(RaceGoal::Custom { distance_km }) => {
                assert!((distance_km - 30.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected parse result: {other:?}"),
        }
        assert!("ultra".parse::<RaceGoal>().is_err());
        assert!("-4".parse::<RaceGoal>().is_err());
    }
}
