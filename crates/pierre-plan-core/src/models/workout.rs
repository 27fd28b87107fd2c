// ABOUTME: Workout model for a single scheduled calendar day
// ABOUTME: Closed enumerations for session types and heart-rate zones plus pace ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::progression::TrainingPhase;

/// Type of a scheduled session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutType {
    /// No running
    Rest,
    /// Easy continuous aerobic run
    Base,
    /// Sustained threshold effort
    Tempo,
    /// Repeated fast efforts with recoveries
    Interval,
    /// Unstructured pace variations
    Fartlek,
    /// Weekly long run
    LongRun,
    /// The goal event itself
    GoalRace,
}

impl WorkoutType {
    /// Session types that count as hard for spacing purposes
    pub const HARD_ROTATION: [Self; 3] = [Self::Interval, Self::Tempo, Self::Fartlek];

    /// Whether this is a running session at all
    #[must_use]
    pub const fn is_training(self) -> bool {
        !matches!(self, Self::Rest)
    }

    /// High-intensity sessions that must not fall on consecutive days
    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(
            self,
            Self::Tempo | Self::Interval | Self::Fartlek | Self::GoalRace
        )
    }

    /// Long-run class sessions get the longer warm-up and cool-down
    #[must_use]
    pub const fn is_long_session(self) -> bool {
        matches!(self, Self::LongRun | Self::GoalRace)
    }
}

impl Display for WorkoutType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => write!(f, "Rest"),
            Self::Base => write!(f, "Base"),
            Self::Tempo => write!(f, "Tempo"),
            Self::Interval => write!(f, "Interval"),
            Self::Fartlek => write!(f, "Fartlek"),
            Self::LongRun => write!(f, "Long Run"),
            Self::GoalRace => write!(f, "Goal Race"),
        }
    }
}

/// Heart-rate training zone band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateZone {
    /// Aerobic endurance band
    Zone2To3,
    /// Threshold and above
    Zone3To4,
}

impl HeartRateZone {
    /// Zone prescribed for a session type, `None` for rest days
    #[must_use]
    pub const fn for_workout(workout_type: WorkoutType) -> Option<Self> {
        match workout_type {
            WorkoutType::Rest => None,
            WorkoutType::Base | WorkoutType::LongRun => Some(Self::Zone2To3),
            WorkoutType::Tempo
            | WorkoutType::Interval
            | WorkoutType::Fartlek
            | WorkoutType::GoalRace => Some(Self::Zone3To4),
        }
    }
}

impl Display for HeartRateZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zone2To3 => write!(f, "Zone 2-3"),
            Self::Zone3To4 => write!(f, "Zone 3-4"),
        }
    }
}

/// Target pace band in minutes per kilometre (lower is faster)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceRange {
    /// Fastest end of the band
    pub min_min_per_km: f64,
    /// Slowest end of the band
    pub max_min_per_km: f64,
}

impl PaceRange {
    /// Band centred on `pace`, both ends clamped to `floor`
    #[must_use]
    pub fn around(pace: f64, half_width: f64, floor: f64) -> Self {
        let centre = pace.max(floor);
        Self {
            min_min_per_km: (centre - half_width).max(floor),
            max_min_per_km: (centre + half_width).max(floor),
        }
    }

    /// Centre of the band
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min_min_per_km + self.max_min_per_km) / 2.0
    }

    /// Finite, positive and not inverted
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.min_min_per_km.is_finite()
            && self.max_min_per_km.is_finite()
            && self.min_min_per_km > 0.0
            && self.min_min_per_km <= self.max_min_per_km
    }
}

/// One scheduled calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Calendar date
    pub date: NaiveDate,
    /// Day of the week of `date`
    pub weekday: Weekday,
    /// 1-based plan week
    pub week_index: u32,
    /// Periodization phase of the week
    pub phase: TrainingPhase,
    /// Session type
    pub workout_type: WorkoutType,
    /// Main-set distance (km)
    pub distance_km: f64,
    /// Main-set duration (minutes)
    pub duration_minutes: f64,
    /// Warm-up before the main set (minutes)
    pub warm_up_minutes: f64,
    /// Cool-down after the main set (minutes)
    pub cool_down_minutes: f64,
    /// Target pace band, absent on rest days
    pub target_pace: Option<PaceRange>,
    /// Heart-rate zone, absent on rest days
    pub heart_rate_zone: Option<HeartRateZone>,
}

impl Workout {
    /// Rest day
    #[must_use]
    pub fn rest(date: NaiveDate, week_index: u32, phase: TrainingPhase) -> Self {
        Self {
            date,
            weekday: date.weekday(),
            week_index,
            phase,
            workout_type: WorkoutType::Rest,
            distance_km: 0.0,
            duration_minutes: 0.0,
            warm_up_minutes: 0.0,
            cool_down_minutes: 0.0,
            target_pace: None,
            heart_rate_zone: None,
        }
    }

    /// Total time including warm-up and cool-down (minutes)
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.warm_up_minutes + self.duration_minutes + self.cool_down_minutes
    }

    /// Whether this day is a running session
    #[must_use]
    pub const fn is_training(&self) -> bool {
        self.workout_type.is_training()
    }
}
