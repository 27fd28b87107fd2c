// ABOUTME: Planning engine configuration with defaults, validation and environment overrides
// ABOUTME: Exposes a process-wide PlanningConfig loaded once and shared by every engine stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planning Configuration
//!
//! Every threshold the engine applies is a configurable default. Values come
//! from three layers, lowest priority first:
//!
//! 1. The constants in `pierre_plan_core::constants`
//! 2. A serialized `PlanningConfig` supplied by the caller
//! 3. `PIERRE_PLAN_*` environment variables (for the global instance)
//!
//! ```rust
//! use pierre_plan_engine::config::PlanningConfig;
//!
//! let config = PlanningConfig::default();
//! assert_eq!(config.progression.min_weeks, 12);
//! assert!(config.validate().is_ok());
//! ```

mod error;

pub use error::ConfigError;

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::Weekday;
use pierre_plan_core::constants::{metrics, progression, sessions, validation};
use pierre_plan_core::models::WorkoutType;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Metrics extraction thresholds
    pub metrics: MetricsConfig,
    /// Mileage progression and periodization
    pub progression: ProgressionConfig,
    /// Calendar placement and session prescription
    pub schedule: ScheduleConfig,
    /// Plan repair tolerances
    pub validation: ValidationConfig,
}

/// Thresholds used when reducing activity records to a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Weekly km below which a runner is a beginner
    pub beginner_max_weekly_km: f64,
    /// Weekly km below which a runner is intermediate
    pub intermediate_max_weekly_km: f64,
    /// Fewer records than this are treated as a single week
    pub single_week_record_threshold: usize,
    /// Most recent records inspected for injury risk
    pub injury_risk_window: usize,
    /// Sessions above which injury risk is high
    pub high_risk_session_count: usize,
    /// Sessions below which injury risk is low
    pub low_risk_session_count: usize,
    /// Tukey fence multiplier for pace outliers
    pub iqr_fence_multiplier: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            beginner_max_weekly_km: metrics::BEGINNER_MAX_WEEKLY_KM,
            intermediate_max_weekly_km: metrics::INTERMEDIATE_MAX_WEEKLY_KM,
            single_week_record_threshold: metrics::SINGLE_WEEK_RECORD_THRESHOLD,
            injury_risk_window: metrics::INJURY_RISK_WINDOW,
            high_risk_session_count: metrics::HIGH_RISK_SESSION_COUNT,
            low_risk_session_count: metrics::LOW_RISK_SESSION_COUNT,
            iqr_fence_multiplier: metrics::IQR_FENCE_MULTIPLIER,
        }
    }
}

/// Progression curve parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Minimum preparation window (weeks)
    pub min_weeks: u32,
    /// Longest plan accepted (weeks)
    pub max_weeks: u32,
    /// Week-over-week growth on non-recovery weeks (0.10 = 10 %)
    pub weekly_increase_cap: f64,
    /// Volume multiplier for recovery weeks
    pub recovery_week_factor: f64,
    /// Every Nth week recovers
    pub recovery_week_interval: u32,
    /// Seed used when the snapshot carries no weekly volume (km)
    pub fallback_seed_mileage_km: f64,
    /// End of base building as a fraction of the horizon
    pub base_phase_end: f64,
    /// End of strength building as a fraction of the horizon
    pub strength_phase_end: f64,
    /// End of peak training as a fraction of the horizon
    pub peak_phase_end: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            min_weeks: progression::MIN_PLANNING_WEEKS,
            max_weeks: progression::MAX_PLANNING_WEEKS,
            weekly_increase_cap: progression::WEEKLY_INCREASE_CAP,
            recovery_week_factor: progression::RECOVERY_WEEK_FACTOR,
            recovery_week_interval: progression::RECOVERY_WEEK_INTERVAL,
            fallback_seed_mileage_km: progression::FALLBACK_SEED_MILEAGE_KM,
            base_phase_end: progression::BASE_PHASE_END,
            strength_phase_end: progression::STRENGTH_PHASE_END,
            peak_phase_end: progression::PEAK_PHASE_END,
        }
    }
}

/// Pace offsets relative to the athlete's average pace (min/km)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceOffsets {
    /// Base run
    pub base: f64,
    /// Long run
    pub long_run: f64,
    /// Interval session
    pub interval: f64,
    /// Tempo session
    pub tempo: f64,
    /// Fartlek session
    pub fartlek: f64,
    /// Goal race
    pub goal_race: f64,
}

impl Default for PaceOffsets {
    fn default() -> Self {
        Self {
            base: sessions::pace_offsets::BASE,
            long_run: sessions::pace_offsets::LONG_RUN,
            interval: sessions::pace_offsets::INTERVAL,
            tempo: sessions::pace_offsets::TEMPO,
            fartlek: sessions::pace_offsets::FARTLEK,
            goal_race: sessions::pace_offsets::GOAL_RACE,
        }
    }
}

impl PaceOffsets {
    /// Offset for a session type, 0 for rest days
    #[must_use]
    pub const fn for_workout(&self, workout_type: WorkoutType) -> f64 {
        match workout_type {
            WorkoutType::Rest => 0.0,
            WorkoutType::Base => self.base,
            WorkoutType::Tempo => self.tempo,
            WorkoutType::Interval => self.interval,
            WorkoutType::Fartlek => self.fartlek,
            WorkoutType::LongRun => self.long_run,
            WorkoutType::GoalRace => self.goal_race,
        }
    }
}

/// Calendar and session prescription parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Weekday of the long run; the following day is always rest
    pub long_run_day: Weekday,
    /// Share of the weekly volume given to the long run
    pub long_run_share: f64,
    /// Shortest non-long session (km)
    pub min_session_distance_km: f64,
    /// Pace assumed when the athlete has no pace history (min/km)
    pub fallback_pace_min_per_km: f64,
    /// Fastest prescribable pace (min/km)
    pub pace_floor_min_per_km: f64,
    /// Half width of a pace band (min/km)
    pub pace_range_half_width: f64,
    /// Per-type pace offsets
    pub pace_offsets: PaceOffsets,
    /// Standard warm-up (minutes)
    pub standard_warm_up_minutes: f64,
    /// Standard cool-down (minutes)
    pub standard_cool_down_minutes: f64,
    /// Long-run and goal-race warm-up (minutes)
    pub long_warm_up_minutes: f64,
    /// Long-run and goal-race cool-down (minutes)
    pub long_cool_down_minutes: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            long_run_day: Weekday::Sat,
            long_run_share: sessions::LONG_RUN_SHARE,
            min_session_distance_km: sessions::MIN_SESSION_DISTANCE_KM,
            fallback_pace_min_per_km: sessions::FALLBACK_PACE_MIN_PER_KM,
            pace_floor_min_per_km: sessions::PACE_FLOOR_MIN_PER_KM,
            pace_range_half_width: sessions::PACE_RANGE_HALF_WIDTH,
            pace_offsets: PaceOffsets::default(),
            standard_warm_up_minutes: sessions::STANDARD_WARM_UP_MINUTES,
            standard_cool_down_minutes: sessions::STANDARD_COOL_DOWN_MINUTES,
            long_warm_up_minutes: sessions::LONG_WARM_UP_MINUTES,
            long_cool_down_minutes: sessions::LONG_COOL_DOWN_MINUTES,
        }
    }
}

impl ScheduleConfig {
    /// Designated rest weekday: the day after the long run
    #[must_use]
    pub fn rest_day(&self) -> Weekday {
        self.long_run_day.succ()
    }

    /// Warm-up and cool-down minutes for a session type
    #[must_use]
    pub const fn warm_up_cool_down(&self, workout_type: WorkoutType) -> (f64, f64) {
        if workout_type.is_long_session() {
            (self.long_warm_up_minutes, self.long_cool_down_minutes)
        } else if workout_type.is_training() {
            (self.standard_warm_up_minutes, self.standard_cool_down_minutes)
        } else {
            (0.0, 0.0)
        }
    }
}

/// Plan repair parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum long-run increase over the previous long run (0.10 = 10 %)
    pub long_run_increase_cap: f64,
    /// Allowed gap between distance and duration / pace (km)
    pub distance_tolerance_km: f64,
    /// Distance of the substitute Base session (km)
    pub default_session_distance_km: f64,
    /// Pace of the substitute Base session (min/km)
    pub default_session_pace_min_per_km: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            long_run_increase_cap: validation::LONG_RUN_INCREASE_CAP,
            distance_tolerance_km: validation::DISTANCE_TOLERANCE_KM,
            default_session_distance_km: validation::DEFAULT_SESSION_DISTANCE_KM,
            default_session_pace_min_per_km: validation::DEFAULT_SESSION_PACE_MIN_PER_KM,
        }
    }
}

/// Global configuration singleton
static PLANNING_CONFIG: OnceLock<PlanningConfig> = OnceLock::new();

impl PlanningConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        PLANNING_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load planning config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparseable value
    /// or the resulting configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.metrics;
        if !(m.beginner_max_weekly_km > 0.0
            && m.beginner_max_weekly_km < m.intermediate_max_weekly_km)
        {
            return Err(ConfigError::InvalidOrdering(
                "beginner_max_weekly_km must be positive and < intermediate_max_weekly_km",
            ));
        }
        if m.single_week_record_threshold == 0 || m.injury_risk_window == 0 {
            return Err(ConfigError::InvalidRange(
                "record threshold and injury risk window must be at least 1",
            ));
        }
        if m.low_risk_session_count > m.high_risk_session_count {
            return Err(ConfigError::InvalidOrdering(
                "low_risk_session_count must be <= high_risk_session_count",
            ));
        }
        if !(m.iqr_fence_multiplier.is_finite() && m.iqr_fence_multiplier >= 0.0) {
            return Err(ConfigError::InvalidRange(
                "iqr_fence_multiplier must be finite and non-negative",
            ));
        }

        let p = &self.progression;
        if p.min_weeks == 0 {
            return Err(ConfigError::InvalidRange("min_weeks must be at least 1"));
        }
        if p.max_weeks < p.min_weeks {
            return Err(ConfigError::InvalidOrdering("max_weeks must be >= min_weeks"));
        }
        if !(p.weekly_increase_cap > 0.0 && p.weekly_increase_cap <= 1.0) {
            return Err(ConfigError::InvalidRange(
                "weekly_increase_cap must be in (0, 1]",
            ));
        }
        if !(p.recovery_week_factor > 0.0 && p.recovery_week_factor <= 1.0) {
            return Err(ConfigError::InvalidRange(
                "recovery_week_factor must be in (0, 1]",
            ));
        }
        if p.recovery_week_interval < 2 {
            return Err(ConfigError::InvalidRange(
                "recovery_week_interval must be at least 2",
            ));
        }
        if !(p.fallback_seed_mileage_km.is_finite() && p.fallback_seed_mileage_km > 0.0) {
            return Err(ConfigError::InvalidRange(
                "fallback_seed_mileage_km must be positive",
            ));
        }
        if !(0.0 < p.base_phase_end
            && p.base_phase_end < p.strength_phase_end
            && p.strength_phase_end < p.peak_phase_end
            && p.peak_phase_end < 1.0)
        {
            return Err(ConfigError::InvalidOrdering(
                "phase boundaries must satisfy 0 < base < strength < peak < 1",
            ));
        }

        let s = &self.schedule;
        if !(s.long_run_share > 0.0 && s.long_run_share <= 1.0) {
            return Err(ConfigError::InvalidRange("long_run_share must be in (0, 1]"));
        }
        if !(s.pace_floor_min_per_km > 0.0
            && s.fallback_pace_min_per_km >= s.pace_floor_min_per_km)
        {
            return Err(ConfigError::InvalidRange(
                "pace floor must be positive and not above the fallback pace",
            ));
        }
        if !(s.pace_range_half_width >= 0.0 && s.min_session_distance_km > 0.0) {
            return Err(ConfigError::InvalidRange(
                "pace_range_half_width must be >= 0 and min_session_distance_km > 0",
            ));
        }

        let v = &self.validation;
        if !(v.long_run_increase_cap > 0.0 && v.distance_tolerance_km > 0.0) {
            return Err(ConfigError::InvalidRange(
                "long_run_increase_cap and distance_tolerance_km must be positive",
            ));
        }
        if !(v.default_session_distance_km > 0.0 && v.default_session_pace_min_per_km > 0.0) {
            return Err(ConfigError::InvalidRange(
                "default session distance and pace must be positive",
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        override_from_env(
            "PIERRE_PLAN_BEGINNER_MAX_WEEKLY_KM",
            &mut self.metrics.beginner_max_weekly_km,
        )?;
        override_from_env(
            "PIERRE_PLAN_INTERMEDIATE_MAX_WEEKLY_KM",
            &mut self.metrics.intermediate_max_weekly_km,
        )?;
        override_from_env(
            "PIERRE_PLAN_HIGH_RISK_SESSIONS",
            &mut self.metrics.high_risk_session_count,
        )?;
        override_from_env(
            "PIERRE_PLAN_LOW_RISK_SESSIONS",
            &mut self.metrics.low_risk_session_count,
        )?;
        override_from_env("PIERRE_PLAN_MIN_WEEKS", &mut self.progression.min_weeks)?;
        override_from_env("PIERRE_PLAN_MAX_WEEKS", &mut self.progression.max_weeks)?;
        override_from_env(
            "PIERRE_PLAN_WEEKLY_INCREASE_CAP",
            &mut self.progression.weekly_increase_cap,
        )?;
        override_from_env(
            "PIERRE_PLAN_RECOVERY_FACTOR",
            &mut self.progression.recovery_week_factor,
        )?;
        override_from_env(
            "PIERRE_PLAN_RECOVERY_INTERVAL",
            &mut self.progression.recovery_week_interval,
        )?;
        override_from_env("PIERRE_PLAN_LONG_RUN_DAY", &mut self.schedule.long_run_day)?;
        override_from_env(
            "PIERRE_PLAN_LONG_RUN_SHARE",
            &mut self.schedule.long_run_share,
        )?;
        override_from_env(
            "PIERRE_PLAN_PACE_FLOOR",
            &mut self.schedule.pace_floor_min_per_km,
        )?;
        override_from_env(
            "PIERRE_PLAN_LONG_RUN_INCREASE_CAP",
            &mut self.validation.long_run_increase_cap,
        )?;
        override_from_env(
            "PIERRE_PLAN_DISTANCE_TOLERANCE_KM",
            &mut self.validation.distance_tolerance_km,
        )?;
        Ok(self)
    }
}

/// Overwrite `target` with the parsed value of `key` when the variable is set
fn override_from_env<T: FromStr>(key: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(val) = env::var(key) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {key}: {val}")))?;
    }
    Ok(())
}
