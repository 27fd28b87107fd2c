// ABOUTME: Planning constants for metrics thresholds, progression ratios and session prescriptions
// ABOUTME: Pure data defaults, overridable through the engine's PlanningConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planning constants
//!
//! These are the defaults the engine falls back to when no configuration is
//! supplied. The injury-risk thresholds and the 10 % / 0.8 progression ratios
//! are coaching rules of thumb rather than values derived from a cited study,
//! which is why every one of them can be overridden.

/// Fitness metric thresholds
pub mod metrics {
    /// Weekly volume below which a runner is classified as beginner (km)
    pub const BEGINNER_MAX_WEEKLY_KM: f64 = 10.0;

    /// Weekly volume below which a runner is classified as intermediate (km)
    pub const INTERMEDIATE_MAX_WEEKLY_KM: f64 = 25.0;

    /// Record count below which the whole history is treated as one week
    pub const SINGLE_WEEK_RECORD_THRESHOLD: usize = 7;

    /// Number of most recent records inspected by the injury-risk heuristic
    pub const INJURY_RISK_WINDOW: usize = 7;

    /// Sessions in the window above which injury risk is high
    pub const HIGH_RISK_SESSION_COUNT: usize = 5;

    /// Sessions in the window below which injury risk is low
    pub const LOW_RISK_SESSION_COUNT: usize = 2;

    /// Tukey fence multiplier for pace outlier removal
    pub const IQR_FENCE_MULTIPLIER: f64 = 1.5;
}

/// Mileage progression and periodization
pub mod progression {
    /// Minimum preparation window in weeks
    pub const MIN_PLANNING_WEEKS: u32 = 12;

    /// Longest plan accepted, in weeks
    pub const MAX_PLANNING_WEEKS: u32 = 104;

    /// Maximum week-over-week volume increase (10 %)
    pub const WEEKLY_INCREASE_CAP: f64 = 0.10;

    /// Volume multiplier applied during recovery weeks
    pub const RECOVERY_WEEK_FACTOR: f64 = 0.8;

    /// Every Nth week is a recovery week
    pub const RECOVERY_WEEK_INTERVAL: u32 = 4;

    /// Seed volume when the snapshot carries no mileage at all (km/week)
    pub const FALLBACK_SEED_MILEAGE_KM: f64 = 10.0;

    /// Fraction of the horizon spent in base building
    pub const BASE_PHASE_END: f64 = 0.3;

    /// Fraction of the horizon at which strength building ends
    pub const STRENGTH_PHASE_END: f64 = 0.7;

    /// Fraction of the horizon at which peak training ends and taper begins
    pub const PEAK_PHASE_END: f64 = 0.9;
}

/// Session prescription defaults
pub mod sessions {
    /// Pace used when the runner has no valid pace history (min/km)
    pub const FALLBACK_PACE_MIN_PER_KM: f64 = 7.0;

    /// Fastest pace the engine will ever prescribe (min/km)
    pub const PACE_FLOOR_MIN_PER_KM: f64 = 3.0;

    /// Half width of a prescribed pace range (min/km)
    pub const PACE_RANGE_HALF_WIDTH: f64 = 0.15;

    /// Share of the weekly volume given to the long run
    pub const LONG_RUN_SHARE: f64 = 0.35;

    /// Shortest non-long session the assembler prescribes (km)
    pub const MIN_SESSION_DISTANCE_KM: f64 = 3.0;

    /// Warm-up for standard sessions (minutes)
    pub const STANDARD_WARM_UP_MINUTES: f64 = 10.0;

    /// Cool-down for standard sessions (minutes)
    pub const STANDARD_COOL_DOWN_MINUTES: f64 = 5.0;

    /// Warm-up for long runs and goal races (minutes)
    pub const LONG_WARM_UP_MINUTES: f64 = 15.0;

    /// Cool-down for long runs and goal races (minutes)
    pub const LONG_COOL_DOWN_MINUTES: f64 = 10.0;

    /// Pace offsets relative to the runner's average pace (min/km)
    pub mod pace_offsets {
        /// Easy aerobic running
        pub const BASE: f64 = 0.0;
        /// Long run, slower than average
        pub const LONG_RUN: f64 = 0.5;
        /// Interval repetitions
        pub const INTERVAL: f64 = -1.0;
        /// Tempo / threshold running
        pub const TEMPO: f64 = -0.5;
        /// Fartlek
        pub const FARTLEK: f64 = -0.3;
        /// Goal race effort
        pub const GOAL_RACE: f64 = -0.5;
    }
}

/// Plan validation tolerances and the substitute session
pub mod validation {
    /// Maximum increase of a long run over the previous long run (10 %)
    pub const LONG_RUN_INCREASE_CAP: f64 = 0.10;

    /// Allowed gap between prescribed distance and duration / pace (km)
    pub const DISTANCE_TOLERANCE_KM: f64 = 0.5;

    /// Distance of the substitute Base session (km)
    pub const DEFAULT_SESSION_DISTANCE_KM: f64 = 5.0;

    /// Pace of the substitute Base session (min/km)
    pub const DEFAULT_SESSION_PACE_MIN_PER_KM: f64 = 7.0;
}

/// Standard race distances (km)
pub mod race_distances {
    /// 5 kilometres
    pub const FIVE_K_KM: f64 = 5.0;
    /// 10 kilometres
    pub const TEN_K_KM: f64 = 10.0;
    /// Half marathon
    pub const HALF_MARATHON_KM: f64 = 21.0975;
    /// Marathon
    pub const MARATHON_KM: f64 = 42.195;
}
