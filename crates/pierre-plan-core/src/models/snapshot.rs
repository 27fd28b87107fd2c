// ABOUTME: Fitness snapshot derived from an athlete's activity history
// ABOUTME: Defines fitness and injury-risk tiers with parsing and display implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

/// Coarse classification of current training volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessTier {
    /// Under 10 km per week by default
    #[default]
    Beginner,
    /// Under 25 km per week by default
    Intermediate,
    /// 25 km per week or more by default
    Advanced,
}

impl Display for FitnessTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for FitnessTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(PlanError::invalid_input(format!(
                "Unknown fitness tier: {other}"
            ))),
        }
    }
}

/// Overtraining heuristic based on recent session density.
///
/// This is not a clinical injury prediction; it only reflects how many of
/// the most recent records fall inside the inspection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryRiskTier {
    /// Too little recent activity to load the athlete
    #[default]
    Low,
    /// Regular, sustainable density
    Medium,
    /// Dense recent training
    High,
}

impl Display for InjuryRiskTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for InjuryRiskTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(PlanError::invalid_input(format!(
                "Unknown injury risk tier: {other}"
            ))),
        }
    }
}

/// First and last timestamp covered by the analysed history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// Earliest dated record
    pub start: DateTime<Utc>,
    /// Latest dated record
    pub end: DateTime<Utc>,
}

/// Fitness metrics reduced from an activity history.
///
/// Every numeric field is finite and non-negative. Pace values only come
/// from records with positive distance and duration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FitnessSnapshot {
    /// Typical pace (min/km), 0 when no record carries a usable pace
    pub average_pace_min_per_km: f64,
    /// Longest single run (km)
    pub max_distance_km: f64,
    /// Mean distance per record (km)
    pub average_distance_km: f64,
    /// Mean duration per record (minutes)
    pub average_duration_minutes: f64,
    /// Average weekly volume (km)
    pub weekly_mileage_km: f64,
    /// Mean heart rate over records that report one
    pub average_heart_rate: Option<f64>,
    /// Volume classification
    pub fitness_tier: FitnessTier,
    /// Recent-density classification
    pub injury_risk_tier: InjuryRiskTier,
    /// Number of records analysed
    pub sample_count: usize,
    /// Records that contributed a pace sample
    pub pace_sample_count: usize,
    /// Pace samples dropped by the interquartile fence
    pub pace_outliers_excluded: usize,
    /// Time span of dated records
    pub coverage_period: Option<CoveragePeriod>,
}

impl FitnessSnapshot {
    /// Snapshot of an athlete with a given weekly volume and pace, all else default.
    ///
    /// Handy when a caller already knows the athlete's volume and wants to
    /// skip metrics extraction.
    #[must_use]
    pub fn with_weekly_mileage(weekly_mileage_km: f64, average_pace_min_per_km: f64) -> Self {
        Self {
            weekly_mileage_km,
            average_pace_min_per_km,
            ..Self::default()
        }
    }

    /// Whether at least one record produced a usable pace
    #[must_use]
    pub const fn has_pace(&self) -> bool {
        self.pace_sample_count > 0
    }
}
