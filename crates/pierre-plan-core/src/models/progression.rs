// ABOUTME: Progression week model and periodization phases
// ABOUTME: One entry of the week-indexed target-mileage curve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Periodization phase of a planning week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Aerobic volume foundation
    BaseBuilding,
    /// Increasing volume with quality work
    StrengthBuilding,
    /// Highest load of the cycle
    PeakTraining,
    /// Reduced load before the goal event
    Taper,
}

impl TrainingPhase {
    /// All phases in chronological order
    pub const ALL: [Self; 4] = [
        Self::BaseBuilding,
        Self::StrengthBuilding,
        Self::PeakTraining,
        Self::Taper,
    ];
}

impl Display for TrainingPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseBuilding => write!(f, "base_building"),
            Self::StrengthBuilding => write!(f, "strength_building"),
            Self::PeakTraining => write!(f, "peak_training"),
            Self::Taper => write!(f, "taper"),
        }
    }
}

/// One week of the target-mileage curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionWeek {
    /// 1-based week number
    pub week_index: u32,
    /// Target volume for the week (km)
    pub target_mileage_km: f64,
    /// Periodization phase
    pub phase: TrainingPhase,
    /// Deliberately reduced week that does not compound
    pub is_recovery_week: bool,
}
