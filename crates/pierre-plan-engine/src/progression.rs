// ABOUTME: Week-indexed target-mileage curve with capped growth and periodic recovery weeks
// ABOUTME: Assigns periodization phases by fractional position within the horizon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_plan_core::models::{FitnessSnapshot, ProgressionWeek, TrainingPhase};
use pierre_plan_core::{PlanError, PlanResult};
use tracing::debug;

use crate::config::{PlanningConfig, ProgressionConfig};

/// Builds target-mileage curves
///
/// Non-recovery weeks compound by the weekly increase cap. Recovery weeks
/// scale the current level down without advancing it, so the week after a
/// recovery week resumes growth from the pre-recovery level.
#[derive(Debug, Clone)]
pub struct ProgressionPlanner {
    config: ProgressionConfig,
}

impl Default for ProgressionPlanner {
    fn default() -> Self {
        Self::new(PlanningConfig::global().progression.clone())
    }
}

impl ProgressionPlanner {
    /// Create a planner with explicit parameters
    #[must_use]
    pub const fn new(config: ProgressionConfig) -> Self {
        Self { config }
    }

    /// Parameters in use
    #[must_use]
    pub const fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Curve seeded from the snapshot's weekly mileage
    ///
    /// A snapshot without volume is seeded with the fallback mileage.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InsufficientHorizon` when `weeks` is below the
    /// minimum preparation window and `PlanError::HorizonTooLong` when it
    /// exceeds the maximum plan length
    pub fn plan(&self, snapshot: &FitnessSnapshot, weeks: u32) -> PlanResult<Vec<ProgressionWeek>> {
        let seed = if snapshot.weekly_mileage_km.is_finite() && snapshot.weekly_mileage_km > 0.0 {
            snapshot.weekly_mileage_km
        } else {
            debug!(
                fallback_km = self.config.fallback_seed_mileage_km,
                "Snapshot has no weekly volume, seeding progression with fallback mileage"
            );
            self.config.fallback_seed_mileage_km
        };
        self.plan_from(seed, weeks)
    }

    /// Curve seeded from an explicit starting volume
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InsufficientHorizon` when `weeks` is below the
    /// minimum preparation window and `PlanError::HorizonTooLong` when it
    /// exceeds the maximum plan length
    pub fn plan_from(&self, start_mileage_km: f64, weeks: u32) -> PlanResult<Vec<ProgressionWeek>> {
        self.ensure_horizon(weeks)?;
        Ok(self.build(start_mileage_km, weeks, None))
    }

    /// Curve that stops compounding at `terminal_km` and ends on it exactly
    ///
    /// Used for the long-run curve, which climbs from the athlete's longest
    /// run towards the race distance.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InsufficientHorizon` or `PlanError::HorizonTooLong`
    /// for a horizon outside the configured bounds and
    /// `PlanError::InvalidInput` for a non-positive terminal value
    pub fn plan_with_terminal(
        &self,
        start_mileage_km: f64,
        weeks: u32,
        terminal_km: f64,
    ) -> PlanResult<Vec<ProgressionWeek>> {
        self.ensure_horizon(weeks)?;
        if !(terminal_km.is_finite() && terminal_km > 0.0) {
            return Err(PlanError::invalid_input(format!(
                "Terminal mileage must be positive, got {terminal_km}"
            )));
        }
        Ok(self.build(start_mileage_km, weeks, Some(terminal_km)))
    }

    /// Phase of 0-based week `week` in a horizon of `total_weeks`
    #[must_use]
    pub fn phase_for(&self, week: u32, total_weeks: u32) -> TrainingPhase {
        if total_weeks == 0 {
            return TrainingPhase::BaseBuilding;
        }
        let position = f64::from(week) / f64::from(total_weeks);
        if position < self.config.base_phase_end {
            TrainingPhase::BaseBuilding
        } else if position < self.config.strength_phase_end {
            TrainingPhase::StrengthBuilding
        } else if position < self.config.peak_phase_end {
            TrainingPhase::PeakTraining
        } else {
            TrainingPhase::Taper
        }
    }

    /// Whether 0-based week `week` is a recovery week
    #[must_use]
    pub const fn is_recovery_week(&self, week: u32) -> bool {
        let interval = self.config.recovery_week_interval;
        interval > 0 && week % interval == interval - 1
    }

    fn ensure_horizon(&self, weeks: u32) -> PlanResult<()> {
        if weeks < self.config.min_weeks {
            return Err(PlanError::insufficient_horizon(
                i64::from(weeks),
                self.config.min_weeks,
            ));
        }
        if weeks > self.config.max_weeks {
            return Err(PlanError::horizon_too_long(
                i64::from(weeks),
                self.config.max_weeks,
            ));
        }
        Ok(())
    }

    fn build(&self, start_mileage_km: f64, weeks: u32, terminal_km: Option<f64>) -> Vec<ProgressionWeek> {
        let mut current = if start_mileage_km.is_finite() {
            start_mileage_km.max(0.0)
        } else {
            0.0
        };
        let growth = 1.0 + self.config.weekly_increase_cap;

        let curve: Vec<ProgressionWeek> = (0..weeks)
            .map(|week| {
                let is_recovery_week = self.is_recovery_week(week);
                let mut target = if is_recovery_week {
                    current * self.config.recovery_week_factor
                } else {
                    let grown = current * growth;
                    current = terminal_km.map_or(grown, |terminal| grown.min(terminal));
                    current
                };
                if week + 1 == weeks {
                    if let Some(terminal) = terminal_km {
                        target = terminal;
                    }
                }

                ProgressionWeek {
                    week_index: week + 1,
                    target_mileage_km: target,
                    phase: self.phase_for(week, weeks),
                    is_recovery_week,
                }
            })
            .collect();

        debug!(
            weeks,
            start_km = start_mileage_km,
            final_km = curve.last().map_or(0.0, |week| week.target_mileage_km),
            "Built progression curve"
        );
        curve
    }
}
