// ABOUTME: Integration tests for the target-mileage progression curve
// ABOUTME: Verifies horizon checks, capped growth, recovery weeks and phase assignment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, test_config};
use pierre_plan_core::models::{FitnessSnapshot, TrainingPhase};
use pierre_plan_core::{ErrorCode, PlanError};
use pierre_plan_engine::config::ProgressionConfig;
use pierre_plan_engine::ProgressionPlanner;

fn planner() -> ProgressionPlanner {
    init_test_logging();
    ProgressionPlanner::new(test_config().progression)
}

#[test]
fn test_short_horizon_is_rejected() {
    let snapshot = FitnessSnapshot::with_weekly_mileage(20.0, 6.0);
    let error = planner().plan(&snapshot, 11).unwrap_err();

    assert_eq!(error, PlanError::insufficient_horizon(11, 12));
    assert_eq!(error.code(), ErrorCode::InsufficientHorizon);
    assert_eq!(
        error.to_string(),
        "Need at least 12 weeks to prepare, only 11 available"
    );
}

#[test]
fn test_curve_has_one_entry_per_week() {
    let snapshot = FitnessSnapshot::with_weekly_mileage(20.0, 6.0);
    for weeks in [12, 16, 24] {
        let curve = planner().plan(&snapshot, weeks).unwrap();
        assert_eq!(curve.len(), weeks as usize);
        for (index, week) in curve.iter().enumerate() {
            assert_eq!(week.week_index as usize, index + 1);
            assert!(TrainingPhase::ALL.contains(&week.phase));
            assert!(week.target_mileage_km.is_finite() && week.target_mileage_km > 0.0);
        }
    }
}

#[test]
fn test_sixteen_week_curve_from_twenty_km() {
    let snapshot = FitnessSnapshot::with_weekly_mileage(20.0, 6.0);
    let curve = planner().plan(&snapshot, 16).unwrap();
    let targets: Vec<f64> = curve.iter().map(|week| week.target_mileage_km).collect();

    assert!((targets[0] - 22.0).abs() < 1e-9);
    assert!((targets[1] - 24.2).abs() < 1e-9);
    assert!((targets[2] - 26.62).abs() < 1e-9);
    // recovery week scales the previous level down
    assert!((targets[3] - targets[2] * 0.8).abs() < 1e-9);
    assert!(curve[3].is_recovery_week);
    // growth resumes from the pre-recovery level
    assert!((targets[4] - targets[2] * 1.1).abs() < 1e-9);
}

#[test]
fn test_non_recovery_growth_is_capped_and_recovery_weeks_dip() {
    let snapshot = FitnessSnapshot::with_weekly_mileage(35.0, 5.5);
    let curve = planner().plan(&snapshot, 20).unwrap();

    let mut previous_build: Option<f64> = None;
    for (index, week) in curve.iter().enumerate() {
        if week.is_recovery_week {
            assert!(week.target_mileage_km <= curve[index - 1].target_mileage_km + 1e-6);
        } else {
            if let Some(previous) = previous_build {
                assert!(week.target_mileage_km <= previous * 1.1 + 1e-6);
            }
            previous_build = Some(week.target_mileage_km);
        }
    }
}

#[test]
fn test_phase_boundaries_for_sixteen_weeks() {
    let curve = planner()
        .plan(&FitnessSnapshot::with_weekly_mileage(20.0, 6.0), 16)
        .unwrap();
    let phases: Vec<TrainingPhase> = curve.iter().map(|week| week.phase).collect();

    assert!(phases[..5].iter().all(|p| *p == TrainingPhase::BaseBuilding));
    assert!(phases[5..12].iter().all(|p| *p == TrainingPhase::StrengthBuilding));
    assert!(phases[12..15].iter().all(|p| *p == TrainingPhase::PeakTraining));
    assert_eq!(phases[15], TrainingPhase::Taper);
}

#[test]
fn test_empty_snapshot_uses_fallback_seed() {
    let curve = planner().plan(&FitnessSnapshot::default(), 12).unwrap();
    assert!((curve[0].target_mileage_km - 11.0).abs() < 1e-9);
}

#[test]
fn test_terminal_curve_caps_and_lands_on_terminal() {
    let curve = planner().plan_with_terminal(15.0, 14, 21.0975).unwrap();

    assert!(curve
        .iter()
        .all(|week| week.target_mileage_km <= 21.0975 + 1e-9));
    assert!((curve[13].target_mileage_km - 21.0975).abs() < 1e-12);
    assert!(planner().plan_with_terminal(15.0, 14, 0.0).is_err());
    assert!(planner().plan_with_terminal(15.0, 8, 21.0).is_err());
}

#[test]
fn test_custom_minimum_horizon() {
    let planner = ProgressionPlanner::new(ProgressionConfig {
        min_weeks: 4,
        ..ProgressionConfig::default()
    });
    let curve = planner.plan_from(10.0, 4).unwrap();
    assert_eq!(curve.len(), 4);
    assert!(curve[3].is_recovery_week);
}

#[test]
fn test_long_horizon_is_rejected() {
    let snapshot = FitnessSnapshot::with_weekly_mileage(20.0, 6.0);
    // roughly 275 years of weeks would compound past f64::MAX
    let error = planner().plan(&snapshot, 14_350).unwrap_err();

    assert_eq!(error, PlanError::horizon_too_long(14_350, 104));
    assert_eq!(error.code(), ErrorCode::HorizonTooLong);
    assert!(planner().plan_with_terminal(12.0, 105, 42.195).is_err());

    let planner = ProgressionPlanner::new(ProgressionConfig {
        max_weeks: 20,
        ..ProgressionConfig::default()
    });
    assert_eq!(planner.plan_from(10.0, 20).unwrap().len(), 20);
    assert!(planner.plan_from(10.0, 21).is_err());
}
