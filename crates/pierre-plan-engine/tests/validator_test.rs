// ABOUTME: Integration tests for plan repair and invariant enforcement
// ABOUTME: Corrupts assembled plans and checks each repair and its recorded correction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use chrono::{Datelike, Weekday};
use common::{assemble_draft, init_test_logging, plan_start, test_config};
use pierre_plan_core::models::{
    CorrectionKind, HeartRateZone, PaceRange, TrainingPlan, Workout, WorkoutType,
};
use pierre_plan_engine::PlanValidator;

fn validator() -> PlanValidator {
    init_test_logging();
    PlanValidator::from_config(&test_config())
}

fn draft() -> TrainingPlan {
    assemble_draft(plan_start(), 12, 4, None)
}

/// Index of the first workout in a 1-based week falling on `weekday`
fn index_of(plan: &TrainingPlan, week: u32, weekday: Weekday) -> usize {
    plan.workouts
        .iter()
        .position(|w| w.week_index == week && w.weekday == weekday)
        .unwrap()
}

fn kinds(plan: &TrainingPlan) -> Vec<CorrectionKind> {
    plan.corrections.iter().map(|c| c.kind).collect()
}

#[test]
fn test_clean_draft_passes_unchanged() {
    let draft = draft();
    let validated = validator().validate(&draft);

    assert!(validated.corrections.is_empty());
    assert_eq!(validated.workouts, draft.workouts);
    assert_eq!(validated.plan_id, draft.plan_id);
}

#[test]
fn test_validation_does_not_mutate_draft() {
    let mut draft = draft();
    let sunday = index_of(&draft, 2, Weekday::Sun);
    draft.workouts[sunday].workout_type = WorkoutType::Tempo;
    let before = draft.clone();

    let validated = validator().validate(&draft);

    assert_eq!(draft, before);
    assert_ne!(validated.workouts, draft.workouts);
}

#[test]
fn test_misplaced_long_run_is_swapped_onto_long_run_day() {
    let original = draft();
    let mut draft = original.clone();
    let saturday = index_of(&draft, 3, Weekday::Sat);
    let friday = index_of(&draft, 3, Weekday::Fri);
    let long_run = draft.workouts[saturday].clone();
    let base_run = draft.workouts[friday].clone();
    draft.workouts[saturday] = Workout {
        date: long_run.date,
        weekday: long_run.weekday,
        ..base_run.clone()
    };
    draft.workouts[friday] = Workout {
        date: base_run.date,
        weekday: base_run.weekday,
        ..long_run
    };

    let validated = validator().validate(&draft);

    assert_eq!(validated.workouts[saturday], original.workouts[saturday]);
    assert_eq!(validated.workouts[friday], original.workouts[friday]);
    assert_eq!(kinds(&validated), vec![CorrectionKind::LongRunMoved]);
}

#[test]
fn test_second_long_run_in_week_is_downgraded() {
    let mut draft = draft();
    let wednesday = index_of(&draft, 5, Weekday::Wed);
    assert!(draft.workouts[wednesday].workout_type.is_hard());
    draft.workouts[wednesday].workout_type = WorkoutType::LongRun;

    let validated = validator().validate(&draft);

    assert_eq!(validated.week(5).filter(|w| w.workout_type == WorkoutType::LongRun).count(), 1);
    let downgraded = &validated.workouts[wednesday];
    assert_eq!(downgraded.workout_type, WorkoutType::Base);
    assert_eq!(downgraded.heart_rate_zone, Some(HeartRateZone::Zone2To3));
    assert!(kinds(&validated).contains(&CorrectionKind::LongRunDowngraded));
}

#[test]
fn test_training_on_rest_weekday_becomes_rest() {
    let mut draft = draft();
    let sunday = index_of(&draft, 4, Weekday::Sun);
    let monday = index_of(&draft, 4, Weekday::Mon);
    let sunday_date = draft.workouts[sunday].date;
    draft.workouts[sunday] = Workout {
        date: sunday_date,
        weekday: Weekday::Sun,
        ..draft.workouts[monday].clone()
    };

    let validated = validator().validate(&draft);

    let repaired = &validated.workouts[sunday];
    assert_eq!(repaired.date, sunday_date);
    assert_eq!(repaired.workout_type, WorkoutType::Rest);
    assert_eq!(repaired.distance_km, 0.0);
    assert_eq!(kinds(&validated), vec![CorrectionKind::RestDayEnforced]);
}

#[test]
fn test_long_run_jump_is_clamped() {
    let mut draft = draft();
    let week_two = index_of(&draft, 2, Weekday::Sat);
    let week_three = index_of(&draft, 3, Weekday::Sat);
    let previous = draft.workouts[week_two].distance_km;
    draft.workouts[week_three].distance_km = previous * 2.0;

    let validated = validator().validate(&draft);

    let clamped = &validated.workouts[week_three];
    assert!((clamped.distance_km - previous * 1.1).abs() < 1e-9);
    let pace = clamped.target_pace.unwrap();
    assert!((clamped.duration_minutes / pace.midpoint() - clamped.distance_km).abs() <= 0.5);
    assert!(kinds(&validated).contains(&CorrectionKind::LongRunClamped));
}

#[test]
fn test_inconsistent_duration_is_recomputed() {
    let mut draft = draft();
    let monday = index_of(&draft, 1, Weekday::Mon);
    draft.workouts[monday].duration_minutes = 999.0;

    let validated = validator().validate(&draft);

    let workout = &validated.workouts[monday];
    let pace = workout.target_pace.unwrap();
    assert!((workout.duration_minutes - workout.distance_km * pace.midpoint()).abs() < 1e-9);
    assert_eq!(kinds(&validated), vec![CorrectionKind::DurationRecomputed]);
}

#[test]
fn test_corrupt_workouts_are_replaced_by_default_session() {
    let mut draft = draft();
    let nan_day = index_of(&draft, 6, Weekday::Mon);
    let negative_day = index_of(&draft, 6, Weekday::Wed);
    let inverted_day = index_of(&draft, 7, Weekday::Mon);
    let no_zone_day = index_of(&draft, 7, Weekday::Fri);
    draft.workouts[nan_day].distance_km = f64::NAN;
    draft.workouts[negative_day].duration_minutes = -10.0;
    draft.workouts[inverted_day].target_pace = Some(PaceRange {
        min_min_per_km: 7.0,
        max_min_per_km: 5.0,
    });
    draft.workouts[no_zone_day].heart_rate_zone = None;

    let validated = validator().validate(&draft);

    for index in [nan_day, negative_day, inverted_day, no_zone_day] {
        let workout = &validated.workouts[index];
        assert_eq!(workout.workout_type, WorkoutType::Base);
        assert_eq!(workout.distance_km, 5.0);
        assert!((workout.target_pace.unwrap().midpoint() - 7.0).abs() < 1e-9);
        assert!((workout.duration_minutes - 35.0).abs() < 1e-9);
        assert_eq!(workout.heart_rate_zone, Some(HeartRateZone::Zone2To3));
    }
    let substituted = kinds(&validated)
        .into_iter()
        .filter(|k| *k == CorrectionKind::SubstitutedDefault)
        .count();
    assert_eq!(substituted, 4);
}

#[test]
fn test_rest_day_with_volume_is_normalized() {
    let mut draft = draft();
    let tuesday = index_of(&draft, 2, Weekday::Tue);
    assert_eq!(draft.workouts[tuesday].workout_type, WorkoutType::Rest);
    draft.workouts[tuesday].distance_km = 4.0;

    let validated = validator().validate(&draft);

    assert_eq!(validated.workouts[tuesday].distance_km, 0.0);
    assert_eq!(kinds(&validated), vec![CorrectionKind::RestNormalized]);
}

#[test]
fn test_shuffled_workouts_are_sorted_and_weekdays_realigned() {
    let mut draft = draft();
    draft.workouts.reverse();
    draft.workouts[0].weekday = Weekday::Wed;

    let validated = validator().validate(&draft);

    assert!(validated.workouts.windows(2).all(|p| p[0].date < p[1].date));
    assert!(validated
        .workouts
        .iter()
        .all(|w| w.weekday == w.date.weekday()));
    assert_eq!(kinds(&validated), vec![CorrectionKind::WeekdayRealigned]);
}
