// ABOUTME: Reduces raw activity records to a fitness snapshot used by every downstream stage
// ABOUTME: Outlier-robust pace, weekly volume, fitness tier, injury risk and JSON payload intake
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metrics extraction
//!
//! The extractor never fails on record content: absent, negative or
//! non-finite numbers count as zero in volume aggregates and are excluded
//! from pace statistics. Only structurally malformed JSON payloads are
//! rejected, by [`parse_activity_payload`].

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use pierre_plan_core::models::{
    ActivityRecord, CoveragePeriod, FitnessSnapshot, FitnessTier, InjuryRiskTier,
};
use pierre_plan_core::{PlanError, PlanResult};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{MetricsConfig, PlanningConfig};
use crate::statistics::{self, Quartiles};

/// Records per week assumed when records carry no dates
const ASSUMED_RECORDS_PER_WEEK: f64 = 7.0;

/// Accepted keys for each activity field, in priority order
const DISTANCE_KEYS: &[&str] = &["distance_km", "distance"];
const DURATION_MINUTES_KEYS: &[&str] = &["duration_minutes"];
const DURATION_SECONDS_KEYS: &[&str] = &["duration_seconds", "duration"];
const HEART_RATE_KEYS: &[&str] = &["average_heart_rate", "average_hr", "avg_hr"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "start_time", "date"];

/// Naive timestamp layouts accepted besides RFC 3339
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Pace statistics after outlier rejection
struct PaceSummary {
    average_min_per_km: f64,
    sample_count: usize,
    outliers_excluded: usize,
}

/// Computes fitness snapshots from activity history
#[derive(Debug, Clone)]
pub struct MetricsExtractor {
    config: MetricsConfig,
}

impl Default for MetricsExtractor {
    fn default() -> Self {
        Self::new(PlanningConfig::global().metrics.clone())
    }
}

impl MetricsExtractor {
    /// Create an extractor with explicit thresholds
    #[must_use]
    pub const fn new(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Reduce records to a snapshot
    ///
    /// An empty history yields the zero snapshot (beginner, low risk).
    #[must_use]
    pub fn extract(&self, records: &[ActivityRecord]) -> FitnessSnapshot {
        if records.is_empty() {
            debug!("No activity records, returning empty fitness snapshot");
            return FitnessSnapshot::default();
        }

        let sample_count = records.len();
        let count = sample_count as f64;

        let total_distance: f64 = records.iter().map(ActivityRecord::sanitized_distance_km).sum();
        let total_duration: f64 = records
            .iter()
            .map(ActivityRecord::sanitized_duration_minutes)
            .sum();
        let max_distance = records
            .iter()
            .map(ActivityRecord::sanitized_distance_km)
            .fold(0.0, f64::max);

        let pace = self.pace_summary(records);
        let weekly_mileage_km = finite_or_zero(self.weekly_mileage(records));
        let fitness_tier = self.classify_fitness(weekly_mileage_km);
        let injury_risk_tier = self.assess_injury_risk(records);

        let snapshot = FitnessSnapshot {
            average_pace_min_per_km: finite_or_zero(pace.average_min_per_km),
            max_distance_km: finite_or_zero(max_distance),
            average_distance_km: finite_or_zero(total_distance / count),
            average_duration_minutes: finite_or_zero(total_duration / count),
            weekly_mileage_km,
            average_heart_rate: statistics::mean(
                records.iter().filter_map(ActivityRecord::sanitized_heart_rate),
            ),
            fitness_tier,
            injury_risk_tier,
            sample_count,
            pace_sample_count: pace.sample_count,
            pace_outliers_excluded: pace.outliers_excluded,
            coverage_period: coverage_period(records),
        };

        debug!(
            sample_count,
            weekly_mileage_km = snapshot.weekly_mileage_km,
            average_pace = snapshot.average_pace_min_per_km,
            tier = %snapshot.fitness_tier,
            risk = %snapshot.injury_risk_tier,
            "Extracted fitness snapshot"
        );
        snapshot
    }

    /// Parse a JSON payload and reduce it to a snapshot
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` when the payload is not a record
    /// list or a record carries an uncoercible field
    pub fn extract_from_json(&self, payload: &Value) -> PlanResult<FitnessSnapshot> {
        let records = parse_activity_payload(payload)?;
        Ok(self.extract(&records))
    }

    /// Tier for a weekly volume; boundaries belong to the higher tier
    #[must_use]
    pub fn classify_fitness(&self, weekly_mileage_km: f64) -> FitnessTier {
        if weekly_mileage_km < self.config.beginner_max_weekly_km {
            FitnessTier::Beginner
        } else if weekly_mileage_km < self.config.intermediate_max_weekly_km {
            FitnessTier::Intermediate
        } else {
            FitnessTier::Advanced
        }
    }

    /// Estimated kilometres per week
    ///
    /// Short histories count as a single week. Dated histories average the
    /// ISO weeks that contain records; undated ones assume one record per day.
    #[must_use]
    pub fn weekly_mileage(&self, records: &[ActivityRecord]) -> f64 {
        let total: f64 = records.iter().map(ActivityRecord::sanitized_distance_km).sum();
        if records.len() < self.config.single_week_record_threshold {
            return total;
        }

        if records.iter().all(|record| record.timestamp.is_some()) {
            let mut weekly_totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
            for record in records {
                if let Some(timestamp) = record.timestamp {
                    let week = timestamp.iso_week();
                    *weekly_totals.entry((week.year(), week.week())).or_insert(0.0) +=
                        record.sanitized_distance_km();
                }
            }
            return statistics::mean(weekly_totals.into_values()).unwrap_or(0.0);
        }

        let weeks = records.len() as f64 / ASSUMED_RECORDS_PER_WEEK;
        total / weeks
    }

    /// Risk tier from the session count in the most recent window
    #[must_use]
    pub fn assess_injury_risk(&self, records: &[ActivityRecord]) -> InjuryRiskTier {
        let recent_sessions = records.len().min(self.config.injury_risk_window);

        if recent_sessions > self.config.high_risk_session_count {
            InjuryRiskTier::High
        } else if recent_sessions < self.config.low_risk_session_count {
            InjuryRiskTier::Low
        } else {
            InjuryRiskTier::Medium
        }
    }

    /// Aggregate pace over valid records inside the Tukey fence
    fn pace_summary(&self, records: &[ActivityRecord]) -> PaceSummary {
        let valid: Vec<(f64, f64, f64)> = records
            .iter()
            .filter_map(|record| {
                record.pace_min_per_km().map(|pace| {
                    (
                        record.sanitized_distance_km(),
                        record.sanitized_duration_minutes(),
                        pace,
                    )
                })
            })
            .collect();

        let paces: Vec<f64> = valid.iter().map(|(_, _, pace)| *pace).collect();
        let Some(quartiles) = Quartiles::from_values(&paces) else {
            return PaceSummary {
                average_min_per_km: 0.0,
                sample_count: 0,
                outliers_excluded: 0,
            };
        };
        let fence = quartiles.fences(self.config.iqr_fence_multiplier);

        let retained: Vec<&(f64, f64, f64)> = valid
            .iter()
            .filter(|(_, _, pace)| fence.contains(*pace))
            .collect();
        let (retained, outliers_excluded) = if retained.is_empty() {
            (valid.iter().collect(), 0)
        } else {
            let excluded = valid.len() - retained.len();
            (retained, excluded)
        };

        let (distance, duration) = retained
            .iter()
            .fold((0.0, 0.0), |(distance, duration), (d, t, _)| {
                (distance + d, duration + t)
            });

        if outliers_excluded > 0 {
            debug!(
                outliers_excluded,
                lower = fence.lower,
                upper = fence.upper,
                "Excluded pace outliers"
            );
        }

        PaceSummary {
            average_min_per_km: if distance > 0.0 {
                duration / distance
            } else {
                0.0
            },
            sample_count: retained.len(),
            outliers_excluded,
        }
    }
}

/// Parse an activity payload into records
///
/// Accepts a bare array of records or an object holding one under `runs`
/// or `activities`. Missing and null numeric fields become zero; numeric
/// strings are parsed. Durations given in seconds are converted to minutes.
/// Unparseable timestamps are dropped rather than rejected.
///
/// # Errors
///
/// Returns `PlanError::InvalidInput` when the payload shape is wrong, an
/// entry is not an object, or a numeric field cannot be coerced
pub fn parse_activity_payload(payload: &Value) -> PlanResult<Vec<ActivityRecord>> {
    let entries: &[Value] = match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("runs").or_else(|| map.get("activities")) {
            Some(Value::Array(items)) => items.as_slice(),
            None | Some(Value::Null) => &[],
            Some(other) => {
                return Err(PlanError::invalid_input(format!(
                    "Activity list must be an array, got {}",
                    json_type_name(other)
                )))
            }
        },
        other => {
            return Err(PlanError::invalid_input(format!(
                "Activity payload must be an array or object, got {}",
                json_type_name(other)
            )))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_record(index, entry))
        .collect()
}

fn parse_record(index: usize, entry: &Value) -> PlanResult<ActivityRecord> {
    let Value::Object(fields) = entry else {
        return Err(PlanError::invalid_input(format!(
            "Activity {index} must be an object, got {}",
            json_type_name(entry)
        )));
    };

    let distance_km = numeric_field(fields, index, DISTANCE_KEYS)?.unwrap_or(0.0);
    let duration_minutes = match numeric_field(fields, index, DURATION_MINUTES_KEYS)? {
        Some(minutes) => minutes,
        None => numeric_field(fields, index, DURATION_SECONDS_KEYS)?
            .map_or(0.0, |seconds| seconds / 60.0),
    };

    Ok(ActivityRecord {
        distance_km,
        duration_minutes,
        timestamp: timestamp_field(fields, index),
        average_heart_rate: numeric_field(fields, index, HEART_RATE_KEYS)?,
    })
}

fn numeric_field(
    fields: &Map<String, Value>,
    index: usize,
    keys: &[&str],
) -> PlanResult<Option<f64>> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| fields.get(*key).map(|value| (*key, value)))
    else {
        return Ok(None);
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(number) => Ok(number.as_f64()),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => text.trim().parse::<f64>().map(Some).map_err(|_| {
            PlanError::invalid_input(format!(
                "Activity {index}: field '{key}' is not numeric: {text:?}"
            ))
        }),
        other => Err(PlanError::invalid_input(format!(
            "Activity {index}: field '{key}' must be a number, got {}",
            json_type_name(other)
        ))),
    }
}

fn timestamp_field(fields: &Map<String, Value>, index: usize) -> Option<DateTime<Utc>> {
    let value = TIMESTAMP_KEYS.iter().find_map(|key| fields.get(*key))?;
    let parsed = match value {
        Value::String(text) => parse_timestamp(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
        _ => None,
    };
    if parsed.is_none() && !value.is_null() {
        debug!(index, %value, "Ignoring unparseable activity timestamp");
    }
    parsed
}

/// Parse RFC 3339, naive date-time or plain date strings as UTC
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn coverage_period(records: &[ActivityRecord]) -> Option<CoveragePeriod> {
    let mut timestamps = records.iter().filter_map(|record| record.timestamp);
    let first = timestamps.next()?;
    let (start, end) = timestamps.fold((first, first), |(start, end), timestamp| {
        (start.min(timestamp), end.max(timestamp))
    });
    Some(CoveragePeriod { start, end })
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
