// ABOUTME: Activity record model supplied by the fitness-data provider
// ABOUTME: Tolerates missing or invalid numbers and exposes sanitised accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One completed run as delivered by the provider.
///
/// Values are stored as received. Negative, zero or non-finite numbers are
/// tolerated here and neutralised by the accessor methods, so downstream
/// statistics never see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Distance covered in kilometres
    #[serde(default)]
    pub distance_km: f64,
    /// Moving duration in minutes
    #[serde(default)]
    pub duration_minutes: f64,
    /// Start time, when the provider reported one
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Average heart rate in bpm
    #[serde(default)]
    pub average_heart_rate: Option<f64>,
}

impl ActivityRecord {
    /// Distance with invalid values coerced to 0
    #[must_use]
    pub fn sanitized_distance_km(&self) -> f64 {
        sanitize(self.distance_km)
    }

    /// Duration with invalid values coerced to 0
    #[must_use]
    pub fn sanitized_duration_minutes(&self) -> f64 {
        sanitize(self.duration_minutes)
    }

    /// Heart rate if present, finite and positive
    #[must_use]
    pub fn sanitized_heart_rate(&self) -> Option<f64> {
        self.average_heart_rate
            .filter(|hr| hr.is_finite() && *hr > 0.0)
    }

    /// Whether a pace can be derived from this record
    #[must_use]
    pub fn has_valid_pace(&self) -> bool {
        self.sanitized_distance_km() > 0.0 && self.sanitized_duration_minutes() > 0.0
    }

    /// Pace in minutes per kilometre, `None` when distance or duration is unusable
    #[must_use]
    pub fn pace_min_per_km(&self) -> Option<f64> {
        self.has_valid_pace()
            .then(|| self.sanitized_duration_minutes() / self.sanitized_distance_km())
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Builder for `ActivityRecord`
#[derive(Debug, Clone)]
pub struct ActivityRecordBuilder {
    record: ActivityRecord,
}

impl ActivityRecordBuilder {
    /// Creates a builder with the required distance and duration
    #[must_use]
    pub const fn new(distance_km: f64, duration_minutes: f64) -> Self {
        Self {
            record: ActivityRecord {
                distance_km,
                duration_minutes,
                timestamp: None,
                average_heart_rate: None,
            },
        }
    }

    /// Creates a builder from a duration expressed in seconds
    #[must_use]
    pub fn from_seconds(distance_km: f64, duration_seconds: f64) -> Self {
        Self::new(distance_km, duration_seconds / 60.0)
    }

    /// Sets the start time
    #[must_use]
    pub const fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.record.timestamp = Some(timestamp);
        self
    }

    /// Sets the average heart rate
    #[must_use]
    pub const fn average_heart_rate(mut self, bpm: f64) -> Self {
        self.record.average_heart_rate = Some(bpm);
        self
    }

    /// Builds the record
    #[must_use]
    pub fn build(self) -> ActivityRecord {
        self.record
    }
}

/// A completed workout reported back against an existing plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Day the workout was completed
    pub date: NaiveDate,
    /// Distance covered in kilometres
    #[serde(default)]
    pub distance_km: f64,
    /// Duration in minutes
    #[serde(default)]
    pub duration_minutes: f64,
    /// Free-form athlete notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
