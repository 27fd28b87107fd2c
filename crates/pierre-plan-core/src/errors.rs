// ABOUTME: Plan-generation error types raised synchronously by the engine and service
// ABOUTME: Maps each business-rule violation to a stable, serializable error code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Errors
//!
//! Every error here is an expected, caller-recoverable condition. The engine
//! never logs or retries them; surfacing is the caller's responsibility.
//! Corrupt workouts found while validating a plan are repaired rather than
//! raised, see the validator in `pierre-plan-engine`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes for plan generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Malformed activity payload or request parameter
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Empty or missing user identifier
    #[serde(rename = "INVALID_IDENTIFIER")]
    InvalidIdentifier = 3001,
    /// Target date not in `YYYY-MM-DD` format
    #[serde(rename = "INVALID_DATE")]
    InvalidDate = 3002,

    // Planning (4000-4999)
    /// Not enough weeks before the target date
    #[serde(rename = "INSUFFICIENT_HORIZON")]
    InsufficientHorizon = 4000,
    /// Target date too far away to plan for
    #[serde(rename = "HORIZON_TOO_LONG")]
    HorizonTooLong = 4001,
}

impl ErrorCode {
    /// Numeric value of this code
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidIdentifier => "A non-empty user identifier is required",
            Self::InvalidDate => "The target date must use the YYYY-MM-DD format",
            Self::InsufficientHorizon => "Not enough weeks remain to prepare for the target date",
            Self::HorizonTooLong => "The target date is further away than the longest supported plan",
        }
    }
}

/// Errors raised by metrics extraction, progression planning and plan generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Input is not a well-formed activity collection or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// User identifier is empty
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Target date could not be parsed
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The raw value supplied by the caller
        value: String,
    },

    /// Planning horizon is shorter than the minimum preparation window
    #[error("Need at least {minimum} weeks to prepare, only {weeks} available")]
    InsufficientHorizon {
        /// Whole weeks available before the target
        weeks: i64,
        /// Minimum preparation window in weeks
        minimum: u32,
    },

    /// Planning horizon is longer than the longest supported plan
    #[error("Plans cover at most {maximum} weeks, {weeks} requested")]
    HorizonTooLong {
        /// Whole weeks available before the target
        weeks: i64,
        /// Maximum plan length in weeks
        maximum: u32,
    },
}

impl PlanError {
    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Invalid user identifier
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Unparseable date
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Horizon shorter than the minimum number of weeks
    #[must_use]
    pub const fn insufficient_horizon(weeks: i64, minimum: u32) -> Self {
        Self::InsufficientHorizon { weeks, minimum }
    }

    /// Horizon longer than the maximum number of weeks
    #[must_use]
    pub const fn horizon_too_long(weeks: i64, maximum: u32) -> Self {
        Self::HorizonTooLong { weeks, maximum }
    }

    /// Stable error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::InvalidIdentifier(_) => ErrorCode::InvalidIdentifier,
            Self::InvalidDate { .. } => ErrorCode::InvalidDate,
            Self::InsufficientHorizon { .. } => ErrorCode::InsufficientHorizon,
            Self::HorizonTooLong { .. } => ErrorCode::HorizonTooLong,
        }
    }
}

/// Result type alias for plan operations
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PlanError::insufficient_horizon(8, 12).code(),
            ErrorCode::InsufficientHorizon
        );
        assert_eq!(PlanError::invalid_date("x").code(), ErrorCode::InvalidDate);
        assert_eq!(ErrorCode::InvalidInput.as_u16(), 3000);
        assert_eq!(
            PlanError::horizon_too_long(200, 104).code(),
            ErrorCode::HorizonTooLong
        );
        assert_eq!(ErrorCode::HorizonTooLong.as_u16(), 4001);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InsufficientHorizon).unwrap_or_default();
        assert_eq!(json, "\"INSUFFICIENT_HORIZON\"");
    }

    #[test]
    fn test_error_display() {
        let error = PlanError::insufficient_horizon(8, 12);
        assert_eq!(
            error.to_string(),
            "Need at least 12 weeks to prepare, only 8 available"
        );
    }
}
