// ABOUTME: Error types exposed by the training planner service and their JSON response format
// ABOUTME: Re-exports the core PlanError and maps it to a serializable error payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Every service operation returns [`PlanResult`]. Callers that need a wire
//! representation convert the error into an [`ErrorResponse`].

use serde::{Deserialize, Serialize};

pub use pierre_plan_core::errors::{ErrorCode, PlanError, PlanResult};

/// Serialized error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorResponseDetails,
}

/// Error code, numeric code and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Numeric form of `code`
    pub status: u16,
    /// Human-readable message
    pub message: String,
}

impl From<&PlanError> for ErrorResponse {
    fn from(error: &PlanError) -> Self {
        let code = error.code();
        Self {
            error: ErrorResponseDetails {
                code,
                status: code.as_u16(),
                message: error.to_string(),
            },
        }
    }
}

impl From<PlanError> for ErrorResponse {
    fn from(error: PlanError) -> Self {
        Self::from(&error)
    }
}
