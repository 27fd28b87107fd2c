// ABOUTME: Environment-driven configuration for the plan service and the pierre-plan binary
// ABOUTME: Loads engine settings from defaults, PIERRE_PLAN_* overrides or a JSON config file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use pierre_plan_engine::config::PlanningConfig;
use pierre_plan_engine::schedule::MAX_RUNS_PER_WEEK;
use tracing::debug;

/// Environment variable naming a JSON `PlanningConfig` file
pub const CONFIG_FILE_ENV: &str = "PIERRE_PLAN_CONFIG_FILE";

/// Environment variable fixing the sessions per week for every plan
pub const RUNS_PER_WEEK_ENV: &str = "PIERRE_PLAN_RUNS_PER_WEEK";

/// Plan service configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceConfig {
    /// Engine thresholds
    pub planning: PlanningConfig,
    /// Sessions per week when a request does not say; `None` derives it
    /// from the athlete's fitness tier
    pub default_runs_per_week: Option<u8>,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// When `PIERRE_PLAN_CONFIG_FILE` is set the engine settings come from
    /// that file, otherwise from defaults with `PIERRE_PLAN_*` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, an
    /// override is malformed, or the resulting settings fail validation
    pub fn from_env() -> Result<Self> {
        let planning = match env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::load_planning_file(Path::new(&path))?,
            Err(_) => PlanningConfig::load()?,
        };

        let default_runs_per_week = match env::var(RUNS_PER_WEEK_ENV) {
            Ok(value) => Some(parse_runs_per_week(&value)?),
            Err(_) => None,
        };

        Ok(Self {
            planning,
            default_runs_per_week,
        })
    }

    /// Read and validate a JSON planning configuration
    ///
    /// Missing sections and fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails validation
    pub fn load_planning_file(path: &Path) -> Result<PlanningConfig> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {e}", path.display()))?;
        let planning: PlanningConfig = serde_json::from_str(&contents)
            .map_err(|e| anyhow!("Invalid config file {}: {e}", path.display()))?;
        planning.validate()?;
        debug!(path = %path.display(), "Loaded planning configuration file");
        Ok(planning)
    }
}

fn parse_runs_per_week(value: &str) -> Result<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|runs| (1..=MAX_RUNS_PER_WEEK).contains(runs))
        .ok_or_else(|| {
            anyhow!("Invalid {RUNS_PER_WEEK_ENV}: {value} (expected 1-{MAX_RUNS_PER_WEEK})")
        })
}
