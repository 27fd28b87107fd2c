// ABOUTME: Command-line tool generating a training plan from an activity JSON file
// ABOUTME: Prints the validated plan as JSON on stdout; logs and errors go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # pierre-plan
//!
//! ```text
//! pierre-plan activities.json --user-id runner-1 --target-date 2025-10-12 --goal half
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use pierre_plan_core::models::{RaceGoal, TrainingPlan};
use pierre_training_planner::plan_service::DATE_FORMAT;
use pierre_training_planner::{
    logging, ErrorResponse, PlanRequest, PlanResult, ServiceConfig, TrainingPlanService,
};
use serde_json::Value;
use tracing::info;

/// Command-line arguments
#[derive(Parser)]
#[command(name = "pierre-plan")]
#[command(about = "Generate a periodized running plan from recorded activities")]
pub struct Args {
    /// Activity JSON file, `-` for stdin
    input: PathBuf,

    /// Owner of the generated plan
    #[arg(long)]
    user_id: String,

    /// Goal date (YYYY-MM-DD)
    #[arg(long)]
    target_date: String,

    /// First plan day (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    start_date: Option<NaiveDate>,

    /// Sessions per week (1-6)
    #[arg(long)]
    runs: Option<u8>,

    /// Race goal: 5k, 10k, half, marathon or a distance such as 30km
    #[arg(long)]
    goal: Option<RaceGoal>,

    /// Pretty-print the plan JSON
    #[arg(long)]
    pretty: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn read_payload(input: &Path) -> Result<Value> {
    let raw = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read activities from stdin: {e}"))?;
        buffer
    } else {
        fs::read_to_string(input)
            .map_err(|e| anyhow!("Failed to read {}: {e}", input.display()))?
    };
    serde_json::from_str(&raw).map_err(|e| anyhow!("Activity file is not valid JSON: {e}"))
}

fn generate(service: &TrainingPlanService, args: Args, payload: &Value) -> PlanResult<TrainingPlan> {
    let snapshot = service.analyze_activity_data(payload)?;
    info!(
        samples = snapshot.sample_count,
        weekly_km = snapshot.weekly_mileage_km,
        tier = %snapshot.fitness_tier,
        "Analyzed activity data"
    );
    service.generate(PlanRequest {
        user_id: args.user_id,
        target_date: args.target_date,
        start_date: args.start_date.unwrap_or_else(|| Utc::now().date_naive()),
        snapshot,
        runs_per_week: args.runs,
        race_goal: args.goal,
    })
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init_from_env()?;

    let config = ServiceConfig::from_env()?;
    let service = TrainingPlanService::in_memory(&config);
    let payload = read_payload(&args.input)?;
    let pretty = args.pretty;

    match generate(&service, args, &payload) {
        Ok(plan) => {
            let output = if pretty {
                serde_json::to_string_pretty(&plan)?
            } else {
                serde_json::to_string(&plan)?
            };
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", serde_json::to_string(&ErrorResponse::from(&error))?);
            Ok(ExitCode::FAILURE)
        }
    }
}
