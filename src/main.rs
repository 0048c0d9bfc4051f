// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout report runner.
//!
//! Opens the configured data directory, builds a report for the configured
//! window and prints it as JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{config::Config, AppState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging (to stderr; stdout carries the report)
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        window = %config.report_window,
        "Starting workout report"
    );

    let state = AppState::open(config)?;
    let report = state.reports.build(state.config.report_window)?;

    tracing::info!(
        sessions = report.summary.count,
        calories = report.summary.calories,
        duration = report.summary.duration,
        "Report ready"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
