// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod report;
pub mod workout;

pub use catalog::CatalogService;
pub use report::ReportService;
pub use workout::{CompletedWorkout, DraftStep, WorkoutDraft, WorkoutRecorder};
