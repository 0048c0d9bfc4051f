// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod exercise;
pub mod report;
pub mod workout;

pub use exercise::{default_exercises, Exercise, MuscleGroup, NewExercise};
pub use report::{CategoryCount, DailyBucket, Report, ReportSummary, TimeWindow};
pub use workout::{SavedWorkout, WorkoutExercise, WorkoutSession};
