// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use workout_tracker::config::Config;
use workout_tracker::db::RecordStore;
use workout_tracker::models::{
    default_exercises, Exercise, MuscleGroup, WorkoutExercise, WorkoutSession,
};
use workout_tracker::AppState;

/// Create a test app backed by an in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> AppState {
    AppState::new(Config::default(), RecordStore::in_memory())
}

/// Fixed UTC instant for deterministic reports.
#[allow(dead_code)]
pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// First seed exercise targeting `group`.
#[allow(dead_code)]
pub fn seed_exercise(group: MuscleGroup) -> Exercise {
    default_exercises()
        .into_iter()
        .find(|e| e.muscle_group == group)
        .expect("seed catalog covers every muscle group")
}

/// Session with explicit totals and one single-set entry per listed group.
#[allow(dead_code)]
pub fn make_session(
    id: &str,
    date: DateTime<Utc>,
    calories: u32,
    duration: u32,
    groups: &[MuscleGroup],
) -> WorkoutSession {
    WorkoutSession {
        id: id.to_string(),
        date,
        exercises: groups
            .iter()
            .map(|g| WorkoutExercise::new(seed_exercise(*g), 1))
            .collect(),
        total_calories: calories,
        total_duration: duration,
        saved: false,
    }
}

/// Scratch directory unique to this test run.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "workout-tracker-it-{}-{}-{}",
        name,
        std::process::id(),
        nanos
    ))
}
