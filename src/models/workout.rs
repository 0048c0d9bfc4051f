// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout session and saved-workout models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Exercise, MuscleGroup};

/// An exercise paired with the number of sets chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutExercise {
    /// Embedded copy of the catalog entry
    pub exercise: Exercise,
    pub sets: u32,
    /// Minutes actually spent, when the user overrode the estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<u32>,
}

impl WorkoutExercise {
    pub fn new(exercise: Exercise, sets: u32) -> Self {
        Self {
            exercise,
            sets,
            actual_duration: None,
        }
    }

    pub fn calories(&self) -> u32 {
        self.exercise.calories.saturating_mul(self.sets)
    }

    pub fn duration(&self) -> u32 {
        self.exercise.duration.saturating_mul(self.sets)
    }
}

/// Derived totals for a list of exercises: (calories, minutes).
pub fn totals(exercises: &[WorkoutExercise]) -> (u32, u32) {
    exercises.iter().fold((0u32, 0u32), |(calories, duration), we| {
        (
            calories.saturating_add(we.calories()),
            duration.saturating_add(we.duration()),
        )
    })
}

/// A completed workout.
///
/// Stored under the `fitness_sessions` key. Sessions are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSession {
    pub id: String,
    /// When the workout was completed (ISO 8601 on disk)
    #[serde(with = "crate::time_utils::iso8601")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    pub exercises: Vec<WorkoutExercise>,
    pub total_calories: u32,
    /// Minutes
    pub total_duration: u32,
    /// Whether the user also kept it as a named template
    pub saved: bool,
}

impl WorkoutSession {
    /// Build a session, deriving totals from the exercises.
    pub fn new(
        id: String,
        date: DateTime<Utc>,
        exercises: Vec<WorkoutExercise>,
        saved: bool,
    ) -> Self {
        let (total_calories, total_duration) = totals(&exercises);
        Self {
            id,
            date,
            exercises,
            total_calories,
            total_duration,
            saved,
        }
    }
}

/// A named, reusable workout template.
///
/// Stored under the `fitness_saved_workouts` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SavedWorkout {
    pub id: String,
    pub name: String,
    #[serde(with = "crate::time_utils::iso8601")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    /// Primary category
    pub muscle_group: MuscleGroup,
    pub exercises: Vec<WorkoutExercise>,
    pub total_calories: u32,
    pub total_duration: u32,
}

impl SavedWorkout {
    /// Template built from a completed session.
    pub fn from_session(
        id: String,
        name: impl Into<String>,
        muscle_group: MuscleGroup,
        session: &WorkoutSession,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date: session.date,
            muscle_group,
            exercises: session.exercises.clone(),
            total_calories: session.total_calories,
            total_duration: session.total_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_exercises;
    use chrono::TimeZone;

    #[test]
    fn test_totals_multiply_by_sets() {
        let catalog = default_exercises();
        // Push-up: 7 cal / 2 min; Squat: 10 cal / 3 min
        let exercises = vec![
            WorkoutExercise::new(catalog[0].clone(), 3),
            WorkoutExercise::new(catalog[1].clone(), 2),
        ];
        assert_eq!(totals(&exercises), (7 * 3 + 10 * 2, 2 * 3 + 3 * 2));
        assert_eq!(totals(&[]), (0, 0));
    }

    #[test]
    fn test_session_json_layout() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let session = WorkoutSession::new(
            "1709625600000".to_string(),
            date,
            vec![WorkoutExercise::new(default_exercises()[2].clone(), 1)],
            false,
        );

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["date"], "2024-03-05T08:00:00.000Z");
        assert_eq!(value["totalCalories"], 5);
        assert_eq!(value["totalDuration"], 1);
        assert_eq!(value["exercises"][0]["exercise"]["muscleGroup"], "Bụng");
        assert!(value["exercises"][0].get("actualDuration").is_none());
    }

    #[test]
    fn test_session_rejects_invalid_date() {
        let json = r#"{"id":"1","date":"yesterday","exercises":[],"totalCalories":0,"totalDuration":0,"saved":false}"#;
        let err = serde_json::from_str::<WorkoutSession>(json).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn test_saved_workout_copies_session_totals() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        let session = WorkoutSession::new(
            "1".to_string(),
            date,
            vec![WorkoutExercise::new(default_exercises()[1].clone(), 4)],
            true,
        );
        let saved = SavedWorkout::from_session("2".to_string(), "Leg day", MuscleGroup::Legs, &session);

        assert_eq!(saved.total_calories, 40);
        assert_eq!(saved.total_duration, 12);
        assert_eq!(saved.date, date);
        assert_eq!(saved.exercises, session.exercises);
    }
}
