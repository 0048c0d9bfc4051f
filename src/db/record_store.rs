// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed record store over a key-value backend.
//!
//! Provides whole-collection operations for:
//! - Exercises (catalog, seeded with defaults on first read)
//! - Sessions (append-only workout log)
//! - Saved workouts (named templates, individually deletable)
//!
//! Every write is a read-modify-write of the full collection. Two writers
//! sharing one backend can lose each other's updates; a single active
//! writer is assumed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::db::backend::{KeyValueBackend, MemoryBackend};
use crate::db::collections;
use crate::error::{AppError, Result};
use crate::models::{default_exercises, Exercise, SavedWorkout, WorkoutSession};

/// Record store handle. Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh in-memory map (for tests and previews).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// Get the exercise catalog.
    ///
    /// Returns the seed catalog when nothing usable is stored. The seed is
    /// not written back until an exercise is added.
    pub fn exercises(&self) -> Result<Vec<Exercise>> {
        Ok(self
            .load(collections::EXERCISES)?
            .unwrap_or_else(default_exercises))
    }

    /// Overwrite the exercise catalog.
    pub fn put_exercises(&self, exercises: &[Exercise]) -> Result<()> {
        self.save(collections::EXERCISES, exercises)
    }

    /// Append an exercise to the catalog.
    ///
    /// Ids must stay unique within the catalog.
    pub fn add_exercise(&self, exercise: Exercise) -> Result<()> {
        let mut exercises = self.exercises()?;
        if exercises.iter().any(|e| e.id == exercise.id) {
            return Err(AppError::Validation(format!(
                "Exercise id {} already exists",
                exercise.id
            )));
        }
        tracing::info!(
            exercise_id = %exercise.id,
            name = %exercise.name,
            muscle_group = %exercise.muscle_group,
            "Adding exercise"
        );
        exercises.push(exercise);
        self.put_exercises(&exercises)
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Get all sessions in insertion order.
    pub fn sessions(&self) -> Result<Vec<WorkoutSession>> {
        Ok(self.load(collections::SESSIONS)?.unwrap_or_default())
    }

    /// Overwrite the session log.
    pub fn put_sessions(&self, sessions: &[WorkoutSession]) -> Result<()> {
        self.save(collections::SESSIONS, sessions)
    }

    /// Append a completed session.
    pub fn add_session(&self, session: WorkoutSession) -> Result<()> {
        let mut sessions = self.sessions()?;
        tracing::info!(
            session_id = %session.id,
            exercises = session.exercises.len(),
            total_calories = session.total_calories,
            total_duration = session.total_duration,
            "Recording session"
        );
        sessions.push(session);
        self.put_sessions(&sessions)
    }

    // ─── Saved Workout Operations ────────────────────────────────

    /// Get all saved workout templates.
    pub fn saved_workouts(&self) -> Result<Vec<SavedWorkout>> {
        Ok(self.load(collections::SAVED_WORKOUTS)?.unwrap_or_default())
    }

    /// Overwrite the saved workout templates.
    pub fn put_saved_workouts(&self, workouts: &[SavedWorkout]) -> Result<()> {
        self.save(collections::SAVED_WORKOUTS, workouts)
    }

    /// Append a saved workout template.
    pub fn add_saved_workout(&self, workout: SavedWorkout) -> Result<()> {
        let mut workouts = self.saved_workouts()?;
        tracing::info!(
            workout_id = %workout.id,
            name = %workout.name,
            "Saving workout template"
        );
        workouts.push(workout);
        self.put_saved_workouts(&workouts)
    }

    /// Delete a saved workout by id.
    ///
    /// Returns `true` if a template was removed. An unknown id is a no-op
    /// and leaves the stored collection untouched.
    pub fn delete_saved_workout(&self, id: &str) -> Result<bool> {
        let mut workouts = self.saved_workouts()?;
        let before = workouts.len();
        workouts.retain(|w| w.id != id);

        if workouts.len() == before {
            tracing::debug!(workout_id = id, "Saved workout not found (no-op delete)");
            return Ok(false);
        }

        self.put_saved_workouts(&workouts)?;
        tracing::info!(workout_id = id, "Deleted saved workout");
        Ok(true)
    }

    // ─── Helper Methods ──────────────────────────────────────────

    /// Read and parse a collection.
    ///
    /// `Ok(None)` when the key is absent or its contents cannot be parsed;
    /// malformed data is logged and treated as missing. Backend failures
    /// still propagate.
    fn load<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<Vec<T>>> {
        let Some(raw) = self.backend.get(key)? else {
            tracing::debug!(collection = key, "Collection not stored yet");
            return Ok(None);
        };

        match parse_collection(key, &raw) {
            Ok(items) => {
                tracing::debug!(collection = key, count = items.len(), "Loaded collection");
                Ok(Some(items))
            }
            Err(err) => {
                tracing::warn!(collection = key, error = %err, "Ignoring malformed collection");
                Ok(None)
            }
        }
    }

    fn save<T: Serialize>(&self, key: &'static str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize {}: {}", key, e))
        })?;
        self.backend.set(key, &raw)?;
        tracing::debug!(collection = key, count = items.len(), "Stored collection");
        Ok(())
    }
}

/// Parse a stored collection blob.
///
/// This is the single place loosely-typed stored text becomes typed
/// records; timestamps that are not valid ISO 8601 fail here.
pub fn parse_collection<T: DeserializeOwned>(collection: &'static str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| AppError::Deserialization {
        collection,
        message: e.to_string(),
    })
}
