// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalog browsing and the add-exercise flow.

use chrono::{DateTime, Utc};
use validator::{Validate, ValidationErrors};

use crate::db::RecordStore;
use crate::error::{AppError, Result};
use crate::models::{Exercise, MuscleGroup, NewExercise};
use crate::time_utils::millis_id;

/// Service for reading and extending the exercise catalog.
#[derive(Clone)]
pub struct CatalogService {
    store: RecordStore,
}

impl CatalogService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Whole catalog, seed entries included.
    pub fn list(&self) -> Result<Vec<Exercise>> {
        self.store.exercises()
    }

    /// Exercises that target `group`, in catalog order.
    pub fn by_muscle_group(&self, group: MuscleGroup) -> Result<Vec<Exercise>> {
        Ok(self
            .store
            .exercises()?
            .into_iter()
            .filter(|e| e.muscle_group == group)
            .collect())
    }

    /// Look up one exercise by id.
    pub fn get(&self, id: &str) -> Result<Exercise> {
        self.store
            .exercises()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Exercise {id}")))
    }

    /// Validate and add a user-defined exercise.
    pub fn create(&self, input: NewExercise) -> Result<Exercise> {
        self.create_at(input, Utc::now())
    }

    /// Validate and add a user-defined exercise, using `now` for its id.
    ///
    /// Nothing is written when validation fails.
    pub fn create_at(&self, input: NewExercise, now: DateTime<Utc>) -> Result<Exercise> {
        if let Err(errors) = input.validate() {
            let message = validation_message(&errors);
            tracing::debug!(error = %message, "Rejected new exercise");
            return Err(AppError::Validation(message));
        }

        let exercise = input.into_exercise(millis_id(now))?;
        self.store.add_exercise(exercise.clone())?;
        Ok(exercise)
    }
}

/// Flatten field errors into one user-facing sentence list.
///
/// Fields are reported in name order so the message is stable.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();

    if messages.is_empty() {
        "Invalid exercise".to_string()
    } else {
        messages.join("; ")
    }
}
