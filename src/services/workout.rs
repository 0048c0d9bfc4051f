// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout assembly and recording.
//!
//! A workout moves through three steps:
//! 1. Select: pick a muscle group, toggle exercises, choose a set count
//! 2. Active: step through the selected exercises one at a time
//! 3. Complete: record the session, optionally keeping it as a template

use chrono::{DateTime, SubsecRound, Utc};

use crate::db::RecordStore;
use crate::error::{AppError, Result};
use crate::models::workout::totals;
use crate::models::{Exercise, MuscleGroup, SavedWorkout, WorkoutExercise, WorkoutSession};
use crate::time_utils::millis_id;

/// Set count applied to a fresh selection.
pub const DEFAULT_SETS: u32 = 3;

/// Where a draft is in the workout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStep {
    Select,
    Active,
    Complete,
}

/// In-progress workout, held in memory until it is recorded.
#[derive(Debug, Clone)]
pub struct WorkoutDraft {
    muscle_group: Option<MuscleGroup>,
    selected: Vec<WorkoutExercise>,
    sets: u32,
    step: DraftStep,
    current: usize,
}

impl Default for WorkoutDraft {
    fn default() -> Self {
        Self {
            muscle_group: None,
            selected: Vec::new(),
            sets: DEFAULT_SETS,
            step: DraftStep::Select,
            current: 0,
        }
    }
}

impl WorkoutDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> DraftStep {
        self.step
    }

    pub fn muscle_group(&self) -> Option<MuscleGroup> {
        self.muscle_group
    }

    /// Choose which muscle group the picker shows. Existing selections stay.
    pub fn select_muscle_group(&mut self, group: MuscleGroup) {
        self.muscle_group = Some(group);
    }

    pub fn selected(&self) -> &[WorkoutExercise] {
        &self.selected
    }

    pub fn sets(&self) -> u32 {
        self.sets
    }

    /// Add the exercise if absent, remove it if present.
    ///
    /// Returns whether the exercise is selected afterwards. Ignored once
    /// the workout has started.
    pub fn toggle_exercise(&mut self, exercise: &Exercise) -> bool {
        if self.step != DraftStep::Select {
            return self.selected.iter().any(|we| we.exercise.id == exercise.id);
        }

        if let Some(pos) = self
            .selected
            .iter()
            .position(|we| we.exercise.id == exercise.id)
        {
            self.selected.remove(pos);
            false
        } else {
            self.selected
                .push(WorkoutExercise::new(exercise.clone(), self.sets));
            true
        }
    }

    /// Set the same set count on every selected exercise.
    ///
    /// Counts below one are raised to one. Ignored once the workout has started.
    pub fn set_sets(&mut self, sets: u32) {
        if self.step != DraftStep::Select {
            return;
        }
        self.sets = sets.max(1);
        for we in &mut self.selected {
            we.sets = self.sets;
        }
    }

    /// Derived (calories, minutes) for the current selection.
    pub fn totals(&self) -> (u32, u32) {
        totals(&self.selected)
    }

    /// Begin stepping through the selection.
    pub fn start(&mut self) -> Result<()> {
        if self.selected.is_empty() {
            return Err(AppError::Validation(
                "Select at least one exercise to start".to_string(),
            ));
        }
        if self.step != DraftStep::Select {
            return Err(AppError::Validation("Workout already started".to_string()));
        }
        self.step = DraftStep::Active;
        self.current = 0;
        tracing::debug!(exercises = self.selected.len(), "Workout started");
        Ok(())
    }

    /// Exercise currently being performed.
    pub fn current(&self) -> Option<&WorkoutExercise> {
        match self.step {
            DraftStep::Select => None,
            _ => self.selected.get(self.current),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.selected.len()
    }

    /// Move to the next exercise. Returns `false` when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.step != DraftStep::Active || self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Percentage of exercises reached, counting the current one.
    pub fn progress(&self) -> f64 {
        if self.selected.is_empty() || self.step == DraftStep::Select {
            return 0.0;
        }
        (self.current + 1) as f64 / self.selected.len() as f64 * 100.0
    }

    /// End the active workout.
    pub fn finish(&mut self) -> Result<()> {
        if self.step != DraftStep::Active {
            return Err(AppError::Validation("Workout has not been started".to_string()));
        }
        self.step = DraftStep::Complete;
        Ok(())
    }

    /// Category recorded on a template: the chosen group, else the first exercise's.
    fn primary_muscle_group(&self) -> Option<MuscleGroup> {
        self.muscle_group
            .or_else(|| self.selected.first().map(|we| we.exercise.muscle_group))
    }
}

/// What recording a workout produced.
#[derive(Debug, Clone)]
pub struct CompletedWorkout {
    pub session: WorkoutSession,
    pub saved_workout: Option<SavedWorkout>,
}

/// Turns finished drafts into stored sessions and templates.
#[derive(Clone)]
pub struct WorkoutRecorder {
    store: RecordStore,
}

impl WorkoutRecorder {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Record a draft, stamped with the current time.
    pub fn complete(&self, draft: WorkoutDraft, save_as: Option<&str>) -> Result<CompletedWorkout> {
        self.complete_at(draft, save_as, Utc::now())
    }

    /// Record a draft at `now`.
    ///
    /// An active draft is finished implicitly. A non-blank `save_as` also
    /// stores a named template; a blank name records the session only.
    pub fn complete_at(
        &self,
        mut draft: WorkoutDraft,
        save_as: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<CompletedWorkout> {
        match draft.step() {
            DraftStep::Select => {
                return Err(AppError::Validation("Workout has not been started".to_string()))
            }
            DraftStep::Active => draft.finish()?,
            DraftStep::Complete => {}
        }

        // Stored timestamps carry milliseconds only.
        let now = now.trunc_subsecs(3);
        let id = millis_id(now);
        let name = save_as.map(str::trim).filter(|name| !name.is_empty());
        let primary = draft.primary_muscle_group();

        let template_group = name.and(primary);
        let session =
            WorkoutSession::new(id.clone(), now, draft.selected, template_group.is_some());

        // Template before session: a stored session never claims a template that failed to write.
        let saved_workout = match (name, template_group) {
            (Some(name), Some(group)) => {
                let template = SavedWorkout::from_session(id, name, group, &session);
                self.store.add_saved_workout(template.clone())?;
                Some(template)
            }
            _ => None,
        };

        if let Err(err) = self.store.add_session(session.clone()) {
            if let Some(template) = &saved_workout {
                if let Err(rollback) = self.store.delete_saved_workout(&template.id) {
                    tracing::warn!(
                        session_id = %session.id,
                        error = %rollback,
                        "Failed to remove template after session write failed"
                    );
                }
            }
            return Err(err);
        }

        tracing::info!(
            session_id = %session.id,
            total_calories = session.total_calories,
            total_duration = session.total_duration,
            template = saved_workout.is_some(),
            "Workout completed"
        );

        Ok(CompletedWorkout {
            session,
            saved_workout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{collections, KeyValueBackend, MemoryBackend};
    use crate::models::default_exercises;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn find(name: &str) -> Exercise {
        default_exercises()
            .into_iter()
            .find(|e| e.name == name)
            .unwrap()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut draft = WorkoutDraft::new();
        let squat = find("Squat");

        assert!(draft.toggle_exercise(&squat));
        assert_eq!(draft.selected().len(), 1);
        assert_eq!(draft.selected()[0].sets, DEFAULT_SETS);

        assert!(!draft.toggle_exercise(&squat));
        assert!(draft.selected().is_empty());
    }

    #[test]
    fn test_set_sets_applies_to_all_and_clamps() {
        let mut draft = WorkoutDraft::new();
        draft.toggle_exercise(&find("Squat"));
        draft.toggle_exercise(&find("Lunge"));

        draft.set_sets(5);
        assert!(draft.selected().iter().all(|we| we.sets == 5));

        draft.set_sets(0);
        assert!(draft.selected().iter().all(|we| we.sets == 1));
    }

    #[test]
    fn test_totals_follow_selection() {
        let mut draft = WorkoutDraft::new();
        draft.toggle_exercise(&find("Squat")); // 10 cal, 3 min
        draft.toggle_exercise(&find("Plank")); // 5 cal, 1 min
        draft.set_sets(2);
        assert_eq!(draft.totals(), (30, 8));
    }

    #[test]
    fn test_start_requires_selection() {
        let mut draft = WorkoutDraft::new();
        assert!(matches!(draft.start(), Err(AppError::Validation(_))));
        assert_eq!(draft.step(), DraftStep::Select);
    }

    #[test]
    fn test_stepping_through_exercises() {
        let mut draft = WorkoutDraft::new();
        draft.toggle_exercise(&find("Squat"));
        draft.toggle_exercise(&find("Lunge"));
        assert!(draft.current().is_none());

        draft.start().unwrap();
        assert_eq!(draft.current().unwrap().exercise.name, "Squat");
        assert_eq!(draft.progress(), 50.0);

        assert!(draft.advance());
        assert_eq!(draft.current().unwrap().exercise.name, "Lunge");
        assert!(draft.is_last());
        assert!(!draft.advance());
        assert_eq!(draft.progress(), 100.0);

        draft.finish().unwrap();
        assert_eq!(draft.step(), DraftStep::Complete);
    }

    #[test]
    fn test_selection_locked_after_start() {
        let mut draft = WorkoutDraft::new();
        let squat = find("Squat");
        draft.toggle_exercise(&squat);
        draft.start().unwrap();

        assert!(draft.toggle_exercise(&squat));
        assert!(!draft.toggle_exercise(&find("Lunge")));
        assert_eq!(draft.selected().len(), 1);

        let before = draft.totals();
        draft.set_sets(10);
        assert_eq!(draft.totals(), before);
        assert_eq!(draft.sets(), DEFAULT_SETS);

        draft.finish().unwrap();
        draft.set_sets(20);
        assert_eq!(draft.totals(), before);
        assert!(draft.selected().iter().all(|we| we.sets == DEFAULT_SETS));
    }

    #[test]
    fn test_complete_records_session_and_template() {
        let store = RecordStore::in_memory();
        let recorder = WorkoutRecorder::new(store.clone());
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap();

        let mut draft = WorkoutDraft::new();
        draft.select_muscle_group(MuscleGroup::Legs);
        draft.toggle_exercise(&find("Squat"));
        draft.start().unwrap();

        let done = recorder.complete_at(draft, Some(" Leg day "), now).unwrap();
        assert!(done.session.saved);
        assert_eq!(done.session.id, now.timestamp_millis().to_string());
        assert_eq!(done.session.total_calories, 30);

        let template = done.saved_workout.unwrap();
        assert_eq!(template.name, "Leg day");
        assert_eq!(template.muscle_group, MuscleGroup::Legs);

        assert_eq!(store.sessions().unwrap(), vec![done.session]);
        assert_eq!(store.saved_workouts().unwrap(), vec![template]);
    }

    #[test]
    fn test_complete_with_blank_name_skips_template() {
        let store = RecordStore::in_memory();
        let recorder = WorkoutRecorder::new(store.clone());

        let mut draft = WorkoutDraft::new();
        draft.toggle_exercise(&find("Pull-up"));
        draft.start().unwrap();
        draft.finish().unwrap();

        let done = recorder.complete(draft, Some("   ")).unwrap();
        assert!(!done.session.saved);
        assert!(done.saved_workout.is_none());
        assert!(store.saved_workouts().unwrap().is_empty());
        assert_eq!(store.sessions().unwrap().len(), 1);
    }

    #[test]
    fn test_template_falls_back_to_first_exercise_group() {
        let recorder = WorkoutRecorder::new(RecordStore::in_memory());
        let mut draft = WorkoutDraft::new();
        draft.toggle_exercise(&find("Pull-up"));
        draft.toggle_exercise(&find("Plank"));
        draft.start().unwrap();

        let done = recorder.complete(draft, Some("Mixed")).unwrap();
        assert_eq!(done.saved_workout.unwrap().muscle_group, MuscleGroup::Back);
    }

    /// Memory backend whose writes to one key always fail.
    struct FailingWrites {
        inner: MemoryBackend,
        key: &'static str,
    }

    impl KeyValueBackend for FailingWrites {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if key == self.key {
                return Err(AppError::Storage(format!("disk full writing {key}")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    fn failing_store(key: &'static str) -> RecordStore {
        RecordStore::new(Arc::new(FailingWrites {
            inner: MemoryBackend::new(),
            key,
        }))
    }

    fn started_chest_draft() -> WorkoutDraft {
        let mut draft = WorkoutDraft::new();
        draft.select_muscle_group(MuscleGroup::Chest);
        draft.toggle_exercise(&find("Push-up"));
        draft.start().unwrap();
        draft
    }

    #[test]
    fn test_failed_template_write_records_nothing() {
        let store = failing_store(collections::SAVED_WORKOUTS);
        let recorder = WorkoutRecorder::new(store.clone());

        let result = recorder.complete(started_chest_draft(), Some("Chest"));
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(store.sessions().unwrap().is_empty());
        assert!(store.saved_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_failed_session_write_removes_template() {
        let store = failing_store(collections::SESSIONS);
        let recorder = WorkoutRecorder::new(store.clone());

        let result = recorder.complete(started_chest_draft(), Some("Chest"));
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(store.sessions().unwrap().is_empty());
        assert!(store.saved_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_complete_refuses_unstarted_draft() {
        let store = RecordStore::in_memory();
        let recorder = WorkoutRecorder::new(store.clone());
        let mut draft = WorkoutDraft::new();
        draft.toggle_exercise(&find("Squat"));

        assert!(matches!(
            recorder.complete(draft, None),
            Err(AppError::Validation(_))
        ));
        assert!(store.sessions().unwrap().is_empty());
    }
}
