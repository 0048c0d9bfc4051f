// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalog model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Muscle region an exercise targets.
///
/// Serialized with the labels the app displays, which are also the labels
/// found in previously stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MuscleGroup {
    /// Arms
    #[serde(rename = "Tay")]
    Arms,
    /// Chest
    #[serde(rename = "Ngực")]
    Chest,
    /// Shoulders
    #[serde(rename = "Vai")]
    Shoulders,
    /// Legs
    #[serde(rename = "Chân")]
    Legs,
    /// Abs
    #[serde(rename = "Bụng")]
    Abs,
    /// Back
    #[serde(rename = "Lưng")]
    Back,
}

impl MuscleGroup {
    /// All groups in display order.
    pub const ALL: [MuscleGroup; 6] = [
        MuscleGroup::Arms,
        MuscleGroup::Chest,
        MuscleGroup::Shoulders,
        MuscleGroup::Legs,
        MuscleGroup::Abs,
        MuscleGroup::Back,
    ];

    /// Display label (matches the serialized form).
    pub fn label(self) -> &'static str {
        match self {
            MuscleGroup::Arms => "Tay",
            MuscleGroup::Chest => "Ngực",
            MuscleGroup::Shoulders => "Vai",
            MuscleGroup::Legs => "Chân",
            MuscleGroup::Abs => "Bụng",
            MuscleGroup::Back => "Lưng",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MuscleGroup {
    type Err = UnknownMuscleGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::ALL
            .into_iter()
            .find(|group| group.label() == s.trim())
            .ok_or_else(|| UnknownMuscleGroup(s.to_string()))
    }
}

/// Returned when a label does not name one of the six muscle groups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown muscle group: {0}")]
pub struct UnknownMuscleGroup(pub String);

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    /// Unique within the catalog
    pub id: String,
    pub name: String,
    pub muscle_group: MuscleGroup,
    /// Free-text instructions
    pub instructions: String,
    /// Repetitions per set
    pub reps: u32,
    /// Estimated calories per set
    pub calories: u32,
    /// Estimated minutes per set
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// User input for the add-exercise form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    #[validate(custom(function = "not_blank", message = "Exercise name is required"))]
    pub name: String,
    #[validate(required(message = "Muscle group is required"))]
    pub muscle_group: Option<MuscleGroup>,
    #[validate(custom(function = "not_blank", message = "Instructions are required"))]
    pub instructions: String,
    #[validate(range(min = 1, message = "Reps must be at least 1"))]
    pub reps: u32,
    #[validate(range(min = 1, message = "Calories must be at least 1"))]
    pub calories: u32,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Default for NewExercise {
    /// Form defaults: 10 reps, 5 calories, 2 minutes.
    fn default() -> Self {
        Self {
            name: String::new(),
            muscle_group: None,
            instructions: String::new(),
            reps: 10,
            calories: 5,
            duration: 2,
            image_url: None,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl NewExercise {
    /// Turn validated input into a catalog entry with the given id.
    ///
    /// Callers validate first; a missing muscle group at this point is a
    /// validation failure, not a panic.
    pub fn into_exercise(self, id: String) -> Result<Exercise, crate::error::AppError> {
        let muscle_group = self.muscle_group.ok_or_else(|| {
            crate::error::AppError::Validation("Muscle group is required".to_string())
        })?;
        Ok(Exercise {
            id,
            name: self.name.trim().to_string(),
            muscle_group,
            instructions: self.instructions.trim().to_string(),
            reps: self.reps,
            calories: self.calories,
            duration: self.duration,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

/// The catalog returned before the user has added anything.
pub fn default_exercises() -> Vec<Exercise> {
    const IMG_PUSH_UP: &str = "https://images.unsplash.com/photo-1571019614242-c5c5dee9f50b?w=400";
    const IMG_LEGS: &str = "https://images.unsplash.com/photo-1574680096145-d05b474e2155?w=400";
    const IMG_ABS: &str = "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400";
    const IMG_CURL: &str = "https://images.unsplash.com/photo-1581009146145-b5ef050c2e1e?w=400";
    const IMG_PRESS: &str = "https://images.unsplash.com/photo-1583454110551-21f2fa2afe61?w=400";
    const IMG_PULL_UP: &str = "https://images.unsplash.com/photo-1605296867304-46d5465a13f1?w=400";

    let seed = |id: &str,
                name: &str,
                muscle_group: MuscleGroup,
                instructions: &str,
                (reps, calories, duration): (u32, u32, u32),
                image: &str| Exercise {
        id: id.to_string(),
        name: name.to_string(),
        muscle_group,
        instructions: instructions.to_string(),
        reps,
        calories,
        duration,
        image_url: Some(image.to_string()),
    };

    vec![
        seed(
            "1",
            "Push-up",
            MuscleGroup::Chest,
            "Nằm sấp, đặt tay rộng bằng vai, đẩy người lên xuống",
            (15, 7, 2),
            IMG_PUSH_UP,
        ),
        seed(
            "2",
            "Squat",
            MuscleGroup::Legs,
            "Đứng thẳng, chân rộng bằng vai, ngồi xuống như ngồi ghế",
            (20, 10, 3),
            IMG_LEGS,
        ),
        seed(
            "3",
            "Plank",
            MuscleGroup::Abs,
            "Chống tay hoặc khuỷu tay, giữ thẳng người",
            (1, 5, 1),
            IMG_ABS,
        ),
        seed(
            "4",
            "Bicep Curl",
            MuscleGroup::Arms,
            "Cầm tạ, uốn cong tay về phía vai",
            (12, 6, 2),
            IMG_CURL,
        ),
        seed(
            "5",
            "Shoulder Press",
            MuscleGroup::Shoulders,
            "Đẩy tạ từ vai lên trên đầu",
            (10, 8, 2),
            IMG_PRESS,
        ),
        seed(
            "6",
            "Pull-up",
            MuscleGroup::Back,
            "Treo xà đơn, kéo người lên đến khi cằm qua xà",
            (8, 9, 2),
            IMG_PULL_UP,
        ),
        seed(
            "7",
            "Crunch",
            MuscleGroup::Abs,
            "Nằm ngửa, gập bụng lên",
            (20, 5, 2),
            IMG_ABS,
        ),
        seed(
            "8",
            "Lunge",
            MuscleGroup::Legs,
            "Bước chân về phía trước, hạ thấp người xuống",
            (15, 8, 3),
            IMG_LEGS,
        ),
    ]
}
