// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Application error type shared by the store and services.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to deserialize {collection}: {message}")]
    Deserialization {
        collection: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the error should be shown to the user as-is.
    ///
    /// Validation messages are written for the person filling in a form;
    /// everything else is an operator concern and gets logged instead.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NotFound(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Result type alias for store and service operations.
pub type Result<T> = std::result::Result<T, AppError>;
