// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the store, services and CLI.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Operation not permitted: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Storage quota exceeded writing {key}: {required} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        required: u64,
        limit: u64,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid backup document: {0}")]
    InvalidBackup(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Content generator unavailable: {0}")]
    GeneratorUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the error came from a write rejected for lack of space.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, AppError::QuotaExceeded { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Whether the underlying storage failed (as opposed to bad input).
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            AppError::Storage(_) | AppError::QuotaExceeded { .. } | AppError::Serialization(_)
        )
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
