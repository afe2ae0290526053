// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod backup;
pub mod exercise;
pub mod recipe;
pub mod tip;
pub mod user;

pub use backup::{Backup, LogBook, RestoredSections};
pub use exercise::{ExerciseKind, ExerciseLog, ExerciseType};
pub use recipe::{MealType, Recipe};
pub use tip::{Tip, TipCategory};
pub use user::User;

/// Fresh identifier for a new record (time-ordered UUID).
pub fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
