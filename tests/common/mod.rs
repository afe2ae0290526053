// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{TimeZone, Utc};
use fitpro::config::DEFAULT_KEY_PREFIX;
use fitpro::db::{LocalStore, MemoryStorage};
use fitpro::models::{ExerciseKind, ExerciseLog, User};
use std::sync::Arc;

/// Admin email used by test account services.
#[allow(dead_code)]
pub const TEST_ADMIN_EMAIL: &str = "admin@donatto.com";

/// Create a store over unlimited in-memory storage.
#[allow(dead_code)]
pub fn test_store() -> LocalStore {
    LocalStore::in_memory()
}

/// Create a store whose backend rejects writes past `quota` bytes.
/// Returns the store and the backend so tests can inspect usage.
#[allow(dead_code)]
pub fn test_store_with_quota(quota: u64) -> (LocalStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::with_quota(quota));
    (LocalStore::new(storage.clone(), DEFAULT_KEY_PREFIX), storage)
}

/// A minimal user record.
#[allow(dead_code)]
pub fn sample_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        first_name: "Ana".to_string(),
        last_name: "Lopez".to_string(),
        email: email.to_string(),
        age: 30,
        created_at: 1_705_312_800_000,
        profile_picture: None,
        current_weight: None,
        main_objective: None,
        target_goal: None,
        active_days_count: Some(1),
        is_admin: None,
        last_login: None,
    }
}

/// A weight log dated 2024-01-15 at the given hour (UTC).
#[allow(dead_code)]
pub fn weight_log(id: &str, name: &str, hour: u32, weight: f64, reps: i64) -> ExerciseLog {
    ExerciseLog {
        id: id.to_string(),
        date: Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap(),
        exercise_name: name.to_string(),
        rpe: None,
        notes: None,
        kind: ExerciseKind::Weight {
            weight,
            reps,
            sets: 3,
        },
    }
}

/// A cardio log dated 2024-01-15 at the given hour (UTC).
#[allow(dead_code)]
pub fn cardio_log(id: &str, name: &str, hour: u32, distance_km: f64) -> ExerciseLog {
    ExerciseLog {
        id: id.to_string(),
        date: Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap(),
        exercise_name: name.to_string(),
        rpe: None,
        notes: None,
        kind: ExerciseKind::Cardio {
            distance_km,
            duration_minutes: 30.0,
        },
    }
}
