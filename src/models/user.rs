// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and backups.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User profile stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Stable identifier (also the session pointer value)
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Email address; compared case-insensitively
    pub email: String,
    pub age: u32,
    /// Registration time (epoch milliseconds)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub created_at: i64,
    /// Profile picture as a URL or data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Free-form body weight, e.g. "82kg"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_goal: Option<String>,
    /// Number of distinct days the user signed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_days_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    /// Last successful sign-in (epoch milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | undefined"))]
    pub last_login: Option<i64>,
}

impl User {
    /// Whether this user carries the admin flag.
    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }

    /// Case-insensitive email comparison.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}
