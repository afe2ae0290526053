// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: key-value backends and the collection store on top.

pub mod redb_storage;
pub mod storage;
pub mod store;

pub use redb_storage::RedbStorage;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::LocalStore;

/// Collection names as constants (appended to the key prefix).
pub mod collections {
    pub const USERS: &str = "users";
    /// Mapping of user id to that user's exercise logs
    pub const LOGS: &str = "logs";
    pub const TIPS: &str = "tips";
    pub const RECIPES: &str = "recipes";
    /// Bare user id of the signed-in user
    pub const CURRENT_USER_ID: &str = "current_user_id";
}

/// Fully prefixed storage keys for every collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionKeys {
    pub users: String,
    pub logs: String,
    pub tips: String,
    pub recipes: String,
    pub current_user_id: String,
}

impl CollectionKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            users: format!("{}{}", prefix, collections::USERS),
            logs: format!("{}{}", prefix, collections::LOGS),
            tips: format!("{}{}", prefix, collections::TIPS),
            recipes: format!("{}{}", prefix, collections::RECIPES),
            current_user_id: format!("{}{}", prefix, collections::CURRENT_USER_ID),
        }
    }
}
