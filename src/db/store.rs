// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local collection store with typed operations.
//!
//! Every collection is one JSON document under its own key:
//! - Users (sequence)
//! - Logs (mapping of user id to that user's sequence)
//! - Tips (sequence, newest first, seeded on first read)
//! - Recipes (sequence, newest first)
//!
//! plus the bare id of the signed-in user. Each mutation reads the whole
//! document, changes it in memory and writes the whole document back.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::config::{Config, DEFAULT_KEY_PREFIX};
use crate::db::{CollectionKeys, KeyValueStorage, MemoryStorage, RedbStorage};
use crate::error::{AppError, Result};
use crate::models::tip::seed_tips;
use crate::models::{Backup, ExerciseLog, LogBook, Recipe, RestoredSections, Tip, User};
use crate::time_utils::now_millis;

/// Collection store over any [`KeyValueStorage`] backend.
#[derive(Clone)]
pub struct LocalStore {
    storage: Arc<dyn KeyValueStorage>,
    keys: CollectionKeys,
}

impl LocalStore {
    /// Create a store over the given backend, with keys under `prefix`.
    pub fn new(storage: Arc<dyn KeyValueStorage>, prefix: &str) -> Self {
        Self {
            storage,
            keys: CollectionKeys::with_prefix(prefix),
        }
    }

    /// Create a store over fresh, unlimited in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), DEFAULT_KEY_PREFIX)
    }

    /// Open the on-disk store described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = RedbStorage::open(&config.data_path, config.storage_quota_bytes)?;
        Ok(Self::new(Arc::new(storage), &config.key_prefix))
    }

    // ─── Helper Methods ────────────────────────────────────────────

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.storage.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.storage.set_item(key, &raw)
    }

    fn write_users(&self, users: &[User]) -> Result<()> {
        self.write_json(&self.keys.users, &users)
    }

    fn log_book(&self) -> Result<LogBook> {
        Ok(self.read_json(&self.keys.logs)?.unwrap_or_default())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// All stored users. An absent collection reads as empty.
    pub fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.read_json(&self.keys.users)?.unwrap_or_default())
    }

    /// Append a user. Email uniqueness is the caller's responsibility.
    pub fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.list_users()?;
        users.push(user.clone());
        self.write_users(&users)?;
        tracing::debug!(user_id = %user.id, "User created");
        Ok(())
    }

    /// Replace the stored user with the same id.
    ///
    /// Returns `NotFound` for an unknown id and the storage error when the
    /// write is rejected (e.g. quota exceeded); storage is unchanged in both
    /// cases.
    pub fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.list_users()?;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;
        *slot = user.clone();

        self.write_users(&users).map_err(|e| {
            tracing::warn!(user_id = %user.id, error = %e, "User update not persisted");
            e
        })
    }

    /// Remove a user. Their logs stay in the logs mapping.
    pub fn delete_user(&self, user_id: &str) -> Result<()> {
        let mut users = self.list_users()?;
        let before = users.len();
        users.retain(|u| u.id != user_id);
        self.write_users(&users)?;
        tracing::info!(
            user_id,
            removed = before - users.len(),
            "User deleted (logs retained)"
        );
        Ok(())
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Find a user by email (ignoring case) and make them the session user.
    ///
    /// Returns `None` and leaves the session untouched when nobody matches.
    pub fn login(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .list_users()?
            .into_iter()
            .find(|u| u.email_matches(email));

        match user {
            Some(user) => {
                self.storage.set_item(&self.keys.current_user_id, &user.id)?;
                tracing::info!(user_id = %user.id, "Session started");
                Ok(Some(user))
            }
            None => {
                tracing::debug!("Login email not found");
                Ok(None)
            }
        }
    }

    /// The session user, resolved against the live users collection.
    ///
    /// A pointer to a deleted user reads as `None`.
    pub fn current_session(&self) -> Result<Option<User>> {
        let Some(user_id) = self.storage.get_item(&self.keys.current_user_id)? else {
            return Ok(None);
        };

        let user = self.list_users()?.into_iter().find(|u| u.id == user_id);
        if user.is_none() {
            tracing::debug!(user_id = %user_id, "Session points at a missing user");
        }
        Ok(user)
    }

    /// Clear the session pointer.
    pub fn logout(&self) -> Result<()> {
        self.storage.remove_item(&self.keys.current_user_id)?;
        tracing::info!("Session ended");
        Ok(())
    }

    // ─── Exercise Log Operations ─────────────────────────────────

    /// Logs of one user in insertion order (empty if none).
    pub fn get_user_logs(&self, user_id: &str) -> Result<Vec<ExerciseLog>> {
        Ok(self.log_book()?.remove(user_id).unwrap_or_default())
    }

    /// Append a log to a user's sequence, rewriting the whole mapping.
    pub fn save_log(&self, user_id: &str, log: &ExerciseLog) -> Result<()> {
        let mut book = self.log_book()?;
        book.entry(user_id.to_string())
            .or_default()
            .push(log.clone());
        self.write_json(&self.keys.logs, &book)?;
        tracing::debug!(user_id, log_id = %log.id, "Exercise logged");
        Ok(())
    }

    // ─── Tip Operations ──────────────────────────────────────────

    /// Stored tips, newest first. The first read of an absent collection
    /// persists and returns the seed set.
    pub fn get_tips(&self) -> Result<Vec<Tip>> {
        if let Some(tips) = self.read_json(&self.keys.tips)? {
            return Ok(tips);
        }

        let seeded = seed_tips(now_millis());
        self.write_json(&self.keys.tips, &seeded)?;
        tracing::info!(count = seeded.len(), "Seeded default tips");
        Ok(seeded)
    }

    /// Prepend a tip.
    pub fn add_tip(&self, tip: &Tip) -> Result<()> {
        let mut tips = self.get_tips()?;
        tips.insert(0, tip.clone());
        self.write_json(&self.keys.tips, &tips)
    }

    // ─── Recipe Operations ───────────────────────────────────────

    /// Stored recipes, newest first. An absent collection reads as empty.
    pub fn get_recipes(&self) -> Result<Vec<Recipe>> {
        Ok(self.read_json(&self.keys.recipes)?.unwrap_or_default())
    }

    /// Prepend a recipe.
    pub fn add_recipe(&self, recipe: &Recipe) -> Result<()> {
        let mut recipes = self.get_recipes()?;
        recipes.insert(0, recipe.clone());
        self.write_json(&self.keys.recipes, &recipes)
    }

    // ─── Backup & Restore ────────────────────────────────────────

    /// Point-in-time copy of every collection.
    pub fn snapshot(&self) -> Result<Backup> {
        Ok(Backup {
            users: Some(self.list_users()?),
            logs: Some(self.log_book()?),
            tips: Some(self.get_tips()?),
            recipes: Some(self.get_recipes()?),
            timestamp: Some(now_millis()),
        })
    }

    /// Serialized backup document (`users`, `logs`, `tips`, `recipes`, `timestamp`).
    pub fn export_backup(&self) -> Result<String> {
        let backup = self.snapshot()?;
        let raw = serde_json::to_string(&backup)?;
        tracing::info!(bytes = raw.len(), "Backup exported");
        Ok(raw)
    }

    /// Overwrite collections from a backup document.
    ///
    /// The whole document is parsed before anything is written, so malformed
    /// input returns `InvalidBackup` with storage untouched. Sections missing
    /// from the document are left as they are.
    pub fn restore_backup(&self, raw: &str) -> Result<RestoredSections> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            tracing::warn!(error = %e, "Restore failed: not JSON");
            AppError::InvalidBackup(e.to_string())
        })?;
        if !value.is_object() {
            tracing::warn!("Restore failed: document is not an object");
            return Err(AppError::InvalidBackup(
                "expected a JSON object".to_string(),
            ));
        }
        let backup: Backup = serde_json::from_value(value).map_err(|e| {
            tracing::warn!(error = %e, "Restore failed: unexpected document shape");
            AppError::InvalidBackup(e.to_string())
        })?;

        self.apply_backup(&backup)
    }

    /// Write every section present in `backup`.
    pub fn apply_backup(&self, backup: &Backup) -> Result<RestoredSections> {
        let mut entries: Vec<(&str, String)> = Vec::new();
        if let Some(users) = &backup.users {
            entries.push((&self.keys.users, serde_json::to_string(users)?));
        }
        if let Some(logs) = &backup.logs {
            entries.push((&self.keys.logs, serde_json::to_string(logs)?));
        }
        if let Some(tips) = &backup.tips {
            entries.push((&self.keys.tips, serde_json::to_string(tips)?));
        }
        if let Some(recipes) = &backup.recipes {
            entries.push((&self.keys.recipes, serde_json::to_string(recipes)?));
        }

        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        self.storage.set_items(&borrowed)?;

        let sections = backup.sections();
        tracing::info!(
            sections = sections.count(),
            users = sections.users,
            logs = sections.logs,
            tips = sections.tips,
            recipes = sections.recipes,
            "Backup restored"
        );
        Ok(sections)
    }
}
