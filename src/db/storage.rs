// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! String key-value storage interface and the in-memory implementation.
//!
//! Backends mirror browser `localStorage`: whole string values per key and an
//! optional capacity limit. A write that would exceed the limit is rejected
//! and the previous value stays in place.

use dashmap::DashMap;
use std::sync::Mutex;

use crate::error::{AppError, Result};

/// Default storage capacity, matching the common browser limit.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Key-value storage used by the collection store.
pub trait KeyValueStorage: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Set a key-value pair, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Set several pairs. Backends that can commit them together override this.
    fn set_items(&self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set_item(key, value)?;
        }
        Ok(())
    }
}

/// Bytes charged against the quota for one entry.
pub(crate) fn entry_size(key: &str, value: &str) -> u64 {
    (key.len() + value.len()) as u64
}

/// Usage after replacing an entry of `old` bytes with one of `new` bytes,
/// or `QuotaExceeded` if that would pass `quota`.
pub(crate) fn charge(key: &str, quota: Option<u64>, usage: u64, old: u64, new: u64) -> Result<u64> {
    let required = usage.saturating_sub(old) + new;
    match quota {
        Some(limit) if required > limit => {
            tracing::warn!(key, required, limit, "Storage quota exceeded");
            Err(AppError::QuotaExceeded {
                key: key.to_string(),
                required,
                limit,
            })
        }
        _ => Ok(required),
    }
}

/// In-memory storage, used for tests and ephemeral sessions.
pub struct MemoryStorage {
    entries: DashMap<String, String>,
    quota: Option<u64>,
    /// Bytes in use; the lock also serializes writers
    usage: Mutex<u64>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Storage without a capacity limit.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            quota: None,
            usage: Mutex::new(0),
        }
    }

    /// Storage that rejects writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            quota: Some(quota_bytes),
            ..Self::new()
        }
    }

    pub fn quota(&self) -> Option<u64> {
        self.quota
    }

    /// Bytes currently charged against the quota.
    pub fn usage_bytes(&self) -> u64 {
        self.usage.lock().map(|usage| *usage).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lock_usage(&self) -> Result<std::sync::MutexGuard<'_, u64>> {
        self.usage
            .lock()
            .map_err(|_| AppError::Storage("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut usage = self.lock_usage()?;
        let old = self
            .entries
            .get(key)
            .map(|current| entry_size(key, current.value()))
            .unwrap_or(0);
        *usage = charge(key, self.quota, *usage, old, entry_size(key, value))?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut usage = self.lock_usage()?;
        if let Some((key, value)) = self.entries.remove(key) {
            *usage = usage.saturating_sub(entry_size(&key, &value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.usage_bytes(), 3);

        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        assert_eq!(storage.usage_bytes(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_quota_rejects_write_and_keeps_old_value() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("key", "abc").unwrap(); // 6 bytes

        let err = storage.set_item("key", "abcdefgh").unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(storage.get_item("key").unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.usage_bytes(), 6);

        // Replacing counts only the difference
        storage.set_item("key", "abcdefg").unwrap(); // 10 bytes
        assert_eq!(storage.usage_bytes(), 10);
    }

    #[test]
    fn test_set_items_stops_at_first_failure() {
        let storage = MemoryStorage::with_quota(8);
        let err = storage
            .set_items(&[("a", "123"), ("b", "123456")])
            .unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("123"));
        assert_eq!(storage.get_item("b").unwrap(), None);
    }
}
