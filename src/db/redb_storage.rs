// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! On-disk storage backed by redb, a pure-Rust embedded key-value database.

use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Mutex;

use crate::db::storage::{charge, entry_size, KeyValueStorage};
use crate::error::{AppError, Result};

const TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

fn storage_err(e: impl std::fmt::Display) -> AppError {
    AppError::Storage(e.to_string())
}

/// Durable storage with the same quota semantics as [`super::MemoryStorage`].
///
/// `set_items` commits every entry in one write transaction, so a restore
/// either lands completely or not at all.
pub struct RedbStorage {
    db: Database,
    quota: Option<u64>,
    /// Bytes in use; held across each write transaction
    usage: Mutex<u64>,
}

impl RedbStorage {
    /// Open or create a database at the given path.
    pub fn open(path: &Path, quota: Option<u64>) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(storage_err)?;
        }

        let db = Database::create(path).map_err(storage_err)?;

        // Ensure the table exists so read transactions can open it.
        let write_txn = db.begin_write().map_err(storage_err)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        let usage = {
            let read_txn = db.begin_read().map_err(storage_err)?;
            let table = read_txn.open_table(TABLE).map_err(storage_err)?;
            let mut total = 0u64;
            for entry in table.iter().map_err(storage_err)? {
                let (key, value) = entry.map_err(storage_err)?;
                total += entry_size(key.value(), value.value());
            }
            total
        };

        tracing::info!(path = %path.display(), usage, "Opened local storage");

        Ok(Self {
            db,
            quota,
            usage: Mutex::new(usage),
        })
    }

    /// Bytes currently charged against the quota.
    pub fn usage_bytes(&self) -> u64 {
        self.usage.lock().map(|usage| *usage).unwrap_or_default()
    }

    fn lock_usage(&self) -> Result<std::sync::MutexGuard<'_, u64>> {
        self.usage
            .lock()
            .map_err(|_| AppError::Storage("redb storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for RedbStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;

        let value = table
            .get(key)
            .map_err(storage_err)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.set_items(&[(key, value)])
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut usage = self.lock_usage()?;
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        let freed = {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            let removed = table
                .remove(key)
                .map_err(storage_err)?
                .map(|old| entry_size(key, old.value()));
            removed.unwrap_or(0)
        };
        write_txn.commit().map_err(storage_err)?;
        *usage = usage.saturating_sub(freed);
        Ok(())
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut usage = self.lock_usage()?;
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        let mut projected = *usage;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            for (key, value) in entries {
                let old = table
                    .get(*key)
                    .map_err(storage_err)?
                    .map(|guard| entry_size(key, guard.value()))
                    .unwrap_or(0);
                // Dropping the transaction on error aborts every entry
                projected = charge(key, self.quota, projected, old, entry_size(key, value))?;
                table.insert(*key, *value).map_err(storage_err)?;
            }
        }
        write_txn.commit().map_err(storage_err)?;
        *usage = projected;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.redb");

        {
            let storage = RedbStorage::open(&path, None).unwrap();
            storage.set_item("a", "1").unwrap();
            storage.set_item("b", "22").unwrap();
            storage.remove_item("a").unwrap();
        }

        let storage = RedbStorage::open(&path, None).unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
        assert_eq!(storage.get_item("b").unwrap().as_deref(), Some("22"));
        assert_eq!(storage.usage_bytes(), 3);
    }

    #[test]
    fn test_set_items_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(&dir.path().join("quota.redb"), Some(8)).unwrap();

        let err = storage
            .set_items(&[("a", "123"), ("b", "123456")])
            .unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(storage.get_item("a").unwrap(), None);
        assert_eq!(storage.usage_bytes(), 0);

        storage.set_items(&[("a", "123"), ("b", "1")]).unwrap();
        assert_eq!(storage.usage_bytes(), 6);
    }
}
