// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use std::env;
use std::path::PathBuf;

use crate::db::storage::DEFAULT_QUOTA_BYTES;

/// Default key prefix shared by every persisted collection.
pub const DEFAULT_KEY_PREFIX: &str = "donatto_fitpro_";

/// Email that is granted admin rights on registration or first sign-in.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@donatto.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the redb file backing the local store
    pub data_path: PathBuf,
    /// Prefix applied to every storage key
    pub key_prefix: String,
    /// Storage capacity in bytes (None = unlimited)
    pub storage_quota_bytes: Option<u64>,
    /// Lower-cased admin email
    pub admin_email: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/fitpro.redb"),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            storage_quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage_quota_bytes = match env::var("FITPRO_STORAGE_QUOTA_BYTES") {
            Ok(raw) => {
                let bytes: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("FITPRO_STORAGE_QUOTA_BYTES", raw.clone()))?;
                // 0 disables the limit
                (bytes > 0).then_some(bytes)
            }
            Err(_) => Some(DEFAULT_QUOTA_BYTES),
        };

        let key_prefix =
            env::var("FITPRO_KEY_PREFIX").unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string());
        if key_prefix.is_empty() {
            return Err(ConfigError::Invalid("FITPRO_KEY_PREFIX", key_prefix));
        }

        Ok(Self {
            data_path: env::var("FITPRO_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/fitpro.redb")),
            key_prefix,
            storage_quota_bytes,
            admin_email: env::var("FITPRO_ADMIN_EMAIL")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
