// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitPro: local-first fitness tracking.
//!
//! Users, workout logs, tips and recipes are kept as whole JSON documents in
//! a local key-value storage, with a session pointer and full backup/restore.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::LocalStore;
use services::{AccountService, ContentGenerator, ContentService, ProgressService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: LocalStore,
    pub accounts: AccountService,
    pub progress: ProgressService,
    pub content: ContentService,
}

impl AppState {
    /// Wire every service to one store.
    pub fn new(config: Config, store: LocalStore, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            accounts: AccountService::new(store.clone(), &config.admin_email),
            progress: ProgressService::new(store.clone()),
            content: ContentService::new(store.clone(), generator),
            config,
            store,
        }
    }
}
