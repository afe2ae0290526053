// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod content;
pub mod progress;

pub use account::{AccountService, ProfileUpdate, RegistrationRequest, SocialProvider};
pub use content::{ContentGenerator, ContentService, OfflineGenerator};
pub use progress::{LogEntry, ProgressService};
