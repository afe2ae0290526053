// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account service: registration, sign-in, profile edits and admin actions.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::db::LocalStore;
use crate::error::{AppError, Result};
use crate::models::{new_record_id, User};
use crate::time_utils::{now_millis, utc_day_of_millis};

/// Id of the admin account created on first admin sign-in.
pub const BUILTIN_ADMIN_ID: &str = "admin_master";

/// Registration form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 80, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 80, message = "last name is required"))]
    pub last_name: String,
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
}

/// Profile fields a user may edit. `None` leaves a field unchanged; an empty
/// string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 80))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 80))]
    pub last_name: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub age: Option<u32>,
    pub current_weight: Option<String>,
    pub main_objective: Option<String>,
    pub target_goal: Option<String>,
    pub profile_picture: Option<String>,
}

/// Provider offered by the simulated social sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl SocialProvider {
    fn slug(self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Facebook => "facebook",
        }
    }

    fn email_domain(self) -> &'static str {
        match self {
            SocialProvider::Google => "gmail.com",
            SocialProvider::Facebook => "facebook.com",
        }
    }

    /// Last name given to demo accounts.
    fn surname(self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "facebook" => Ok(SocialProvider::Facebook),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

#[derive(Clone)]
pub struct AccountService {
    store: LocalStore,
    admin_email: String,
}

impl AccountService {
    pub fn new(store: LocalStore, admin_email: &str) -> Self {
        Self {
            store,
            admin_email: admin_email.trim().to_lowercase(),
        }
    }

    /// Register a new user and sign them in.
    pub fn register(&self, request: RegistrationRequest) -> Result<User> {
        let request = RegistrationRequest {
            email: request.email.trim().to_lowercase(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            age: request.age,
        };
        request.validate()?;

        if self
            .store
            .list_users()?
            .iter()
            .any(|u| u.email_matches(&request.email))
        {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                request.email
            )));
        }

        let user = User {
            id: new_record_id(),
            first_name: request.first_name,
            last_name: request.last_name,
            is_admin: Some(request.email == self.admin_email),
            email: request.email,
            age: request.age,
            created_at: now_millis(),
            profile_picture: None,
            current_weight: None,
            main_objective: None,
            target_goal: None,
            active_days_count: Some(1),
            last_login: None,
        };
        self.store.create_user(&user)?;
        tracing::info!(user_id = %user.id, admin = user.is_admin(), "User registered");

        self.sign_in(&user.email)
    }

    /// Start a session for `email`.
    ///
    /// The configured admin email gets a built-in account on first use.
    pub fn sign_in(&self, email: &str) -> Result<User> {
        let email = email.trim().to_lowercase();
        let user = match self.store.login(&email)? {
            Some(user) => user,
            None if email == self.admin_email => self.bootstrap_admin()?,
            None => return Err(AppError::NotFound(format!("No user with email {}", email))),
        };

        Ok(self.record_login(user, now_millis()))
    }

    /// Simulated social sign-in: create a fresh demo account for `provider`
    /// and sign it in. Every call creates a new account.
    pub fn sign_in_demo(&self, provider: SocialProvider) -> Result<User> {
        let id = new_record_id();
        let user = User {
            email: format!(
                "demo_{}_{}@{}",
                provider.slug(),
                id.replace('-', ""),
                provider.email_domain()
            ),
            id,
            first_name: "Atleta".to_string(),
            last_name: provider.surname().to_string(),
            age: 25,
            created_at: now_millis(),
            profile_picture: None,
            current_weight: None,
            main_objective: None,
            target_goal: None,
            active_days_count: Some(1),
            is_admin: None,
            last_login: None,
        };
        self.store.create_user(&user)?;
        tracing::info!(user_id = %user.id, %provider, "Demo account created");

        self.sign_in(&user.email)
    }

    /// The signed-in user, if the session still resolves.
    pub fn current_user(&self) -> Result<Option<User>> {
        self.store.current_session()
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.logout()
    }

    /// Apply a profile edit and persist it.
    ///
    /// Storage failures (e.g. quota exceeded by a large picture) are
    /// returned; the stored profile is then unchanged.
    pub fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        update.validate()?;

        let mut user = self
            .store
            .list_users()?
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if let Some(first_name) = update.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(age) = update.age {
            user.age = age;
        }
        apply_optional(&mut user.current_weight, update.current_weight);
        apply_optional(&mut user.main_objective, update.main_objective);
        apply_optional(&mut user.target_goal, update.target_goal);
        apply_optional(&mut user.profile_picture, update.profile_picture);

        self.store.update_user(&user)?;
        tracing::info!(user_id, "Profile updated");
        Ok(user)
    }

    /// All users. Admin only.
    pub fn members(&self, actor: &User) -> Result<Vec<User>> {
        require_admin(actor)?;
        self.store.list_users()
    }

    /// Delete a non-admin user. Admin only; logs are not removed.
    pub fn delete_member(&self, actor: &User, target_id: &str) -> Result<()> {
        require_admin(actor)?;

        let target = self
            .store
            .list_users()?
            .into_iter()
            .find(|u| u.id == target_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", target_id)))?;
        if target.is_admin() {
            return Err(AppError::BadRequest(
                "Admin accounts cannot be deleted".to_string(),
            ));
        }

        self.store.delete_user(target_id)?;
        tracing::info!(actor = %actor.id, target_id, "Member deleted");
        Ok(())
    }

    fn bootstrap_admin(&self) -> Result<User> {
        let admin = User {
            id: BUILTIN_ADMIN_ID.to_string(),
            first_name: "Donatto".to_string(),
            last_name: "Admin".to_string(),
            email: self.admin_email.clone(),
            age: 99,
            created_at: now_millis(),
            profile_picture: None,
            current_weight: None,
            main_objective: None,
            target_goal: None,
            active_days_count: Some(1),
            is_admin: Some(true),
            last_login: None,
        };
        self.store.create_user(&admin)?;
        tracing::info!(user_id = BUILTIN_ADMIN_ID, "Built-in admin account created");

        self.store
            .login(&admin.email)?
            .ok_or_else(|| AppError::Storage("admin account was not persisted".to_string()))
    }

    /// Stamp `last_login` and the active-day counter.
    ///
    /// The session is already bound at this point, so a failed write only
    /// loses the counters.
    fn record_login(&self, mut user: User, now_ms: i64) -> User {
        apply_login(&mut user, now_ms);
        if let Err(e) = self.store.update_user(&user) {
            tracing::warn!(user_id = %user.id, error = %e, "Could not record login");
        }
        user
    }
}

fn require_admin(actor: &User) -> Result<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "User {} is not an admin",
            actor.id
        )))
    }
}

fn apply_optional(field: &mut Option<String>, update: Option<String>) {
    if let Some(value) = update {
        let value = value.trim();
        *field = (!value.is_empty()).then(|| value.to_string());
    }
}

/// Update login counters: a sign-in on a later UTC day than the previous
/// one counts as a new active day.
pub(crate) fn apply_login(user: &mut User, now_ms: i64) {
    let count = user.active_days_count.unwrap_or(1).max(1);
    let new_day = match user.last_login.and_then(utc_day_of_millis) {
        Some(previous) => utc_day_of_millis(now_ms).is_some_and(|today| today > previous),
        None => false,
    };
    user.active_days_count = Some(if new_day { count + 1 } else { count });
    user.last_login = Some(now_ms);
}
