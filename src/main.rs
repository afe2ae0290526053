// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitPro command-line front end.
//!
//! Every command opens the local store, performs one operation and prints
//! the result as JSON on stdout. Logs go to stderr.

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fitpro::{
    config::Config,
    db::LocalStore,
    models::{ExerciseKind, MealType, TipCategory, User},
    services::{LogEntry, OfflineGenerator, ProfileUpdate, RegistrationRequest, SocialProvider},
    AppState,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fitpro", version, about = "Local-first fitness tracker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        age: u32,
    },
    /// Sign in by email
    Login { email: String },
    /// Simulated social sign-in with a fresh demo account
    Demo { provider: SocialProvider },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Edit the signed-in user's profile
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        objective: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        picture: Option<String>,
    },
    /// Log an exercise
    #[command(subcommand)]
    Log(LogCommand),
    /// List the signed-in user's logs
    Logs,
    /// Progress for one exercise
    Progress { exercise: String },
    /// Totals for one day (default: today, UTC)
    Summary {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Today's motivational tip (not stored)
    Tip,
    /// List tips, or add a new one
    Tips {
        #[arg(long)]
        new: bool,
        #[arg(long)]
        category: Option<TipCategory>,
    },
    /// List recipes, or generate a new one
    Recipes {
        #[arg(long)]
        meal: Option<MealType>,
        #[arg(long, requires = "meal")]
        generate: bool,
        #[arg(long)]
        preferences: Option<String>,
    },
    /// List all users (admin)
    Users,
    /// Delete a user (admin); their logs are kept
    DeleteUser { id: String },
    /// Write a full backup
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Overwrite collections from a backup file
    Restore { path: PathBuf },
}

#[derive(Subcommand)]
enum LogCommand {
    Weight {
        exercise: String,
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        reps: u32,
        #[arg(long, default_value_t = 1)]
        sets: u32,
        #[arg(long)]
        rpe: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },
    Cardio {
        exercise: String,
        #[arg(long)]
        distance: f64,
        #[arg(long)]
        duration: f64,
        #[arg(long)]
        rpe: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(path = %config.data_path.display(), "Opening local store");

    let store = LocalStore::open(&config).context("Failed to open local store")?;
    let state = AppState::new(config, store, Arc::new(OfflineGenerator));

    run(&state, cli.command)
}

fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Register {
            email,
            first_name,
            last_name,
            age,
        } => {
            let user = state.accounts.register(RegistrationRequest {
                email,
                first_name,
                last_name,
                age,
            })?;
            print_json(&user)
        }
        Command::Login { email } => print_json(&state.accounts.sign_in(&email)?),
        Command::Demo { provider } => print_json(&state.accounts.sign_in_demo(provider)?),
        Command::Logout => {
            state.accounts.sign_out()?;
            Ok(())
        }
        Command::Whoami => print_json(&state.accounts.current_user()?),
        Command::Profile {
            first_name,
            last_name,
            age,
            weight,
            objective,
            goal,
            picture,
        } => {
            let user = require_session(state)?;
            let update = ProfileUpdate {
                first_name,
                last_name,
                age,
                current_weight: weight,
                main_objective: objective,
                target_goal: goal,
                profile_picture: picture,
            };
            print_json(&state.accounts.update_profile(&user.id, update)?)
        }
        Command::Log(entry) => {
            let user = require_session(state)?;
            let entry = match entry {
                LogCommand::Weight {
                    exercise,
                    weight,
                    reps,
                    sets,
                    rpe,
                    notes,
                } => LogEntry {
                    exercise_name: exercise,
                    kind: ExerciseKind::Weight {
                        weight,
                        reps: i64::from(reps),
                        sets: i64::from(sets),
                    },
                    rpe,
                    notes,
                },
                LogCommand::Cardio {
                    exercise,
                    distance,
                    duration,
                    rpe,
                    notes,
                } => LogEntry {
                    exercise_name: exercise,
                    kind: ExerciseKind::Cardio {
                        distance_km: distance,
                        duration_minutes: duration,
                    },
                    rpe,
                    notes,
                },
            };
            print_json(&state.progress.record(&user.id, entry)?)
        }
        Command::Logs => {
            let user = require_session(state)?;
            print_json(&state.progress.logs(&user.id)?)
        }
        Command::Progress { exercise } => {
            let user = require_session(state)?;
            print_json(&state.progress.progress(&user.id, &exercise)?)
        }
        Command::Summary { date } => {
            let user = require_session(state)?;
            let day = date.unwrap_or_else(|| Utc::now().date_naive());
            let summary = state.progress.daily_summary(&user.id, day)?;
            eprintln!("{}", summary);
            print_json(&summary)
        }
        Command::Tip => print_json(&state.content.daily_tip()),
        Command::Tips { new, category } => {
            if new {
                print_json(&state.content.add_generated_tip(category)?)
            } else {
                let tips = state.store.get_tips()?;
                let tips: Vec<_> = tips
                    .into_iter()
                    .filter(|t| category.map_or(true, |c| t.category == c))
                    .collect();
                print_json(&tips)
            }
        }
        Command::Recipes {
            meal,
            generate,
            preferences,
        } => match (meal, generate) {
            (Some(meal), true) => {
                match state
                    .content
                    .generate_recipe(meal, preferences.as_deref())?
                {
                    Some(recipe) => print_json(&recipe),
                    None => bail!("Recipe generation is unavailable"),
                }
            }
            (Some(meal), false) => print_json(&state.content.recipes_for(meal)?),
            (None, _) => print_json(&state.store.get_recipes()?),
        },
        Command::Users => {
            let actor = require_session(state)?;
            print_json(&state.accounts.members(&actor)?)
        }
        Command::DeleteUser { id } => {
            let actor = require_session(state)?;
            state.accounts.delete_member(&actor, &id)?;
            Ok(())
        }
        Command::Export { out } => {
            let backup = state.store.export_backup()?;
            match out {
                Some(path) => std::fs::write(&path, backup)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", backup),
            }
            Ok(())
        }
        Command::Restore { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            print_json(&state.store.restore_backup(&raw)?)
        }
    }
}

fn require_session(state: &AppState) -> anyhow::Result<User> {
    match state.accounts.current_user()? {
        Some(user) => Ok(user),
        None => bail!("Not signed in; run `fitpro login <email>` first"),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fitpro=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
