// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout logging and progress aggregates.
//!
//! The aggregates are single passes over a user's log sequence; nothing is
//! cached or stored.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::Serialize;
use std::fmt;
use validator::Validate;

use crate::db::LocalStore;
use crate::error::Result;
use crate::models::{new_record_id, ExerciseKind, ExerciseLog, ExerciseType};

/// Estimated one-rep max (Epley: `w * (1 + r / 30)`), rounded to whole kg.
///
/// Returns `None` unless both inputs are positive.
pub fn estimate_one_rep_max(weight: f64, reps: f64) -> Option<u32> {
    if !(weight > 0.0 && reps > 0.0) || !weight.is_finite() || !reps.is_finite() {
        return None;
    }
    Some((weight * (1.0 + reps / 30.0)).round() as u32)
}

/// Exercise names in order of first appearance. Names are compared exactly.
pub fn unique_exercises(logs: &[ExerciseLog]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for log in logs {
        if !names.iter().any(|n| *n == log.exercise_name) {
            names.push(log.exercise_name.clone());
        }
    }
    names
}

/// One chart point for an exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    pub date: DateTime<Utc>,
    /// kg, 0 for cardio entries
    pub weight: f64,
    /// km, 0 for weight entries
    pub distance_km: f64,
}

/// Chart series for one exercise, in log order.
pub fn exercise_series(logs: &[ExerciseLog], exercise_name: &str) -> Vec<ProgressPoint> {
    logs.iter()
        .filter(|log| log.exercise_name == exercise_name)
        .map(|log| ProgressPoint {
            date: log.date,
            weight: log.weight().unwrap_or(0.0),
            distance_km: log.distance_km().unwrap_or(0.0),
        })
        .collect()
}

/// Totals for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub logs: usize,
    pub sets: i64,
    /// Sum of weight x reps x sets, in kg
    pub volume: f64,
    pub distance_km: f64,
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🔥 Entrenamiento de Hoy en Donatto FitPro")?;
        writeln!(f, "🏋️ Series: {}", self.sets)?;
        writeln!(f, "📦 Volumen: {}kg", self.volume)?;
        write!(f, "🏃 Cardio: {}km", self.distance_km)
    }
}

/// Totals of the logs dated on `day` (UTC).
pub fn daily_summary(logs: &[ExerciseLog], day: NaiveDate) -> DailySummary {
    logs.iter()
        .filter(|log| log.date.date_naive() == day)
        .fold(DailySummary::default(), |mut summary, log| {
            summary.logs += 1;
            match log.kind {
                ExerciseKind::Weight {
                    weight,
                    reps,
                    sets,
                } => {
                    summary.sets = summary.sets.saturating_add(sets);
                    summary.volume += weight * reps as f64 * sets.max(1) as f64;
                }
                ExerciseKind::Cardio { distance_km, .. } => {
                    summary.distance_km += distance_km;
                }
            }
            summary
        })
}

/// Best mark and latest entry for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub exercise_name: String,
    pub exercise_type: ExerciseType,
    /// Heaviest weight (kg) or longest distance (km)
    pub best: f64,
    pub latest: ExerciseLog,
}

impl PersonalRecord {
    pub fn unit(&self) -> &'static str {
        match self.exercise_type {
            ExerciseType::Weight => "kg",
            ExerciseType::Cardio => "km",
        }
    }
}

impl fmt::Display for PersonalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "📊 Progreso {} en Donatto FitPro",
            self.exercise_name
        )?;
        writeln!(f, "🏆 PR: {}{}", self.best, self.unit())?;
        match self.latest.kind {
            ExerciseKind::Weight { weight, reps, .. } => {
                write!(f, "📅 Último: {}kg x {}reps", weight, reps)
            }
            ExerciseKind::Cardio { distance_km, .. } => {
                write!(f, "📅 Último: {}km", distance_km)
            }
        }
    }
}

/// Personal record for `exercise_name`.
///
/// The measure (weight or distance) follows the type of the first matching
/// log; entries of the other type count as 0.
pub fn personal_record(logs: &[ExerciseLog], exercise_name: &str) -> Option<PersonalRecord> {
    let matching: Vec<&ExerciseLog> = logs
        .iter()
        .filter(|log| log.exercise_name == exercise_name)
        .collect();
    let first = matching.first()?;
    let latest = matching.last()?;
    let exercise_type = first.exercise_type();

    let best = matching
        .iter()
        .map(|log| match exercise_type {
            ExerciseType::Weight => log.weight().unwrap_or(0.0),
            ExerciseType::Cardio => log.distance_km().unwrap_or(0.0),
        })
        .fold(0.0, f64::max);

    Some(PersonalRecord {
        exercise_name: exercise_name.to_string(),
        exercise_type,
        best,
        latest: (*latest).clone(),
    })
}

/// Everything the progress screen shows for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    pub series: Vec<ProgressPoint>,
    pub record: Option<PersonalRecord>,
    /// Epley estimate from the latest weight entry
    pub one_rep_max: Option<u32>,
}

/// New log entry as entered by the user.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub exercise_name: String,
    pub kind: ExerciseKind,
    pub rpe: Option<u8>,
    pub notes: Option<String>,
}

/// Logs workouts and reads progress for one store.
#[derive(Clone)]
pub struct ProgressService {
    store: LocalStore,
}

impl ProgressService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Validate and append a log for `user_id`, stamped with the current time.
    ///
    /// Weight entries with 0 sets are stored as 1 set. The date is kept to
    /// millisecond precision, as stored.
    pub fn record(&self, user_id: &str, entry: LogEntry) -> Result<ExerciseLog> {
        self.record_at(user_id, entry, Utc::now())
    }

    pub fn record_at(
        &self,
        user_id: &str,
        entry: LogEntry,
        at: DateTime<Utc>,
    ) -> Result<ExerciseLog> {
        let kind = match entry.kind {
            ExerciseKind::Weight {
                weight,
                reps,
                sets,
            } => ExerciseKind::Weight {
                weight,
                reps,
                sets: if sets == 0 { 1 } else { sets },
            },
            cardio => cardio,
        };

        let log = ExerciseLog {
            id: new_record_id(),
            date: at.trunc_subsecs(3),
            exercise_name: entry.exercise_name.trim().to_string(),
            rpe: entry.rpe,
            notes: entry
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            kind,
        };
        log.validate()?;

        self.store.save_log(user_id, &log)?;
        Ok(log)
    }

    pub fn logs(&self, user_id: &str) -> Result<Vec<ExerciseLog>> {
        self.store.get_user_logs(user_id)
    }

    /// Distinct exercises the user has logged.
    pub fn exercises(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(unique_exercises(&self.logs(user_id)?))
    }

    pub fn progress(&self, user_id: &str, exercise_name: &str) -> Result<ExerciseProgress> {
        let logs = self.logs(user_id)?;
        let one_rep_max = logs
            .iter()
            .rev()
            .filter(|log| log.exercise_name == exercise_name)
            .find_map(|log| match log.kind {
                ExerciseKind::Weight { weight, reps, .. } => {
                    estimate_one_rep_max(weight, reps as f64)
                }
                ExerciseKind::Cardio { .. } => None,
            });

        Ok(ExerciseProgress {
            series: exercise_series(&logs, exercise_name),
            record: personal_record(&logs, exercise_name),
            one_rep_max,
        })
    }

    pub fn daily_summary(&self, user_id: &str, day: NaiveDate) -> Result<DailySummary> {
        Ok(daily_summary(&self.logs(user_id)?, day))
    }
}
