// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise log model (weight-training sets and cardio sessions).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Discriminant of an exercise log, as stored in its `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ExerciseType {
    Weight,
    Cardio,
}

/// Type-specific measurements of a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ExerciseKind {
    #[serde(rename_all = "camelCase")]
    Weight {
        /// Load in kilograms
        #[serde(default)]
        weight: f64,
        /// Signed so that stored entries outside the accepted range still load
        #[serde(default)]
        #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
        reps: i64,
        #[serde(default = "default_sets")]
        #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
        sets: i64,
    },
    #[serde(rename_all = "camelCase")]
    Cardio {
        #[serde(default)]
        distance_km: f64,
        #[serde(default)]
        duration_minutes: f64,
    },
}

/// Largest rep count accepted for a new entry.
pub const MAX_REPS: i64 = 1_000;
/// Largest set count accepted for a new entry.
pub const MAX_SETS: i64 = 100;

fn default_sets() -> i64 {
    1
}

impl ExerciseKind {
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            ExerciseKind::Weight { .. } => ExerciseType::Weight,
            ExerciseKind::Cardio { .. } => ExerciseType::Cardio,
        }
    }
}

/// A single logged exercise, owned by one user through the logs mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseLog {
    pub id: String,
    /// When the exercise was performed (ISO 8601, millisecond precision)
    #[serde(with = "crate::time_utils::iso_millis")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    /// Free text; the same exercise may appear with different casing
    #[validate(length(min = 1, message = "exercise name is required"))]
    pub exercise_name: String,
    /// Rate of perceived exertion (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10))]
    pub rpe: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    #[validate(custom(function = "validate_kind"))]
    pub kind: ExerciseKind,
}

impl ExerciseLog {
    pub fn exercise_type(&self) -> ExerciseType {
        self.kind.exercise_type()
    }

    /// Weight in kg for weight logs.
    pub fn weight(&self) -> Option<f64> {
        match self.kind {
            ExerciseKind::Weight { weight, .. } => Some(weight),
            ExerciseKind::Cardio { .. } => None,
        }
    }

    /// Distance in km for cardio logs.
    pub fn distance_km(&self) -> Option<f64> {
        match self.kind {
            ExerciseKind::Cardio { distance_km, .. } => Some(distance_km),
            ExerciseKind::Weight { .. } => None,
        }
    }
}

fn validate_kind(kind: &ExerciseKind) -> Result<(), ValidationError> {
    let valid = match *kind {
        ExerciseKind::Weight {
            weight,
            reps,
            sets,
        } => {
            weight.is_finite()
                && weight >= 0.0
                && (0..=MAX_REPS).contains(&reps)
                && (1..=MAX_SETS).contains(&sets)
        }
        ExerciseKind::Cardio {
            distance_km,
            duration_minutes,
        } => {
            distance_km.is_finite()
                && distance_km >= 0.0
                && duration_minutes.is_finite()
                && duration_minutes >= 0.0
        }
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("negative_measurement"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_log_wire_format() {
        let raw = r#"{
            "id": "1705312800000",
            "date": "2024-01-15T10:00:00.000Z",
            "exerciseName": "Sentadilla",
            "type": "WEIGHT",
            "weight": 100,
            "reps": 5,
            "sets": 3,
            "rpe": 8,
            "notes": ""
        }"#;

        let log: ExerciseLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.exercise_type(), ExerciseType::Weight);
        assert_eq!(
            log.kind,
            ExerciseKind::Weight {
                weight: 100.0,
                reps: 5,
                sets: 3
            }
        );
        assert_eq!(log.rpe, Some(8));

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["date"], "2024-01-15T10:00:00.000Z");
        assert_eq!(json["type"], "WEIGHT");
        assert_eq!(json["exerciseName"], "Sentadilla");
        assert!(json.get("distanceKm").is_none());
    }

    #[test]
    fn test_cardio_log_wire_format() {
        let raw = r#"{"id":"2","date":"2024-01-15T07:00:00Z","exerciseName":"Run","type":"CARDIO","distanceKm":5.2,"durationMinutes":28}"#;
        let log: ExerciseLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.distance_km(), Some(5.2));
        assert_eq!(log.weight(), None);
        assert_eq!(log.rpe, None);
    }

    #[test]
    fn test_missing_sets_defaults_to_one() {
        let raw = r#"{"id":"3","date":"2024-01-15T07:00:00Z","exerciseName":"Curl","type":"WEIGHT","weight":12,"reps":10}"#;
        let log: ExerciseLog = serde_json::from_str(raw).unwrap();
        assert_eq!(
            log.kind,
            ExerciseKind::Weight {
                weight: 12.0,
                reps: 10,
                sets: 1
            }
        );
    }

    #[test]
    fn test_validation_rejects_out_of_range_rpe() {
        let raw = r#"{"id":"4","date":"2024-01-15T07:00:00Z","exerciseName":"Curl","type":"WEIGHT","weight":12,"reps":10,"rpe":11}"#;
        let log: ExerciseLog = serde_json::from_str(raw).unwrap();
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_distance() {
        let raw = r#"{"id":"5","date":"2024-01-15T07:00:00Z","exerciseName":"Run","type":"CARDIO","distanceKm":-1,"durationMinutes":10}"#;
        let log: ExerciseLog = serde_json::from_str(raw).unwrap();
        assert!(log.validate().is_err());
    }

    #[test]
    fn test_out_of_range_counts_load_but_fail_validation() {
        let raw = r#"{"id":"6","date":"2024-01-15T07:00:00.000Z","exerciseName":"Curl","type":"WEIGHT","weight":12,"reps":-3,"sets":-1}"#;
        let log: ExerciseLog = serde_json::from_str(raw).unwrap();
        assert_eq!(
            log.kind,
            ExerciseKind::Weight {
                weight: 12.0,
                reps: -3,
                sets: -1
            }
        );
        assert!(log.validate().is_err());

        let mut huge = log.clone();
        huge.kind = ExerciseKind::Weight {
            weight: 12.0,
            reps: 5,
            sets: i64::from(u32::MAX),
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_date_keeps_millisecond_format() {
        let raw = r#"{"id":"7","date":"2024-01-15T07:00:00.250Z","exerciseName":"Run","type":"CARDIO","distanceKm":3,"durationMinutes":20}"#;
        let log: ExerciseLog = serde_json::from_str(raw).unwrap();
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["date"], "2024-01-15T07:00:00.250Z");

        let offset = r#"{"id":"8","date":"2024-01-15T09:00:00+02:00","exerciseName":"Run","type":"CARDIO"}"#;
        let log: ExerciseLog = serde_json::from_str(offset).unwrap();
        assert_eq!(
            serde_json::to_value(&log).unwrap()["date"],
            "2024-01-15T07:00:00.000Z"
        );
    }
}
