// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Full-dataset backup document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ExerciseLog, Recipe, Tip, User};

/// Logs of every user, keyed by owning user id.
pub type LogBook = BTreeMap<String, Vec<ExerciseLog>>;

/// Backup file contents.
///
/// Exports always fill every section. Restores accept any subset: a missing
/// or `null` section leaves the stored collection as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<LogBook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<Tip>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
    /// Capture time (epoch milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Which sections a restore overwrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RestoredSections {
    pub users: bool,
    pub logs: bool,
    pub tips: bool,
    pub recipes: bool,
}

impl RestoredSections {
    pub fn count(&self) -> usize {
        [self.users, self.logs, self.tips, self.recipes]
            .iter()
            .filter(|restored| **restored)
            .count()
    }
}

impl Backup {
    pub fn sections(&self) -> RestoredSections {
        RestoredSections {
            users: self.users.is_some(),
            logs: self.logs.is_some(),
            tips: self.tips.is_some(),
            recipes: self.recipes.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_parses() {
        let backup: Backup = serde_json::from_str(r#"{"tips": [], "recipes": null}"#).unwrap();
        let sections = backup.sections();
        assert!(sections.tips);
        assert!(!sections.recipes);
        assert!(!sections.users);
        assert_eq!(sections.count(), 1);
    }

    #[test]
    fn test_wrong_section_shape_is_rejected() {
        assert!(serde_json::from_str::<Backup>(r#"{"users": 42}"#).is_err());
        assert!(serde_json::from_str::<Backup>(r#"{"logs": ["a"]}"#).is_err());
    }
}
