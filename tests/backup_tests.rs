// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for backup export and restore.

mod common;

use common::{cardio_log, sample_user, test_store, weight_log};
use fitpro::db::{LocalStore, RedbStorage};
use fitpro::error::AppError;
use fitpro::models::{MealType, Recipe};
use std::sync::Arc;

fn recipe(id: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: "Pollo con arroz".to_string(),
        meal_type: MealType::Lunch,
        calories: 650.0,
        protein: 45.0,
        carbs: 70.0,
        fats: 15.0,
        ingredients: vec!["pollo".to_string(), "arroz".to_string()],
        instructions: vec!["cocinar".to_string()],
        is_ai_generated: false,
        date_added: 1_705_312_800_000,
    }
}

fn populated_store() -> LocalStore {
    let store = test_store();
    store.create_user(&sample_user("u1", "a@b.com")).unwrap();
    store.create_user(&sample_user("u2", "c@d.com")).unwrap();
    store.save_log("u1", &weight_log("l1", "Sentadilla", 10, 100.0, 5)).unwrap();
    store.save_log("u2", &cardio_log("l2", "Carrera", 7, 5.0)).unwrap();
    store.add_recipe(&recipe("r1")).unwrap();
    store
}

#[test]
fn test_export_contains_every_section() {
    let store = populated_store();

    let raw = store.export_backup().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(doc["users"].as_array().unwrap().len(), 2);
    assert_eq!(doc["logs"]["u1"][0]["exerciseName"], "Sentadilla");
    assert_eq!(doc["tips"].as_array().unwrap().len(), 8);
    assert_eq!(doc["recipes"][0]["type"], "Almuerzo");
    assert!(doc["timestamp"].is_i64());
}

#[test]
fn test_export_then_restore_is_noop() {
    let store = populated_store();
    let users = store.list_users().unwrap();
    let tips = store.get_tips().unwrap();
    let recipes = store.get_recipes().unwrap();
    let logs = store.get_user_logs("u1").unwrap();

    let raw = store.export_backup().unwrap();
    let sections = store.restore_backup(&raw).unwrap();

    assert_eq!(sections.count(), 4);
    assert_eq!(store.list_users().unwrap(), users);
    assert_eq!(store.get_tips().unwrap(), tips);
    assert_eq!(store.get_recipes().unwrap(), recipes);
    assert_eq!(store.get_user_logs("u1").unwrap(), logs);
}

#[test]
fn test_restore_without_recipes_keeps_recipes() {
    let source = test_store();
    source.create_user(&sample_user("n1", "new@b.com")).unwrap();
    source.save_log("n1", &cardio_log("l9", "Remo", 6, 2.0)).unwrap();
    let mut doc: serde_json::Value =
        serde_json::from_str(&source.export_backup().unwrap()).unwrap();
    doc.as_object_mut().unwrap().remove("recipes");

    let store = populated_store();
    let recipes = store.get_recipes().unwrap();
    let sections = store.restore_backup(&doc.to_string()).unwrap();

    assert!(!sections.recipes);
    assert!(sections.users && sections.logs && sections.tips);
    assert_eq!(store.get_recipes().unwrap(), recipes);
    assert_eq!(store.list_users().unwrap(), vec![sample_user("n1", "new@b.com")]);
    assert_eq!(store.get_user_logs("n1").unwrap().len(), 1);
    // Logs are replaced wholesale, not merged
    assert!(store.get_user_logs("u1").unwrap().is_empty());
}

#[test]
fn test_restore_empty_section_overwrites() {
    let store = populated_store();

    store.restore_backup(r#"{"recipes": []}"#).unwrap();

    assert!(store.get_recipes().unwrap().is_empty());
    assert_eq!(store.list_users().unwrap().len(), 2);
}

#[test]
fn test_restore_null_section_is_skipped() {
    let store = populated_store();

    let sections = store.restore_backup(r#"{"users": null}"#).unwrap();

    assert_eq!(sections.count(), 0);
    assert_eq!(store.list_users().unwrap().len(), 2);
}

#[test]
fn test_restore_malformed_input_changes_nothing() {
    let store = populated_store();
    let before = store.snapshot().unwrap();

    for raw in [
        "not json at all",
        "{\"users\": [",
        "[1, 2, 3]",
        "42",
        r#"{"users": 42}"#,
        r#"{"tips": [], "logs": {"u1": "nope"}}"#,
    ] {
        let err = store.restore_backup(raw).unwrap_err();
        assert!(
            matches!(err, AppError::InvalidBackup(_)),
            "{raw:?} gave {err:?}"
        );
    }

    let after = store.snapshot().unwrap();
    assert_eq!(after.users, before.users);
    assert_eq!(after.logs, before.logs);
    assert_eq!(after.tips, before.tips);
    assert_eq!(after.recipes, before.recipes);
}

#[test]
fn test_restore_over_quota_is_all_or_nothing_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = RedbStorage::open(&dir.path().join("fitpro.redb"), Some(4096)).unwrap();
    let store = LocalStore::new(Arc::new(storage), "t_");
    store.create_user(&sample_user("u1", "a@b.com")).unwrap();

    let mut users = Vec::new();
    for i in 0..60 {
        users.push(sample_user(&format!("bulk{i}"), &format!("bulk{i}@b.com")));
    }
    let doc = serde_json::json!({ "tips": [], "users": users });

    let err = store.restore_backup(&doc.to_string()).unwrap_err();

    assert!(err.is_quota_exceeded());
    assert_eq!(store.list_users().unwrap(), vec![sample_user("u1", "a@b.com")]);
    // The tips section in the same document was not written either
    assert_eq!(store.get_tips().unwrap().len(), 8);
}

#[test]
fn test_restore_accepts_document_written_by_web_app() {
    // Shape written by the browser version: string ids, millisecond ISO
    // dates, and unchecked rep/set inputs.
    let raw = r#"{
        "users": [{"id": "1705312800000", "firstName": "Ana", "lastName": "Lopez",
                   "email": "a@b.com", "age": 30, "createdAt": 1705312800000}],
        "logs": {"1705312800000": [
            {"id": "1705312900000", "date": "2024-01-15T10:00:00.000Z",
             "exerciseName": "Sentadilla", "type": "WEIGHT",
             "weight": 100, "reps": -3, "sets": -1, "notes": ""}
        ]},
        "timestamp": 1705313000000
    }"#;
    let store = test_store();

    let sections = store.restore_backup(raw).unwrap();
    assert!(sections.users && sections.logs);

    let logs = store.get_user_logs("1705312800000").unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].weight(), Some(100.0));

    let export: serde_json::Value =
        serde_json::from_str(&store.export_backup().unwrap()).unwrap();
    let log = &export["logs"]["1705312800000"][0];
    assert_eq!(log["date"], "2024-01-15T10:00:00.000Z");
    assert_eq!(log["reps"], -3);
    assert_eq!(log["sets"], -1);
}
