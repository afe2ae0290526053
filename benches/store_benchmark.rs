use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use fitpro::db::LocalStore;
use fitpro::models::{ExerciseKind, ExerciseLog, User};
use std::hint::black_box;

fn user(i: usize) -> User {
    User {
        id: format!("user{i}"),
        first_name: "Bench".to_string(),
        last_name: format!("User {i}"),
        email: format!("user{i}@example.com"),
        age: 30,
        created_at: 1_705_312_800_000,
        profile_picture: None,
        current_weight: None,
        main_objective: None,
        target_goal: None,
        active_days_count: Some(1),
        is_admin: None,
        last_login: None,
    }
}

fn log(i: usize) -> ExerciseLog {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    ExerciseLog {
        id: format!("log{i}"),
        date: start + Duration::hours(i as i64),
        exercise_name: if i % 2 == 0 { "Sentadilla" } else { "Carrera" }.to_string(),
        rpe: Some(7),
        notes: None,
        kind: if i % 2 == 0 {
            ExerciseKind::Weight {
                weight: 100.0,
                reps: 5,
                sets: 3,
            }
        } else {
            ExerciseKind::Cardio {
                distance_km: 5.0,
                duration_minutes: 28.0,
            }
        },
    }
}

/// Store with `users` users, each holding `logs_per_user` logs.
fn populated(users: usize, logs_per_user: usize) -> LocalStore {
    let store = LocalStore::in_memory();
    for u in 0..users {
        store.create_user(&user(u)).expect("create user");
        for l in 0..logs_per_user {
            store.save_log(&format!("user{u}"), &log(l)).expect("save log");
        }
    }
    store
}

fn benchmark_save_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("save_log");

    for logs_per_user in [10, 100, 500] {
        group.bench_function(format!("{logs_per_user}_logs_x_10_users"), |b| {
            b.iter_batched(
                || populated(10, logs_per_user),
                |store| store.save_log(black_box("user0"), black_box(&log(0))),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn benchmark_backup(c: &mut Criterion) {
    let store = populated(20, 200);
    let raw = store.export_backup().expect("export");

    let mut group = c.benchmark_group("backup");

    group.bench_function("export_20_users_200_logs", |b| {
        b.iter(|| store.export_backup())
    });

    group.bench_function("restore_20_users_200_logs", |b| {
        b.iter(|| store.restore_backup(black_box(&raw)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_save_log, benchmark_backup);
criterion_main!(benches);
