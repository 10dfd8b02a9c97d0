// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Duration;
use opskit_core::FakeClock;
use tempfile::TempDir;

fn store(tmp: &TempDir) -> (SqliteStore<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    let store =
        SqliteStore::open_with_clock(&tmp.path().join("opskit.db"), clock.clone()).unwrap();
    (store, clock)
}

#[test]
fn open_close_history_round_trip() {
    let tmp = TempDir::new().unwrap();
    let (store, clock) = store(&tmp);

    let opened_at = clock.now_utc();
    let id = store.open("new-user", r#"{"Username":"alice"}"#).unwrap();
    clock.advance(Duration::seconds(5));
    store.close(id, RunStatus::Completed, "done\n", None).unwrap();

    let history = store.history(10).unwrap();
    assert_eq!(history.len(), 1);
    let record = &history[0];
    assert_eq!(record.id, id);
    assert_eq!(record.script_name, "new-user");
    assert_eq!(record.parameters, r#"{"Username":"alice"}"#);
    assert_eq!(record.status, RunStatus::Completed);
    assert_eq!(record.output, "done\n");
    assert_eq!(record.error_output, None);
    assert_eq!(record.started_at, opened_at);
    assert_eq!(record.completed_at, Some(opened_at + Duration::seconds(5)));
}

#[test]
fn open_leaves_record_running() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = store(&tmp);

    store.open("backup", "{}").unwrap();
    let history = store.history(10).unwrap();
    assert_eq!(history[0].status, RunStatus::Running);
    assert_eq!(history[0].completed_at, None);
}

#[test]
fn failed_run_keeps_error_output() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = store(&tmp);

    let id = store.open("backup", "{}").unwrap();
    store
        .close(id, RunStatus::Failed, "partial\n", Some("exit code 3"))
        .unwrap();

    let record = &store.history(1).unwrap()[0];
    assert_eq!(record.status, RunStatus::Failed);
    assert_eq!(record.error_output.as_deref(), Some("exit code 3"));
}

#[test]
fn ids_are_monotonic_and_history_is_most_recent_first() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = store(&tmp);

    let first = store.open("a", "{}").unwrap();
    let second = store.open("b", "{}").unwrap();
    let third = store.open("c", "{}").unwrap();
    assert!(first < second && second < third);

    let names: Vec<_> = store
        .history(10)
        .unwrap()
        .into_iter()
        .map(|r| r.script_name)
        .collect();
    assert_eq!(names, vec!["c", "b", "a"]);
}

#[test]
fn history_respects_limit() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = store(&tmp);

    for i in 0..5 {
        store.open(&format!("s{i}"), "{}").unwrap();
    }
    assert_eq!(store.history(2).unwrap().len(), 2);
}

#[test]
fn close_twice_is_a_noop() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = store(&tmp);

    let id = store.open("once", "{}").unwrap();
    store.close(id, RunStatus::Cancelled, "", Some("Cancelled by user")).unwrap();
    store.close(id, RunStatus::Completed, "late", None).unwrap();

    let record = &store.history(1).unwrap()[0];
    assert_eq!(record.status, RunStatus::Cancelled);
    assert_eq!(record.output, "");
}

#[test]
fn close_unknown_id_is_a_noop() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = store(&tmp);
    store.close(999, RunStatus::Completed, "", None).unwrap();
    assert!(store.history(10).unwrap().is_empty());
}

#[test]
fn store_reopens_existing_database() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("opskit.db");

    let id = {
        let store = SqliteStore::open(&path).unwrap();
        store.open("persisted", "{}").unwrap()
    };
    let store = SqliteStore::open(&path).unwrap();
    store.close(id, RunStatus::Completed, "ok", None).unwrap();
    assert_eq!(store.history(1).unwrap()[0].status, RunStatus::Completed);
}

#[test]
fn action_log_round_trip() {
    let tmp = TempDir::new().unwrap();
    let (store, _) = store(&tmp);

    store
        .log_action("runbook", "script started", Some("new-user"), Some("ops@example.com"))
        .unwrap();
    store.log_action("users", "account disabled", None, None).unwrap();

    let entries = store.recent_actions(10).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "account disabled");
    assert_eq!(entries[1].category, "runbook");
    assert_eq!(entries[1].details.as_deref(), Some("new-user"));
    assert_eq!(entries[1].user_account.as_deref(), Some("ops@example.com"));
}
