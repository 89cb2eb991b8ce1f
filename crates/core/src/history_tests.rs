// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn entry(n: u64) -> HistoryEntry {
    HistoryEntry::running(OperationKind::Generator, format!("cargo loco generate g{n}"), None, n)
}

fn job_entry(job_id: &str, environment: Option<&str>) -> HistoryEntry {
    HistoryEntry::running(
        OperationKind::Job,
        format!("cargo loco jobs status {job_id}"),
        environment.map(str::to_string),
        0,
    )
    .with_context(EntryContext { job_id: job_id.to_string() })
}

#[test]
fn new_history_is_empty_with_default_limit() {
    let history = CommandHistory::new();
    assert!(history.is_empty());
    assert_eq!(history.limit(), HISTORY_LIMIT);
    assert_eq!(HISTORY_LIMIT, 20);
}

#[test]
fn push_keeps_newest_first() {
    let mut history = CommandHistory::new();
    history.push(entry(1));
    history.push(entry(2));
    let started: Vec<_> = history.iter().map(|e| e.started_at_ms).collect();
    assert_eq!(started, vec![2, 1]);
    assert_eq!(history.newest().map(|e| e.started_at_ms), Some(2));
}

#[test]
fn twenty_first_append_evicts_oldest() {
    let mut history = CommandHistory::new();
    let first = entry(1);
    let first_id = first.id.clone();
    assert!(history.push(first).is_none());
    for n in 2..=20 {
        assert!(history.push(entry(n)).is_none());
    }

    let evicted = history.push(entry(21));

    assert_eq!(evicted.map(|e| e.id), Some(first_id.clone()));
    assert_eq!(history.len(), 20);
    assert_eq!(history.iter().next().map(|e| e.started_at_ms), Some(21));
    assert_eq!(history.iter().last().map(|e| e.started_at_ms), Some(2));
    assert!(history.get(first_id.as_str()).is_none());
}

#[test]
fn update_resolves_in_place_without_reordering() {
    let mut history = CommandHistory::new();
    let a = entry(1);
    let a_id = a.id.clone();
    history.push(a);
    history.push(entry(2));

    let found = history.update(a_id.as_str(), |e| {
        e.status = EntryStatus::Success;
        e.completed_at_ms = Some(5);
    });

    assert!(found);
    assert_eq!(history.len(), 2);
    let statuses: Vec<_> = history.iter().map(|e| e.status).collect();
    assert_eq!(statuses, vec![EntryStatus::Running, EntryStatus::Success]);
}

#[test]
fn update_after_eviction_is_a_no_op() {
    let mut history = CommandHistory::with_limit(1);
    let a = entry(1);
    let a_id = a.id.clone();
    history.push(a);
    history.push(entry(2));

    assert!(!history.update(a_id.as_str(), |e| e.status = EntryStatus::Error));
    assert_eq!(history.iter().next().map(|e| e.status), Some(EntryStatus::Running));
}

#[test]
fn lookups_stay_valid_across_many_evictions() {
    let mut history = CommandHistory::with_limit(3);
    let mut ids = Vec::new();
    for n in 0..50 {
        let e = entry(n);
        ids.push(e.id.clone());
        history.push(e);
    }
    for (n, id) in ids.iter().enumerate() {
        let expected = n >= 47;
        assert_eq!(history.get(id.as_str()).is_some(), expected, "entry {n}");
        if expected {
            assert_eq!(history.get(id.as_str()).map(|e| e.started_at_ms), Some(n as u64));
        }
    }
}

#[test]
fn find_job_keys_on_job_id_and_environment() {
    let mut history = CommandHistory::new();
    let dev = job_entry("42", Some("dev"));
    let dev_id = dev.id.clone();
    history.push(dev);
    history.push(job_entry("42", None));

    assert_eq!(history.find_job(&JobKey::new("42", Some("dev".into()))).map(|e| &e.id), Some(&dev_id));
    assert!(history.find_job(&JobKey::new("42", Some("prod".into()))).is_none());
    assert!(history.find_job(&JobKey::new("4", Some("dev".into()))).is_none());
    assert!(history.find_job(&JobKey::new("42", None)).is_some());
}

#[test]
fn find_job_forgets_evicted_rows() {
    let mut history = CommandHistory::with_limit(2);
    history.push(job_entry("7", None));
    history.push(entry(1));
    history.push(entry(2));
    assert!(history.find_job(&JobKey::new("7", None)).is_none());
}

#[test]
fn non_job_entries_have_no_job_key() {
    let e = entry(1).with_context(EntryContext { job_id: "x".into() });
    assert!(e.job_key().is_none());
}

#[test]
fn restart_clears_resolution_but_keeps_identity() {
    let mut e = job_entry("9", None);
    let id = e.id.clone();
    e.fail("boom", 10);
    e.exit_code = Some(3);
    e.stderr = Some("boom".into());
    e.stdout = Some("partial".into());

    e.restart();

    assert_eq!(e.id, id);
    assert_eq!(e.status, EntryStatus::Running);
    assert_eq!(e.started_at_ms, 0);
    assert!(e.completed_at_ms.is_none());
    assert!(e.exit_code.is_none());
    assert!(e.error_message.is_none());
    assert!(e.stderr.is_none());
    assert_eq!(e.stdout, Some(CapturedOutput::Text("partial".into())));
}

#[test]
fn entry_serializes_without_absent_fields() {
    let e = entry(3);
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(json["kind"], "generator");
    assert_eq!(json["status"], "running");
    assert!(json.get("completed_at_ms").is_none());
    assert!(json.get("context").is_none());
}

#[yare::parameterized(
    generator = { OperationKind::Generator, 0, "generator" },
    task      = { OperationKind::Task,      1, "task" },
    doctor    = { OperationKind::Doctor,    2, "doctor" },
    job       = { OperationKind::Job,       3, "job" },
)]
fn operation_kind_index_and_display(kind: OperationKind, index: usize, label: &str) {
    assert_eq!(kind.index(), index);
    assert_eq!(OperationKind::ALL[index], kind);
    assert_eq!(kind.to_string(), label);
}

proptest! {
    #[test]
    fn history_never_exceeds_cap(count in 0usize..80, limit in 1usize..25) {
        let mut history = CommandHistory::with_limit(limit);
        for n in 0..count {
            history.push(entry(n as u64));
        }
        prop_assert_eq!(history.len(), count.min(limit));
        let started: Vec<u64> = history.iter().map(|e| e.started_at_ms).collect();
        let expected: Vec<u64> = (0..count as u64).rev().take(limit).collect();
        prop_assert_eq!(started, expected);
    }
}
