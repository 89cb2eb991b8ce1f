// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command history: one entry per invocation, bounded and newest first.
//!
//! Entries are appended as `running` placeholders and later resolved in
//! place by [`HistoryEntryId`]. Resolution never reorders or duplicates a
//! row; the only removal is eviction of the oldest row past the cap.

use crate::command::CapturedOutput;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

crate::define_id! {
    /// Opaque token addressing one history entry.
    pub struct HistoryEntryId("hst-");
}

/// Maximum number of entries kept in a [`CommandHistory`].
pub const HISTORY_LIMIT: usize = 20;

/// The four command families the console can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Generator,
    Task,
    Doctor,
    Job,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] =
        [OperationKind::Generator, OperationKind::Task, OperationKind::Doctor, OperationKind::Job];

    /// Dense index for per-kind tables.
    pub fn index(self) -> usize {
        match self {
            OperationKind::Generator => 0,
            OperationKind::Task => 1,
            OperationKind::Doctor => 2,
            OperationKind::Job => 3,
        }
    }
}

crate::simple_display! {
    OperationKind {
        Generator => "generator",
        Task => "task",
        Doctor => "doctor",
        Job => "job",
    }
}

/// Lifecycle status of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Running,
    Success,
    Error,
}

impl EntryStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EntryStatus::Running)
    }
}

crate::simple_display! {
    EntryStatus {
        Running => "running",
        Success => "success",
        Error => "error",
    }
}

/// Extra context attached to an entry. Only job entries carry one today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryContext {
    pub job_id: String,
}

/// Structured key identifying the history row of a job status check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobKey {
    pub job_id: String,
    pub environment: Option<String>,
}

impl JobKey {
    pub fn new(job_id: impl Into<String>, environment: Option<String>) -> Self {
        Self { job_id: job_id.into(), environment }
    }
}

/// One record of a command invocation and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    pub kind: OperationKind,
    /// Rendered invocation, for display only.
    pub command: String,
    pub status: EntryStatus,
    pub started_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<CapturedOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<EntryContext>,
}

impl HistoryEntry {
    /// A fresh `running` placeholder with a new id.
    pub fn running(
        kind: OperationKind,
        command: impl Into<String>,
        environment: Option<String>,
        started_at_ms: u64,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            kind,
            command: command.into(),
            status: EntryStatus::Running,
            started_at_ms,
            completed_at_ms: None,
            environment,
            exit_code: None,
            stdout: None,
            stderr: None,
            error_message: None,
            context: None,
        }
    }

    pub fn with_context(mut self, context: EntryContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Structured job key, for job entries only.
    pub fn job_key(&self) -> Option<JobKey> {
        match (&self.kind, &self.context) {
            (OperationKind::Job, Some(context)) => {
                Some(JobKey::new(context.job_id.clone(), self.environment.clone()))
            }
            _ => None,
        }
    }

    /// Put a resolved entry back into `running`, keeping id and `started_at_ms`.
    pub fn restart(&mut self) {
        self.status = EntryStatus::Running;
        self.completed_at_ms = None;
        self.exit_code = None;
        self.error_message = None;
        self.stderr = None;
    }

    /// Resolve as failed with a message.
    pub fn fail(&mut self, message: impl Into<String>, completed_at_ms: u64) {
        self.status = EntryStatus::Error;
        self.error_message = Some(message.into());
        self.completed_at_ms = Some(completed_at_ms);
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.completed_at_ms.map(|done| done.saturating_sub(self.started_at_ms))
    }
}

/// Bounded, newest-first history addressed by entry id.
///
/// Rows are stored oldest-first internally with a monotonically increasing
/// sequence number, so an id resolves to its slot in O(1) without rewriting
/// the buffer on every append.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    /// Sequence number of `entries[0]`
    first_seq: u64,
    by_id: HashMap<HistoryEntryId, u64>,
    jobs: HashMap<JobKey, HistoryEntryId>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History with a custom cap (at least one entry).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            first_seq: 0,
            by_id: HashMap::new(),
            jobs: HashMap::new(),
            limit: limit.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append as the newest entry. Returns the evicted oldest entry, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        let seq = self.first_seq + self.entries.len() as u64;
        if let Some(key) = entry.job_key() {
            self.jobs.insert(key, entry.id.clone());
        }
        self.by_id.insert(entry.id.clone(), seq);
        self.entries.push_back(entry);

        if self.entries.len() <= self.limit {
            return None;
        }
        let evicted = self.entries.pop_front()?;
        self.first_seq += 1;
        self.by_id.remove(&evicted.id);
        if let Some(key) = evicted.job_key() {
            if self.jobs.get(&key) == Some(&evicted.id) {
                self.jobs.remove(&key);
            }
        }
        Some(evicted)
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        let slot = self.slot(id)?;
        self.entries.get(slot)
    }

    /// Mutate an entry in place. Returns false when the id is unknown
    /// (e.g. the entry was evicted while its command was in flight).
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut HistoryEntry)) -> bool {
        let Some(slot) = self.slot(id) else {
            return false;
        };
        let Some(entry) = self.entries.get_mut(slot) else {
            return false;
        };
        f(entry);
        true
    }

    /// The job row currently tracking `key`, if still present.
    pub fn find_job(&self, key: &JobKey) -> Option<&HistoryEntry> {
        let id = self.jobs.get(key)?;
        self.get(id.as_str())
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Owned copy, newest first.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.iter().cloned().collect()
    }

    fn slot(&self, id: &str) -> Option<usize> {
        let seq = self.by_id.get(id)?;
        usize::try_from(seq.checked_sub(self.first_seq)?).ok()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
