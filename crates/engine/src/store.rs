// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command console store.
//!
//! Owns the only mutable console state: the available command lists, the
//! per-kind run state and the bounded history. Every mutation goes through
//! [`Inner::mutate`], which publishes a fresh [`ConsoleSnapshot`] on a
//! `watch` channel while still holding the lock, so subscribers observe
//! mutations in order.
//!
//! Each operation runs on its own tokio task. Dropping the caller's future
//! does not cancel the backend call; the entry is still resolved.

use crate::error::ConsoleError;
use crate::resolve::{apply_doctor, apply_execution, apply_job_status};
use crate::service::{
    required, CommandConsoleService, DoctorOptions, GeneratorRun, JobStatusQuery, ListOptions,
    TaskRun,
};
use crate::slots::{OperationSlots, OperationState};
use lc_adapters::BackendGateway;
use lc_core::{
    parse_params, sanitize_arguments, sanitize_params, split_arguments, trim_or_absent, Clock,
    CommandHistory, ConsoleCommand, DoctorFlags, EntryContext, HistoryEntry, Invocation, JobKey,
    OperationKind,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Load state of the available generator and task lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error {
        message: String,
    },
}

/// Everything an observer needs to render the console
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsoleSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub load_state: LoadState,
    pub generators: Vec<ConsoleCommand>,
    pub tasks: Vec<ConsoleCommand>,
    pub operations: Vec<OperationState>,
    /// Newest first
    pub history: Vec<HistoryEntry>,
}

impl ConsoleSnapshot {
    pub fn operation(&self, kind: OperationKind) -> Option<&OperationState> {
        self.operations.iter().find(|op| op.kind == kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorInput {
    pub generator: String,
    pub arguments: Vec<String>,
}

impl GeneratorInput {
    pub fn new(generator: impl Into<String>, arguments: Vec<String>) -> Self {
        Self { generator: generator.into(), arguments }
    }

    /// From free text: whitespace-separated arguments
    pub fn parse(generator: impl Into<String>, arguments: &str) -> Self {
        Self::new(generator, split_arguments(arguments))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub task: String,
    pub arguments: Vec<String>,
    pub params: BTreeMap<String, String>,
}

impl TaskInput {
    pub fn new(task: impl Into<String>, arguments: Vec<String>, params: BTreeMap<String, String>) -> Self {
        Self { task: task.into(), arguments, params }
    }

    /// From free text: whitespace-separated arguments, one `key=value` param per line
    pub fn parse(task: impl Into<String>, arguments: &str, params: &str) -> Self {
        Self::new(task, split_arguments(arguments), parse_params(params))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoctorInput {
    pub flags: DoctorFlags,
}

#[derive(Debug, Default)]
struct ConsoleState {
    environment: Option<String>,
    load_state: LoadState,
    generators: Vec<ConsoleCommand>,
    tasks: Vec<ConsoleCommand>,
    slots: OperationSlots,
    history: CommandHistory,
}

impl ConsoleState {
    fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            environment: self.environment.clone(),
            load_state: self.load_state.clone(),
            generators: self.generators.clone(),
            tasks: self.tasks.clone(),
            operations: self.slots.states(),
            history: self.history.to_vec(),
        }
    }
}

struct Inner<G, C> {
    service: CommandConsoleService<G>,
    clock: C,
    state: Mutex<ConsoleState>,
    notify: watch::Sender<ConsoleSnapshot>,
}

impl<G, C> Inner<G, C> {
    /// Apply `f` under the lock and publish the result.
    fn mutate<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        let mut state = self.state.lock();
        let out = f(&mut state);
        self.notify.send_replace(state.snapshot());
        out
    }
}

impl<G, C: Clock> Inner<G, C> {
    /// Append a running entry and mark its kind running.
    fn begin(self: &Arc<Self>, entry: HistoryEntry) -> InFlight<G, C> {
        let kind = entry.kind;
        tracing::info!(kind = %kind, id = %entry.id, command = %entry.command, "operation started");
        self.mutate(|state| {
            if let Some(evicted) = state.history.push(entry.clone()) {
                tracing::debug!(id = %evicted.id, "history entry evicted");
            }
            let slot = &mut state.slots[kind];
            slot.in_flight += 1;
            slot.last_error = None;
        });
        InFlight { inner: Arc::clone(self), entry, settled: false }
    }

    /// Reuse the row already tracking this job, or append a new one.
    fn begin_job(self: &Arc<Self>, job_id: &str, environment: Option<String>, command: String) -> InFlight<G, C> {
        let now = self.clock.epoch_ms();
        let key = JobKey::new(job_id, environment.clone());
        let entry = self.mutate(|state| {
            let entry = match state.history.find_job(&key).cloned() {
                Some(mut existing) => {
                    existing.restart();
                    existing.command = command;
                    state.history.update(existing.id.as_str(), |row| *row = existing.clone());
                    existing
                }
                None => {
                    let entry = HistoryEntry::running(OperationKind::Job, command, environment, now)
                        .with_context(EntryContext { job_id: job_id.to_string() });
                    if let Some(evicted) = state.history.push(entry.clone()) {
                        tracing::debug!(id = %evicted.id, "history entry evicted");
                    }
                    entry
                }
            };
            let slot = &mut state.slots[OperationKind::Job];
            slot.in_flight += 1;
            slot.last_error = None;
            entry
        });
        tracing::info!(kind = %OperationKind::Job, id = %entry.id, command = %entry.command, "operation started");
        InFlight { inner: Arc::clone(self), entry, settled: false }
    }
}

/// A started operation. Settling resolves the entry and releases the kind;
/// dropping an unsettled guard fails the entry instead.
struct InFlight<G, C: Clock> {
    inner: Arc<Inner<G, C>>,
    entry: HistoryEntry,
    settled: bool,
}

impl<G, C: Clock> InFlight<G, C> {
    fn settle<T>(
        mut self,
        outcome: Result<T, ConsoleError>,
        resolve: fn(&mut HistoryEntry, T, u64),
    ) -> HistoryEntry {
        let now = self.inner.clock.epoch_ms();
        let mut entry = self.entry.clone();
        let error = match outcome {
            Ok(value) => {
                resolve(&mut entry, value, now);
                tracing::info!(kind = %entry.kind, id = %entry.id, status = %entry.status, "operation finished");
                None
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(kind = %entry.kind, id = %entry.id, error = %message, "operation failed");
                entry.fail(message.clone(), now);
                Some(message)
            }
        };
        self.finish(&entry, error);
        self.settled = true;
        entry
    }

    fn finish(&self, entry: &HistoryEntry, error: Option<String>) {
        self.inner.mutate(|state| {
            state.history.update(entry.id.as_str(), |row| *row = entry.clone());
            let slot = &mut state.slots[entry.kind];
            slot.in_flight = slot.in_flight.saturating_sub(1);
            if error.is_some() {
                slot.last_error = error;
            }
        });
    }
}

impl<G, C: Clock> Drop for InFlight<G, C> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let message = "operation aborted before completion".to_string();
        tracing::warn!(kind = %self.entry.kind, id = %self.entry.id, "operation aborted");
        let mut entry = self.entry.clone();
        entry.fail(message.clone(), self.inner.clock.epoch_ms());
        self.finish(&entry, Some(message));
    }
}

/// Orchestrates console operations and their history.
///
/// Cheap to clone; clones share state.
pub struct CommandConsoleStore<G, C> {
    inner: Arc<Inner<G, C>>,
}

impl<G, C> Clone for CommandConsoleStore<G, C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<G: BackendGateway, C: Clock> CommandConsoleStore<G, C> {
    pub fn new(service: CommandConsoleService<G>, clock: C) -> Self {
        let state = ConsoleState::default();
        let (notify, _) = watch::channel(state.snapshot());
        Self { inner: Arc::new(Inner { service, clock, state: Mutex::new(state), notify }) }
    }

    pub fn with_environment(self, environment: impl Into<String>) -> Self {
        let environment: String = environment.into();
        self.set_environment(Some(environment.as_str()));
        self
    }

    /// Blank means the backend default.
    pub fn set_environment(&self, environment: Option<&str>) {
        let environment = trim_or_absent(environment);
        self.inner.mutate(|state| state.environment = environment);
    }

    pub fn environment(&self) -> Option<String> {
        self.inner.state.lock().environment.clone()
    }

    pub fn snapshot(&self) -> ConsoleSnapshot {
        self.inner.state.lock().snapshot()
    }

    /// Receiver that sees every published snapshot, starting from the current one.
    pub fn subscribe(&self) -> watch::Receiver<ConsoleSnapshot> {
        self.inner.notify.subscribe()
    }

    pub fn entry(&self, id: &str) -> Option<HistoryEntry> {
        self.inner.state.lock().history.get(id).cloned()
    }

    /// Load the command lists once; later calls return the current state.
    pub async fn load_commands(&self) -> LoadState {
        let start = self.inner.mutate(|state| {
            if state.load_state == LoadState::Idle {
                state.load_state = LoadState::Loading;
                true
            } else {
                false
            }
        });
        if !start {
            return self.inner.state.lock().load_state.clone();
        }
        self.fetch_commands().await
    }

    /// Fetch the command lists again, e.g. after a load error.
    pub async fn reload_commands(&self) -> LoadState {
        self.inner.mutate(|state| state.load_state = LoadState::Loading);
        self.fetch_commands().await
    }

    async fn fetch_commands(&self) -> LoadState {
        let options = ListOptions { environment: self.environment() };
        let service = &self.inner.service;
        let (generators, tasks) =
            tokio::join!(service.list_generators(&options), service.list_tasks(&options));

        self.inner.mutate(|state| {
            state.load_state = match (generators, tasks) {
                (Ok(generators), Ok(tasks)) => {
                    tracing::info!(generators = generators.len(), tasks = tasks.len(), "commands loaded");
                    state.generators = generators;
                    state.tasks = tasks;
                    LoadState::Ready
                }
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!(error = %e, "loading commands failed");
                    LoadState::Error { message: e.to_string() }
                }
            };
            state.load_state.clone()
        })
    }

    pub async fn run_generator(&self, input: GeneratorInput) -> HistoryEntry {
        let environment = self.environment();
        let arguments = sanitize_arguments(Some(input.arguments.as_slice()));
        let command =
            Invocation::generator(input.generator.trim(), &arguments, environment.as_deref()).to_string();
        let entry = self.running(OperationKind::Generator, command, environment.clone());

        let run = GeneratorRun { generator: input.generator, arguments: Some(arguments), environment };
        let service = self.inner.service.clone();
        let guard = self.inner.begin(entry);
        self.track(guard, async move { service.run_generator(&run).await }, apply_execution).await
    }

    pub async fn run_task(&self, input: TaskInput) -> HistoryEntry {
        let environment = self.environment();
        let arguments = sanitize_arguments(Some(input.arguments.as_slice()));
        let params = sanitize_params(Some(&input.params));
        let command =
            Invocation::task(input.task.trim(), &arguments, params.as_ref(), environment.as_deref())
                .to_string();
        let entry = self.running(OperationKind::Task, command, environment.clone());

        let run = TaskRun { task: input.task, arguments: Some(arguments), params, environment };
        let service = self.inner.service.clone();
        let guard = self.inner.begin(entry);
        self.track(guard, async move { service.run_task(&run).await }, apply_execution).await
    }

    pub async fn run_doctor(&self, input: DoctorInput) -> HistoryEntry {
        let environment = self.environment();
        let command = Invocation::doctor(input.flags, environment.as_deref()).to_string();
        let entry = self.running(OperationKind::Doctor, command, environment.clone());

        let options = DoctorOptions { environment, ..DoctorOptions::from(input.flags) };
        let service = self.inner.service.clone();
        let guard = self.inner.begin(entry);
        self.track(guard, async move { service.request_doctor_snapshot(&options).await }, apply_doctor)
            .await
    }

    /// Check an asynchronous job. A blank id records the job kind's error and
    /// returns `None` without touching the history.
    pub async fn check_job_status(&self, job_id: &str) -> Option<HistoryEntry> {
        let job_id = match required(job_id, "job id") {
            Ok(id) => id.to_string(),
            Err(e) => {
                tracing::warn!(kind = %OperationKind::Job, error = %e, "job status rejected");
                self.inner.mutate(|state| state.slots[OperationKind::Job].last_error = Some(e.to_string()));
                return None;
            }
        };
        let environment = self.environment();
        let command = Invocation::job_status(&job_id, environment.as_deref()).to_string();

        let guard = self.inner.begin_job(&job_id, environment.clone(), command);
        let query = JobStatusQuery::new(job_id, environment);
        let service = self.inner.service.clone();
        Some(self.track(guard, async move { service.fetch_job_status(&query).await }, apply_job_status).await)
    }

    fn running(&self, kind: OperationKind, command: String, environment: Option<String>) -> HistoryEntry {
        HistoryEntry::running(kind, command, environment, self.inner.clock.epoch_ms())
    }

    /// Run `call` to completion on its own task and resolve the guarded entry.
    async fn track<T, F>(
        &self,
        guard: InFlight<G, C>,
        call: F,
        resolve: fn(&mut HistoryEntry, T, u64),
    ) -> HistoryEntry
    where
        F: Future<Output = Result<T, ConsoleError>> + Send + 'static,
        T: Send + 'static,
    {
        let fallback = guard.entry.clone();
        let task = tokio::spawn(async move {
            let outcome = call.await;
            guard.settle(outcome, resolve)
        });
        match task.await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::error!(id = %fallback.id, error = %e, "operation task failed");
                self.entry(fallback.id.as_str()).unwrap_or(fallback)
            }
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
