// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation and normalization in front of the backend gateway.
//!
//! Every input is trimmed here: names and ids must be non-empty after
//! trimming, blank environments mean "backend default", blank arguments
//! and params are dropped. Validation failures never reach the gateway.

use crate::error::ConsoleError;
use lc_adapters::BackendGateway;
use lc_core::{
    sanitize_arguments, sanitize_params, sort_commands, trim_or_absent, CommandExecution,
    ConsoleCommand, DoctorFlags, DoctorSnapshot, JobStatus,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorRun {
    pub generator: String,
    pub arguments: Option<Vec<String>>,
    pub environment: Option<String>,
}

impl GeneratorRun {
    pub fn new(generator: impl Into<String>) -> Self {
        Self { generator: generator.into(), ..Self::default() }
    }

    lc_core::setters! {
        option {
            arguments: Vec<String>,
            environment: String,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRun {
    pub task: String,
    pub arguments: Option<Vec<String>>,
    pub params: Option<BTreeMap<String, String>>,
    pub environment: Option<String>,
}

impl TaskRun {
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into(), ..Self::default() }
    }

    lc_core::setters! {
        option {
            arguments: Vec<String>,
            params: BTreeMap<String, String>,
            environment: String,
        }
    }
}

/// Doctor request; unset flags are sent as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorOptions {
    pub environment: Option<String>,
    pub production: Option<bool>,
    pub config: Option<bool>,
    pub graph: Option<bool>,
    pub assistant: Option<bool>,
}

impl DoctorOptions {
    pub fn flags(&self) -> DoctorFlags {
        DoctorFlags {
            production: self.production.unwrap_or(false),
            config: self.config.unwrap_or(false),
            graph: self.graph.unwrap_or(false),
            assistant: self.assistant.unwrap_or(false),
        }
    }
}

impl From<DoctorFlags> for DoctorOptions {
    fn from(flags: DoctorFlags) -> Self {
        Self {
            environment: None,
            production: Some(flags.production),
            config: Some(flags.config),
            graph: Some(flags.graph),
            assistant: Some(flags.assistant),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobStatusQuery {
    pub job_id: String,
    pub environment: Option<String>,
}

impl JobStatusQuery {
    pub fn new(job_id: impl Into<String>, environment: Option<String>) -> Self {
        Self { job_id: job_id.into(), environment }
    }
}

/// Thin validating facade over a [`BackendGateway`]
#[derive(Clone)]
pub struct CommandConsoleService<G> {
    gateway: G,
}

impl<G: BackendGateway> CommandConsoleService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Available generators, sorted by name
    pub async fn list_generators(&self, options: &ListOptions) -> Result<Vec<ConsoleCommand>, ConsoleError> {
        let environment = trim_or_absent(options.environment.as_deref());
        let commands = self.gateway.list_generators(environment.as_deref()).await?;
        Ok(sort_commands(&commands))
    }

    /// Available tasks, sorted by name
    pub async fn list_tasks(&self, options: &ListOptions) -> Result<Vec<ConsoleCommand>, ConsoleError> {
        let environment = trim_or_absent(options.environment.as_deref());
        let commands = self.gateway.list_tasks(environment.as_deref()).await?;
        Ok(sort_commands(&commands))
    }

    pub async fn run_generator(&self, run: &GeneratorRun) -> Result<CommandExecution, ConsoleError> {
        let generator = required(&run.generator, "generator")?;
        let arguments = sanitize_arguments(run.arguments.as_deref());
        let environment = trim_or_absent(run.environment.as_deref());
        Ok(self.gateway.run_generator(generator, &arguments, environment.as_deref()).await?)
    }

    pub async fn run_task(&self, run: &TaskRun) -> Result<CommandExecution, ConsoleError> {
        let task = required(&run.task, "task")?;
        let arguments = sanitize_arguments(run.arguments.as_deref());
        let params = sanitize_params(run.params.as_ref()).unwrap_or_default();
        let environment = trim_or_absent(run.environment.as_deref());
        Ok(self.gateway.run_task(task, &arguments, &params, environment.as_deref()).await?)
    }

    pub async fn request_doctor_snapshot(&self, options: &DoctorOptions) -> Result<DoctorSnapshot, ConsoleError> {
        let environment = trim_or_absent(options.environment.as_deref());
        Ok(self.gateway.request_doctor_snapshot(environment.as_deref(), options.flags()).await?)
    }

    pub async fn fetch_job_status(&self, query: &JobStatusQuery) -> Result<JobStatus, ConsoleError> {
        let job_id = required(&query.job_id, "job id")?;
        let environment = trim_or_absent(query.environment.as_deref());
        Ok(self.gateway.fetch_job_status(job_id, environment.as_deref()).await?)
    }
}

pub(crate) fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, ConsoleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::InvalidRequest(format!("{what} is required")));
    }
    Ok(trimmed)
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
