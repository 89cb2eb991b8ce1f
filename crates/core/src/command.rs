// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command listings and execution results exchanged with the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command the backend allows the console to run (generator or task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleCommand {
    pub command: String,
    #[serde(default)]
    pub summary: String,
}

impl ConsoleCommand {
    pub fn new(command: impl Into<String>, summary: impl Into<String>) -> Self {
        Self { command: command.into(), summary: summary.into() }
    }
}

/// Raw result of a generator or task run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandExecution {
    pub status: i32,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
}

impl CommandExecution {
    pub fn new(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self { status, stdout: stdout.into(), stderr: stderr.into() }
    }
}

/// Explicit flag set forwarded with every doctor request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorFlags {
    pub production: bool,
    pub config: bool,
    pub graph: bool,
    pub assistant: bool,
}

/// Result of a doctor run. `stdout` is structured when the backend emitted JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorSnapshot {
    pub status: i32,
    #[serde(default)]
    pub stdout: Value,
    #[serde(default)]
    pub stderr: String,
}

/// Completed payload of an asynchronous job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
}

/// Status report for an asynchronous job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: String,
    pub state: String,
    #[serde(default)]
    pub result: Option<JobResult>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "updatedAt", alias = "updated_at")]
    pub updated_at: Option<String>,
}

impl JobStatus {
    pub fn new(id: impl Into<String>, state: impl Into<String>) -> Self {
        Self { id: id.into(), state: state.into(), ..Self::default() }
    }

    crate::setters! {
        option {
            result: JobResult,
            error: String,
        }
    }
}

/// Output captured on a history entry: plain text or a structured document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapturedOutput {
    Text(String),
    Structured(Value),
}

impl CapturedOutput {
    /// Render as text; structured output is pretty-printed JSON.
    pub fn to_text(&self) -> String {
        match self {
            CapturedOutput::Text(text) => text.clone(),
            CapturedOutput::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<String> for CapturedOutput {
    fn from(text: String) -> Self {
        CapturedOutput::Text(text)
    }
}

impl From<&str> for CapturedOutput {
    fn from(text: &str) -> Self {
        CapturedOutput::Text(text.to_string())
    }
}

impl From<Value> for CapturedOutput {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => CapturedOutput::Text(text),
            other => CapturedOutput::Structured(other),
        }
    }
}
