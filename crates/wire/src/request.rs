// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request bodies and query strings sent to the backend.

use lc_core::{DoctorFlags, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /__loco/cli/generators/run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBody {
    pub generator: String,
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Body of `POST /__loco/cli/tasks/run`. `params` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRunBody {
    pub task: String,
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Body of `POST /__loco/cli/doctor/snapshot`. Every flag is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSnapshotBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub production: bool,
    pub config: bool,
    pub graph: bool,
    pub assistant: bool,
}

impl DoctorSnapshotBody {
    pub fn new(environment: Option<String>, flags: DoctorFlags) -> Self {
        Self {
            environment,
            production: flags.production,
            config: flags.config,
            graph: flags.graph,
            assistant: flags.assistant,
        }
    }
}

/// Question about one graph node for the assistant endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub node: Node,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantAdvice {
    pub summary: String,
    #[serde(default, alias = "remediationTips")]
    pub remediation_tips: Vec<String>,
}

/// Encode `?key=value&...`, skipping absent values. Empty when nothing remains.
pub fn query_string(pairs: &[(&str, Option<&str>)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}={}", encode_component(key), encode_component(v))))
        .collect();
    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

/// Percent-encode everything outside RFC 3986 unreserved characters.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
