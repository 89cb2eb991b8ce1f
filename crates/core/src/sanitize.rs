// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalization of free-text input before it reaches the backend.
//!
//! Every optional text field goes through [`trim_or_absent`] so callers never
//! forward whitespace-only values, and empty collections are omitted rather
//! than sent.

use crate::command::ConsoleCommand;
use std::collections::BTreeMap;

/// Trimmed value, or `None` when nothing is left after trimming.
pub fn trim_or_absent(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim each argument and drop the empty ones, preserving order.
pub fn sanitize_arguments(arguments: Option<&[String]>) -> Vec<String> {
    arguments
        .unwrap_or_default()
        .iter()
        .map(|arg| arg.trim())
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim keys and values, dropping pairs where either side ends up empty.
///
/// Returns `None` instead of an empty map so the field can be omitted.
pub fn sanitize_params(params: Option<&BTreeMap<String, String>>) -> Option<BTreeMap<String, String>> {
    let sanitized: BTreeMap<String, String> = params?
        .iter()
        .filter_map(|(key, value)| {
            let key = key.trim();
            let value = value.trim();
            (!key.is_empty() && !value.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect();
    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Commands ordered by name (stable for ties); the input is left untouched.
pub fn sort_commands(commands: &[ConsoleCommand]) -> Vec<ConsoleCommand> {
    let mut sorted = commands.to_vec();
    sorted.sort_by(|a, b| a.command.cmp(&b.command));
    sorted
}

/// Split a free-text argument line on whitespace.
pub fn split_arguments(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Parse `key=value` lines into a map.
///
/// The split happens at the first `=`. A line without one becomes a key
/// with an empty value, which [`sanitize_params`] later drops.
pub fn parse_params(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (line.trim().to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
