// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use lc_core::{EntryStatus, HistoryEntry};
use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Exit status for a resolved history entry; `None` unless it failed.
    ///
    /// A failed command exits with its own status when it had a non-zero
    /// one, otherwise with 1.
    pub fn for_entry(entry: &HistoryEntry) -> Option<Self> {
        if entry.status != EntryStatus::Error {
            return None;
        }
        let code = entry.exit_code.filter(|code| *code != 0).unwrap_or(1);
        let message = match &entry.error_message {
            Some(message) => format!("{} failed: {}", entry.kind, message),
            None => match entry.exit_code {
                Some(status) => format!("{} failed with exit code {}", entry.kind, status),
                None => format!("{} failed", entry.kind),
            },
        };
        Some(Self::new(code, message))
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
