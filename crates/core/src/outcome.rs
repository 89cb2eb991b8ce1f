// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit code to history status mapping.

use crate::history::EntryStatus;

/// True when stderr (or an error string) carries anything but whitespace.
pub fn has_error_signal(signal: Option<&str>) -> bool {
    signal.is_some_and(|s| !s.trim().is_empty())
}

/// Derive the terminal status of a command from its exit code and error signal.
///
/// Without an exit code the error signal alone decides. With one, only a zero
/// exit and a silent stderr count as success.
pub fn derive_status(exit_code: Option<i32>, error_signal: Option<&str>) -> EntryStatus {
    let signalled = has_error_signal(error_signal);
    match exit_code {
        None if signalled => EntryStatus::Error,
        None => EntryStatus::Success,
        Some(0) if !signalled => EntryStatus::Success,
        Some(_) => EntryStatus::Error,
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
