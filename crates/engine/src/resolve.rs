// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of a running history entry from a backend result.

use lc_core::{
    derive_status, has_error_signal, trim_or_absent, CapturedOutput, CommandExecution,
    DoctorSnapshot, EntryStatus, HistoryEntry, JobStatus,
};

pub(crate) fn apply_execution(entry: &mut HistoryEntry, execution: CommandExecution, now_ms: u64) {
    entry.status = derive_status(Some(execution.status), Some(&execution.stderr));
    entry.exit_code = Some(execution.status);
    entry.stdout = Some(CapturedOutput::Text(execution.stdout));
    entry.stderr = non_empty(execution.stderr);
    entry.completed_at_ms = Some(now_ms);
}

pub(crate) fn apply_doctor(entry: &mut HistoryEntry, snapshot: DoctorSnapshot, now_ms: u64) {
    entry.status = derive_status(Some(snapshot.status), Some(&snapshot.stderr));
    entry.exit_code = Some(snapshot.status);
    entry.stdout = Some(CapturedOutput::from(snapshot.stdout));
    entry.stderr = non_empty(snapshot.stderr);
    entry.completed_at_ms = Some(now_ms);
}

/// A job without a result is still in flight unless it reports an error.
pub(crate) fn apply_job_status(entry: &mut HistoryEntry, status: JobStatus, now_ms: u64) {
    let JobStatus { state, result, error, .. } = status;
    match result {
        None if has_error_signal(error.as_deref()) => {
            entry.status = EntryStatus::Error;
            entry.error_message = error.clone();
            entry.stderr = error;
        }
        None => {
            entry.status = EntryStatus::Running;
            entry.stdout = Some(CapturedOutput::Text(state));
        }
        Some(result) => {
            let derived = derive_status(result.status, result.stderr.as_deref());
            entry.status = derived;
            entry.exit_code = result.status;
            entry.stderr = result.stderr.clone();
            if derived == EntryStatus::Error {
                let message = trim_or_absent(result.stderr.as_deref())
                    .or_else(|| trim_or_absent(error.as_deref()))
                    .unwrap_or_else(|| match result.status {
                        Some(code) => format!("job {state} with exit code {code}"),
                        None => format!("job {state}"),
                    });
                entry.error_message = Some(message);
            }
            entry.stdout = Some(CapturedOutput::Text(result.stdout.unwrap_or(state)));
        }
    }
    entry.completed_at_ms = entry.status.is_terminal().then_some(now_ms);
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
