// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lc-core: domain types for the loco console (lc) client

pub mod macros;

pub mod clock;
pub mod command;
pub mod graph;
pub mod history;
pub mod id;
pub mod invocation;
pub mod outcome;
pub mod sanitize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
pub use command::{
    CapturedOutput, CommandExecution, ConsoleCommand, DoctorFlags, DoctorSnapshot, JobResult,
    JobStatus,
};
pub use graph::{
    to_view_model, Edge, EdgeKind, GraphSnapshot, Node, NodePayload, NodeTag, Statistics,
    ViewModel, ROOT_NODE_KEY,
};
pub use history::{
    CommandHistory, EntryContext, EntryStatus, HistoryEntry, HistoryEntryId, JobKey,
    OperationKind, HISTORY_LIMIT,
};
pub use invocation::Invocation;
pub use outcome::{derive_status, has_error_signal};
pub use sanitize::{
    parse_params, sanitize_arguments, sanitize_params, sort_commands, split_arguments,
    trim_or_absent,
};
