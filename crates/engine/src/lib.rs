// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Console engine: validation, orchestration and graph refresh

mod error;
mod graph;
mod resolve;
mod service;
mod slots;
mod store;

pub use error::ConsoleError;
pub use graph::{GraphExplorer, GraphState};
pub use service::{
    CommandConsoleService, DoctorOptions, GeneratorRun, JobStatusQuery, ListOptions, TaskRun,
};
pub use slots::{OperationState, RunStatus};
pub use store::{
    CommandConsoleStore, ConsoleSnapshot, DoctorInput, GeneratorInput, LoadState, TaskInput,
};
