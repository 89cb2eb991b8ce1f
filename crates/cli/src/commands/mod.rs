// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod catalog;
pub mod graph;
pub mod job;
pub mod run;

use anyhow::Result;
use lc_adapters::HttpGateway;
use lc_core::{HistoryEntry, SystemClock};
use lc_engine::{CommandConsoleService, CommandConsoleStore};

use crate::exit_error::ExitError;
use crate::output::{format_entry, print_json, OutputFormat};

pub type Store = CommandConsoleStore<HttpGateway, SystemClock>;

/// Connection settings resolved from flags and the environment
pub struct Context {
    pub gateway: HttpGateway,
    pub environment: Option<String>,
    pub format: OutputFormat,
}

impl Context {
    pub fn store(&self) -> Store {
        let store = CommandConsoleStore::new(CommandConsoleService::new(self.gateway.clone()), SystemClock);
        store.set_environment(self.environment.as_deref());
        store
    }
}

/// Print a resolved entry and turn a failed one into an exit status.
pub(crate) fn finish(entry: &HistoryEntry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(entry)?,
        OutputFormat::Text => {
            let (out, stderr) = format_entry(entry);
            println!("{out}");
            if let Some(stderr) = stderr {
                eprintln!("{stderr}");
            }
        }
    }
    match ExitError::for_entry(entry) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
