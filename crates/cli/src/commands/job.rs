// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asynchronous job status

use anyhow::{anyhow, Result};
use clap::Args;
use lc_core::{EntryStatus, OperationKind};
use std::time::Duration;

use super::{finish, Context};

#[derive(Args, Debug)]
pub struct JobArgs {
    /// Job id returned by a task or generator run
    pub id: String,
    /// Poll until the job finishes
    #[arg(long)]
    pub wait: bool,
    /// Delay between polls when waiting
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub interval_ms: u64,
}

pub async fn handle(ctx: &Context, args: JobArgs) -> Result<()> {
    let store = ctx.store();
    let interval = Duration::from_millis(args.interval_ms.max(1));
    loop {
        let Some(entry) = store.check_job_status(&args.id).await else {
            let snapshot = store.snapshot();
            let message = snapshot
                .operation(OperationKind::Job)
                .and_then(|op| op.last_error.clone())
                .unwrap_or_else(|| "job id is required".to_string());
            return Err(anyhow!(message));
        };
        if !args.wait || entry.status != EntryStatus::Running {
            return finish(&entry, ctx.format);
        }
        tracing::debug!(job_id = %args.id, "job still running");
        tokio::time::sleep(interval).await;
    }
}
