// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generator and task listings

use anyhow::{bail, Result};
use lc_core::OperationKind;
use lc_engine::LoadState;

use super::Context;
use crate::output::{format_commands, print_json, OutputFormat};

pub async fn handle(ctx: &Context, kind: OperationKind) -> Result<()> {
    let store = ctx.store();
    if let LoadState::Error { message } = store.load_commands().await {
        bail!("failed to load commands: {message}");
    }
    let snapshot = store.snapshot();
    let commands = match kind {
        OperationKind::Task => &snapshot.tasks,
        _ => &snapshot.generators,
    };

    match ctx.format {
        OutputFormat::Json => print_json(commands)?,
        OutputFormat::Text if commands.is_empty() => println!("No {kind}s available"),
        OutputFormat::Text => println!("{}", format_commands(commands)),
    }
    Ok(())
}
