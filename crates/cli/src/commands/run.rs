// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generator, task and doctor runs

use anyhow::{bail, Result};
use clap::Args;
use lc_core::{parse_params, DoctorFlags};
use lc_engine::{DoctorInput, GeneratorInput, TaskInput};

use super::{finish, Context};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Generator name (see `lc generators`)
    pub name: String,
    /// Arguments passed through to the generator
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Task name (see `lc tasks`)
    pub name: String,
    /// Task parameter, repeatable
    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
    pub params: Vec<String>,
    /// Positional task arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Check production settings
    #[arg(long)]
    pub production: bool,
    /// Validate configuration
    #[arg(long)]
    pub config: bool,
    /// Include the dependency graph
    #[arg(long)]
    pub graph: bool,
    /// Ask the assistant to review findings
    #[arg(long)]
    pub assistant: bool,
}

pub async fn generate(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let entry = ctx.store().run_generator(GeneratorInput::new(args.name, args.args)).await;
    finish(&entry, ctx.format)
}

pub async fn task(ctx: &Context, args: TaskArgs) -> Result<()> {
    if let Some(bad) = args.params.iter().find(|p| !p.contains('=')) {
        bail!("invalid param '{bad}': expected KEY=VALUE");
    }
    let params = parse_params(&args.params.join("\n"));
    let entry = ctx.store().run_task(TaskInput::new(args.name, args.args, params)).await;
    finish(&entry, ctx.format)
}

pub async fn doctor(ctx: &Context, args: DoctorArgs) -> Result<()> {
    let flags = DoctorFlags {
        production: args.production,
        config: args.config,
        graph: args.graph,
        assistant: args.assistant,
    };
    let entry = ctx.store().run_doctor(DoctorInput { flags }).await;
    finish(&entry, ctx.format)
}
