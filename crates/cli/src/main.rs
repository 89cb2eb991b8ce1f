// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lc - loco console client

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use lc_adapters::HttpGateway;
use lc_core::OperationKind;

use commands::graph::GraphArgs;
use commands::job::JobArgs;
use commands::run::{DoctorArgs, GenerateArgs, TaskArgs};
use commands::Context;
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "lc",
    version = env::VERSION,
    about = "Loco console - inspect and drive a running loco application",
    styles = color::styles(),
)]
struct Cli {
    /// Backend base URL (defaults to LC_BASE_URL or http://127.0.0.1:5150)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Target environment (defaults to LC_ENVIRONMENT, else the backend default)
    #[arg(long, short = 'e', global = true)]
    environment: Option<String>,

    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the application dependency graph, or add a node to it
    Graph(GraphArgs),
    /// Ask the assistant about a graph node
    Explain {
        /// Node key from `lc graph`
        key: String,
        /// Extra question for the assistant
        #[arg(long)]
        prompt: Option<String>,
    },
    /// List available generators
    Generators,
    /// List available tasks
    Tasks,
    /// Run a generator
    Generate(GenerateArgs),
    /// Run a task
    Task(TaskArgs),
    /// Run doctor diagnostics
    Doctor(DoctorArgs),
    /// Check an asynchronous job
    Job(JobArgs),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("{}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let base_url = cli.url.unwrap_or_else(env::base_url);
    let gateway = HttpGateway::new(&base_url)?.with_timeout(env::timeout());
    let ctx = Context {
        gateway,
        environment: cli.environment.or_else(env::environment),
        format: cli.output,
    };

    match command {
        Commands::Graph(args) => commands::graph::handle(&ctx, args).await,
        Commands::Explain { key, prompt } => commands::graph::explain(&ctx, &key, prompt.as_deref()).await,
        Commands::Generators => commands::catalog::handle(&ctx, OperationKind::Generator).await,
        Commands::Tasks => commands::catalog::handle(&ctx, OperationKind::Task).await,
        Commands::Generate(args) => commands::run::generate(&ctx, args).await,
        Commands::Task(args) => commands::run::task(&ctx, args).await,
        Commands::Doctor(args) => commands::run::doctor(&ctx, args).await,
        Commands::Job(args) => commands::job::handle(&ctx, args).await,
    }
}
