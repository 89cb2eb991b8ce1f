// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency graph, node creation and assistant explanations

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use lc_adapters::{AssistantAdapter, FieldDefinition, NodeCreationRequest, NodePresentation};
use lc_core::{trim_or_absent, ViewModel};
use lc_engine::GraphExplorer;
use std::sync::Arc;

use super::Context;
use crate::output::{format_advice, format_generation, format_graph, print_json, OutputFormat};

#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(subcommand)]
    pub command: Option<GraphCommand>,
}

#[derive(Subcommand, Debug)]
pub enum GraphCommand {
    /// Generate a new node through the backend (debug builds only)
    Create(CreateNodeArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Component {
    Model,
    Migration,
    Scaffold,
    Controller,
    Task,
    Scheduler,
    Worker,
    Mailer,
    Data,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Interface {
    Htmx,
    Html,
    #[default]
    Api,
}

impl From<Interface> for NodePresentation {
    fn from(interface: Interface) -> Self {
        match interface {
            Interface::Htmx => NodePresentation::Htmx,
            Interface::Html => NodePresentation::Html,
            Interface::Api => NodePresentation::Api,
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateNodeArgs {
    /// Kind of node to generate
    #[arg(value_enum)]
    pub component: Component,
    /// Node name (not used by the scheduler)
    pub name: Option<String>,
    /// Model, migration or scaffold field, repeatable
    #[arg(long = "field", short = 'f', value_name = "NAME:TYPE")]
    pub fields: Vec<String>,
    /// Controller action, repeatable
    #[arg(long = "action", short = 'a', value_name = "ACTION")]
    pub actions: Vec<String>,
    /// Controller or scaffold presentation
    #[arg(long, value_enum, default_value_t)]
    pub interface: Interface,
    /// Generate without created_at/updated_at columns
    #[arg(long)]
    pub no_timestamps: bool,
}

impl CreateNodeArgs {
    /// Build the request, rejecting flags the component does not take.
    pub fn to_request(&self) -> Result<NodeCreationRequest> {
        let takes_fields = matches!(self.component, Component::Model | Component::Migration | Component::Scaffold);
        if !takes_fields && (!self.fields.is_empty() || self.no_timestamps) {
            bail!("--field and --no-timestamps apply to model, migration and scaffold only");
        }
        if self.component != Component::Controller && !self.actions.is_empty() {
            bail!("--action applies to controller only");
        }

        let fields = self
            .fields
            .iter()
            .map(|text| FieldDefinition::parse(text).ok_or_else(|| anyhow!("invalid field '{text}': expected NAME:TYPE")))
            .collect::<Result<Vec<_>>>()?;
        let with_timestamps = self.no_timestamps.then_some(false);
        let interface = NodePresentation::from(self.interface);
        let name = self.name.clone().unwrap_or_default();

        Ok(match self.component {
            Component::Model => NodeCreationRequest::Model { name, with_timestamps, fields },
            Component::Migration => NodeCreationRequest::Migration { name, with_timestamps, fields },
            Component::Scaffold => NodeCreationRequest::Scaffold { name, with_timestamps, fields, interface },
            Component::Controller => {
                let actions = self.actions.iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()).collect();
                NodeCreationRequest::Controller { name, actions, interface }
            }
            Component::Task => NodeCreationRequest::Task { name },
            Component::Scheduler => {
                if self.name.is_some() {
                    bail!("the scheduler takes no name");
                }
                NodeCreationRequest::Scheduler {}
            }
            Component::Worker => NodeCreationRequest::Worker { name },
            Component::Mailer => NodeCreationRequest::Mailer { name },
            Component::Data => NodeCreationRequest::Data { name },
        })
    }
}

pub async fn handle(ctx: &Context, args: GraphArgs) -> Result<()> {
    match args.command {
        None => show(ctx).await,
        Some(GraphCommand::Create(args)) => create(ctx, &args).await,
    }
}

pub async fn create(ctx: &Context, args: &CreateNodeArgs) -> Result<()> {
    let request = args.to_request()?;
    let explorer = GraphExplorer::new(ctx.gateway.clone());
    let generation = explorer
        .create_node(&request)
        .await
        .map_err(|e| anyhow!("failed to create {}: {e}", request.component()))?;
    match ctx.format {
        OutputFormat::Json => print_json(&generation)?,
        OutputFormat::Text => println!("{}", format_generation(&request, &generation)),
    }
    Ok(())
}

async fn load(ctx: &Context) -> Result<Arc<ViewModel>> {
    let explorer = GraphExplorer::new(ctx.gateway.clone());
    explorer.refresh().await.map_err(|e| anyhow!("failed to load graph: {e}"))
}

pub async fn show(ctx: &Context) -> Result<()> {
    let view = load(ctx).await?;
    match ctx.format {
        OutputFormat::Json => print_json(view.as_ref())?,
        OutputFormat::Text => println!("{}", format_graph(&view)),
    }
    Ok(())
}

pub async fn explain(ctx: &Context, key: &str, prompt: Option<&str>) -> Result<()> {
    let view = load(ctx).await?;
    let node = view
        .node(key.trim())
        .ok_or_else(|| anyhow!("unknown node '{}' (see `lc graph` for node keys)", key.trim()))?;

    let prompt = trim_or_absent(prompt);
    let advice = ctx.gateway.advise(node, prompt.as_deref()).await?;
    match ctx.format {
        OutputFormat::Json => print_json(&advice)?,
        OutputFormat::Text => println!("{}", format_advice(&advice)),
    }
    Ok(())
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
