// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color;
use clap::ValueEnum;
use lc_adapters::{AssistantAdvice, NodeCreationRequest, ScaffoldGeneration};
use lc_core::{ConsoleCommand, HistoryEntry, NodePayload, NodeTag, ViewModel};
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a duration as "850ms", "1.2s" or "3m05s"
pub fn format_duration(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1_000.0)
    } else {
        format!("{}m{:02}s", ms / 60_000, (ms % 60_000) / 1_000)
    }
}

/// Two-column listing, names padded to the longest one
pub fn format_commands(commands: &[ConsoleCommand]) -> String {
    let width = commands.iter().map(|c| c.command.len()).max().unwrap_or(0);
    commands
        .iter()
        .map(|c| {
            if c.summary.is_empty() {
                c.command.clone()
            } else {
                format!("{:<width$}  {}", c.command, color::context(&c.summary))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status line, then captured stdout. Stderr is returned separately.
pub fn format_entry(entry: &HistoryEntry) -> (String, Option<String>) {
    let mut meta = Vec::new();
    if let Some(code) = entry.exit_code {
        meta.push(format!("exit {code}"));
    }
    if let Some(ms) = entry.duration_ms() {
        meta.push(format_duration(ms));
    }
    let mut out = format!("[{}] {}", color::status(entry.status), entry.command);
    if !meta.is_empty() {
        out.push_str(&format!(" ({})", meta.join(", ")));
    }
    if let Some(stdout) = &entry.stdout {
        let text = stdout.to_text();
        let text = text.trim_end();
        if !text.is_empty() {
            out.push('\n');
            out.push_str(text);
        }
    }
    let stderr = entry.stderr.as_deref().map(str::trim_end).filter(|s| !s.is_empty()).map(str::to_string);
    (out, stderr)
}

fn section_title(tag: NodeTag) -> &'static str {
    match tag {
        NodeTag::Application => "Application",
        NodeTag::Route => "Routes",
        NodeTag::BackgroundWorker => "Background workers",
        NodeTag::SchedulerJob => "Scheduler jobs",
        NodeTag::Task => "Tasks",
    }
}

fn node_detail(payload: &NodePayload) -> String {
    match payload {
        NodePayload::Application { summary, .. } => summary.clone(),
        NodePayload::Route { methods, .. } => methods.join(", "),
        NodePayload::BackgroundWorker { command, tags, .. } => with_tags(command, tags),
        NodePayload::SchedulerJob { schedule, command, run_on_start, .. } => {
            let mut detail = format!("{schedule}  {command}");
            if *run_on_start {
                detail.push_str("  (run on start)");
            }
            detail
        }
        NodePayload::Task { description, tags, .. } => {
            with_tags(description.as_deref().unwrap_or(""), tags)
        }
    }
}

fn with_tags(text: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        text.to_string()
    } else {
        format!("{text} [{}]", tags.join(", "))
    }
}

/// Grouped node listing with a statistics line
pub fn format_graph(view: &ViewModel) -> String {
    let mut lines = Vec::new();
    if let Some(root) = view.root() {
        lines.push(format!("{}  {}", color::header(&root.label), node_detail(&root.payload)));
    }
    let stats = &view.statistics;
    lines.push(format!(
        "routes: {}  background workers: {}  scheduler jobs: {}  tasks: {}",
        stats.route, stats.background_worker, stats.scheduler_job, stats.task
    ));
    for tag in [NodeTag::Route, NodeTag::BackgroundWorker, NodeTag::SchedulerJob, NodeTag::Task] {
        let nodes: Vec<_> = view.nodes.iter().filter(|n| n.tag == tag).collect();
        if nodes.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(color::header(section_title(tag)));
        for node in nodes {
            let detail = node_detail(&node.payload);
            if detail.is_empty() {
                lines.push(format!("  {}", node.key));
            } else {
                lines.push(format!("  {}  {}", node.key, color::context(&detail)));
            }
        }
    }
    lines.join("\n")
}

pub fn format_advice(advice: &AssistantAdvice) -> String {
    let mut out = advice.summary.trim().to_string();
    for tip in &advice.remediation_tips {
        out.push_str(&format!("\n  - {tip}"));
    }
    out
}

/// Generator message, or a one-line summary when the backend sent none
pub fn format_generation(request: &NodeCreationRequest, generation: &ScaffoldGeneration) -> String {
    let message = generation.message.trim();
    if !message.is_empty() {
        return message.to_string();
    }
    match request.name() {
        Some(name) => format!("created {} {}", request.component(), name.trim()),
        None => format!("created {}", request.component()),
    }
}
