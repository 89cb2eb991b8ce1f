// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency snapshot and the graph view-model derived from it.
//!
//! The view-model is a star: one synthetic application node, and one
//! `dependency` edge from it to every route, worker, scheduled job and task.
//! It is rebuilt wholesale from each snapshot and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the synthetic application node.
pub const ROOT_NODE_KEY: &str = "application";

pub const HEALTHY_SUMMARY: &str = "All health checks are passing";
pub const UNHEALTHY_SUMMARY: &str = "Health checks are reporting problems";

// ── Snapshot (input) ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub routes: Vec<RouteSnapshot>,
    #[serde(default)]
    pub dependencies: DependencySnapshot,
    #[serde(default)]
    pub health: HealthSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    pub path: String,
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySnapshot {
    #[serde(default)]
    pub background_workers: Vec<WorkerSnapshot>,
    #[serde(default)]
    pub scheduler_jobs: Vec<SchedulerJobSnapshot>,
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    pub name: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerJobSnapshot {
    pub name: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub run_on_start: bool,
    #[serde(default)]
    pub shell: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

// ── View-model (output) ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeTag {
    Application,
    Route,
    BackgroundWorker,
    SchedulerJob,
    Task,
}

crate::simple_display! {
    NodeTag {
        Application => "application",
        Route => "route",
        BackgroundWorker => "background_worker",
        SchedulerJob => "scheduler_job",
        Task => "task",
    }
}

/// Tag-specific node data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodePayload {
    Application {
        healthy: bool,
        summary: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Value>,
    },
    Route {
        path: String,
        methods: Vec<String>,
    },
    BackgroundWorker {
        name: String,
        command: String,
        tags: Vec<String>,
    },
    SchedulerJob {
        name: String,
        schedule: String,
        command: String,
        run_on_start: bool,
        shell: bool,
        tags: Vec<String>,
    },
    Task {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        tags: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: String,
    pub label: String,
    pub tag: NodeTag,
    pub payload: NodePayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Dependency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub key: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

/// Node counts per non-application tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub route: usize,
    pub background_worker: usize,
    pub scheduler_job: usize,
    pub task: usize,
}

impl Statistics {
    pub fn get(&self, tag: NodeTag) -> usize {
        match tag {
            NodeTag::Application => 0,
            NodeTag::Route => self.route,
            NodeTag::BackgroundWorker => self.background_worker,
            NodeTag::SchedulerJob => self.scheduler_job,
            NodeTag::Task => self.task,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub statistics: Statistics,
}

impl ViewModel {
    pub fn root(&self) -> Option<&Node> {
        self.nodes.iter().find(|node| node.tag == NodeTag::Application)
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.key == key)
    }
}

fn node_key(tag: NodeTag, index: usize, natural: &str) -> String {
    format!("{tag}:{index}:{natural}")
}

fn edge_key(source: &str, target: &str) -> String {
    format!("edge:{source}->{target}")
}

/// Build the view-model for a snapshot.
///
/// Node order is root, then routes, background workers, scheduler jobs and
/// tasks, each in snapshot order. Keys embed the position within their
/// source list, so equal names never collide and an unchanged snapshot
/// always yields identical keys.
pub fn to_view_model(snapshot: &GraphSnapshot) -> ViewModel {
    let healthy = snapshot.health.ok;
    let root = Node {
        key: ROOT_NODE_KEY.to_string(),
        label: "Application".to_string(),
        tag: NodeTag::Application,
        payload: NodePayload::Application {
            healthy,
            summary: if healthy { HEALTHY_SUMMARY } else { UNHEALTHY_SUMMARY }.to_string(),
            details: snapshot.health.details.clone(),
        },
    };

    let deps = &snapshot.dependencies;
    let routes = snapshot.routes.iter().enumerate().map(|(i, route)| Node {
        key: node_key(NodeTag::Route, i, &route.path),
        label: route.path.clone(),
        tag: NodeTag::Route,
        payload: NodePayload::Route { path: route.path.clone(), methods: route.methods.clone() },
    });
    let workers = deps.background_workers.iter().enumerate().map(|(i, worker)| Node {
        key: node_key(NodeTag::BackgroundWorker, i, &worker.name),
        label: worker.name.clone(),
        tag: NodeTag::BackgroundWorker,
        payload: NodePayload::BackgroundWorker {
            name: worker.name.clone(),
            command: worker.command.clone(),
            tags: worker.tags.clone(),
        },
    });
    let jobs = deps.scheduler_jobs.iter().enumerate().map(|(i, job)| Node {
        key: node_key(NodeTag::SchedulerJob, i, &job.name),
        label: job.name.clone(),
        tag: NodeTag::SchedulerJob,
        payload: NodePayload::SchedulerJob {
            name: job.name.clone(),
            schedule: job.schedule.clone(),
            command: job.command.clone(),
            run_on_start: job.run_on_start,
            shell: job.shell,
            tags: job.tags.clone(),
        },
    });
    let tasks = deps.tasks.iter().enumerate().map(|(i, task)| Node {
        key: node_key(NodeTag::Task, i, &task.name),
        label: task.name.clone(),
        tag: NodeTag::Task,
        payload: NodePayload::Task {
            name: task.name.clone(),
            description: task.description.clone(),
            tags: task.tags.clone(),
        },
    });

    let nodes: Vec<Node> =
        std::iter::once(root).chain(routes).chain(workers).chain(jobs).chain(tasks).collect();

    let edges = nodes
        .iter()
        .skip(1)
        .map(|node| Edge {
            key: edge_key(ROOT_NODE_KEY, &node.key),
            source: ROOT_NODE_KEY.to_string(),
            target: node.key.clone(),
            kind: EdgeKind::Dependency,
        })
        .collect();

    let statistics = Statistics {
        route: snapshot.routes.len(),
        background_worker: deps.background_workers.len(),
        scheduler_job: deps.scheduler_jobs.len(),
        task: deps.tasks.len(),
    };

    ViewModel { nodes, edges, statistics }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
