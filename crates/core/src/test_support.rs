// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::graph::{
    DependencySnapshot, GraphSnapshot, HealthSnapshot, RouteSnapshot, SchedulerJobSnapshot,
    TaskSnapshot, WorkerSnapshot,
};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for snapshot inputs.
pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    fn arb_name() -> impl Strategy<Value = String> {
        // Small alphabet so duplicate names show up often
        "[a-c]{1,2}"
    }

    pub fn arb_snapshot() -> impl Strategy<Value = GraphSnapshot> {
        (
            proptest::collection::vec(arb_name(), 0..6),
            proptest::collection::vec(arb_name(), 0..6),
            proptest::collection::vec(arb_name(), 0..6),
            proptest::collection::vec(arb_name(), 0..6),
            any::<bool>(),
        )
            .prop_map(|(routes, workers, jobs, tasks, ok)| {
                let mut snapshot = snapshot_with(routes.len(), workers.len(), jobs.len(), tasks.len(), ok);
                for (route, name) in snapshot.routes.iter_mut().zip(routes) {
                    route.path = format!("/{name}");
                }
                for (worker, name) in snapshot.dependencies.background_workers.iter_mut().zip(workers) {
                    worker.name = name;
                }
                for (job, name) in snapshot.dependencies.scheduler_jobs.iter_mut().zip(jobs) {
                    job.name = name;
                }
                for (task, name) in snapshot.dependencies.tasks.iter_mut().zip(tasks) {
                    task.name = name;
                }
                snapshot
            })
    }
}

// ── Snapshot factories ──────────────────────────────────────────────────

/// Snapshot with the given number of entries per collection, named by index.
pub fn snapshot_with(routes: usize, workers: usize, jobs: usize, tasks: usize, ok: bool) -> GraphSnapshot {
    GraphSnapshot {
        routes: (0..routes)
            .map(|i| RouteSnapshot { path: format!("/api/r{i}"), methods: vec!["GET".into()] })
            .collect(),
        dependencies: DependencySnapshot {
            background_workers: (0..workers)
                .map(|i| WorkerSnapshot { name: format!("worker{i}"), command: format!("run{i}"), tags: vec![] })
                .collect(),
            scheduler_jobs: (0..jobs)
                .map(|i| SchedulerJobSnapshot {
                    name: format!("job{i}"),
                    command: "task cleanup".into(),
                    schedule: "0 * * * *".into(),
                    run_on_start: false,
                    shell: true,
                    tags: vec!["base".into()],
                })
                .collect(),
            tasks: (0..tasks)
                .map(|i| TaskSnapshot { name: format!("task{i}"), description: None, tags: vec![] })
                .collect(),
        },
        health: HealthSnapshot { ok, details: None },
    }
}
