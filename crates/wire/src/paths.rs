// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Endpoint paths served by the backend.

pub const GENERATORS: &str = "/__loco/cli/generators";
pub const RUN_GENERATOR: &str = "/__loco/cli/generators/run";
pub const TASKS: &str = "/__loco/cli/tasks";
pub const RUN_TASK: &str = "/__loco/cli/tasks/run";
pub const DOCTOR_SNAPSHOT: &str = "/__loco/cli/doctor/snapshot";
pub const JOB_STATUS: &str = "/__loco/cli/jobs/status";
pub const GRAPH: &str = "/__loco/graph";
pub const GRAPH_NODES: &str = "/__loco/graph/nodes";
pub const HEALTH: &str = "/_health";
pub const ASSISTANT: &str = "/__loco/assistant";
