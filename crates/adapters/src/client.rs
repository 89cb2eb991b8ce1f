// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend gateway over the introspection HTTP endpoints.

use crate::gateway::{AssistantAdapter, BackendGateway, GatewayError, GraphMutator, GraphSource};
use crate::http::{self, Endpoint};
use async_trait::async_trait;
use lc_core::graph::HealthSnapshot;
use lc_core::{
    CommandExecution, ConsoleCommand, DoctorFlags, DoctorSnapshot, GraphSnapshot, JobStatus, Node,
};
use lc_wire::{
    paths, query_string, AssistantAdvice, AssistantRequest, DoctorSnapshotBody, GenerationBody,
    NodeCreationRequest, ScaffoldGeneration, TaskRunBody,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Transport timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP implementation of [`BackendGateway`], [`GraphSource`],
/// [`GraphMutator`] and [`AssistantAdapter`].
#[derive(Clone, Debug)]
pub struct HttpGateway {
    endpoint: Arc<Endpoint>,
    timeout: Duration,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        Ok(Self { endpoint: Arc::new(Endpoint::parse(base_url)?), timeout: DEFAULT_TIMEOUT })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get(&self, path: &str) -> Result<String, GatewayError> {
        tracing::debug!(addr = self.endpoint.addr(), path, "GET");
        let result = http::get(&self.endpoint, path, self.timeout).await;
        log_outcome("GET", path, &result);
        result
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String, GatewayError> {
        let body = serde_json::to_string(body)
            .map_err(|e| GatewayError::Transport(format!("encode request failed: {e}")))?;
        tracing::debug!(addr = self.endpoint.addr(), path, body = %body, "POST");
        let result = http::post(&self.endpoint, path, &body, self.timeout).await;
        log_outcome("POST", path, &result);
        result
    }

    async fn list(&self, path: &str, environment: Option<&str>) -> Result<Vec<ConsoleCommand>, GatewayError> {
        let target = format!("{}{}", path, query_string(&[("environment", environment)]));
        let body = self.get(&target).await?;
        Ok(lc_wire::decode_commands(&body)?)
    }

    async fn fetch_health(&self) -> HealthSnapshot {
        match self.get(paths::HEALTH).await.and_then(|body| Ok(lc_wire::decode::<HealthSnapshot>(&body)?)) {
            Ok(health) => health,
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                HealthSnapshot { ok: false, details: Some(Value::String(e.to_string())) }
            }
        }
    }
}

fn log_outcome(method: &str, path: &str, result: &Result<String, GatewayError>) {
    match result {
        Ok(body) => tracing::debug!(method, path, bytes = body.len(), "response"),
        Err(e) => tracing::debug!(method, path, error = %e, "request failed"),
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_generators(
        &self,
        environment: Option<&str>,
    ) -> Result<Vec<ConsoleCommand>, GatewayError> {
        self.list(paths::GENERATORS, environment).await
    }

    async fn list_tasks(
        &self,
        environment: Option<&str>,
    ) -> Result<Vec<ConsoleCommand>, GatewayError> {
        self.list(paths::TASKS, environment).await
    }

    async fn run_generator(
        &self,
        generator: &str,
        arguments: &[String],
        environment: Option<&str>,
    ) -> Result<CommandExecution, GatewayError> {
        let body = GenerationBody {
            generator: generator.to_string(),
            arguments: arguments.to_vec(),
            environment: environment.map(str::to_string),
        };
        let response = self.post(paths::RUN_GENERATOR, &body).await?;
        Ok(lc_wire::decode(&response)?)
    }

    async fn run_task(
        &self,
        task: &str,
        arguments: &[String],
        params: &BTreeMap<String, String>,
        environment: Option<&str>,
    ) -> Result<CommandExecution, GatewayError> {
        let body = TaskRunBody {
            task: task.to_string(),
            arguments: arguments.to_vec(),
            params: (!params.is_empty()).then(|| params.clone()),
            environment: environment.map(str::to_string),
        };
        let response = self.post(paths::RUN_TASK, &body).await?;
        Ok(lc_wire::decode(&response)?)
    }

    async fn request_doctor_snapshot(
        &self,
        environment: Option<&str>,
        flags: DoctorFlags,
    ) -> Result<DoctorSnapshot, GatewayError> {
        let body = DoctorSnapshotBody::new(environment.map(str::to_string), flags);
        let response = self.post(paths::DOCTOR_SNAPSHOT, &body).await?;
        Ok(lc_wire::decode_doctor(&response)?)
    }

    async fn fetch_job_status(
        &self,
        job_id: &str,
        environment: Option<&str>,
    ) -> Result<JobStatus, GatewayError> {
        let target = format!(
            "{}{}",
            paths::JOB_STATUS,
            query_string(&[("job_id", Some(job_id)), ("environment", environment)])
        );
        let response = self.get(&target).await?;
        Ok(lc_wire::decode(&response)?)
    }
}

#[async_trait]
impl GraphSource for HttpGateway {
    /// Health comes from the snapshot when it carries one, else from `/_health`.
    async fn fetch_snapshot(&self) -> Result<GraphSnapshot, GatewayError> {
        let body = self.get(paths::GRAPH).await?;
        let value: Value = lc_wire::decode(&body)?;
        let has_health = value.get("health").is_some_and(|h| !h.is_null());
        let mut snapshot: GraphSnapshot = serde_json::from_value(value)
            .map_err(|e| GatewayError::Decode { message: e.to_string(), raw: body.trim().to_string() })?;
        if !has_health {
            snapshot.health = self.fetch_health().await;
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl GraphMutator for HttpGateway {
    async fn create_node(
        &self,
        request: &NodeCreationRequest,
    ) -> Result<ScaffoldGeneration, GatewayError> {
        let response = self.post(paths::GRAPH_NODES, request).await?;
        Ok(lc_wire::decode(&response)?)
    }
}

#[async_trait]
impl AssistantAdapter for HttpGateway {
    async fn advise(
        &self,
        node: &Node,
        prompt: Option<&str>,
    ) -> Result<AssistantAdvice, GatewayError> {
        let body = AssistantRequest { node: node.clone(), prompt: prompt.map(str::to_string) };
        let response = self.post(paths::ASSISTANT, &body).await?;
        Ok(lc_wire::decode(&response)?)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
