// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use lc_core::{
    CommandExecution, ConsoleCommand, DoctorFlags, DoctorSnapshot, GraphSnapshot, JobStatus, Node,
};
use lc_wire::{AssistantAdvice, DecodeError, NodeCreationRequest, ScaffoldGeneration};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from backend calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Connect, IO, timeout, or a non-2xx status
    #[error("{0}")]
    Transport(String),
    /// The body did not have the expected shape
    #[error("unexpected response ({message})")]
    Decode { message: String, raw: String },
}

impl From<DecodeError> for GatewayError {
    fn from(err: DecodeError) -> Self {
        GatewayError::Decode { message: err.message, raw: err.raw }
    }
}

/// The backend's approved command surface.
///
/// `environment` is already normalized by the caller: `None` means the
/// backend default.
#[async_trait]
pub trait BackendGateway: Clone + Send + Sync + 'static {
    async fn list_generators(
        &self,
        environment: Option<&str>,
    ) -> Result<Vec<ConsoleCommand>, GatewayError>;

    async fn list_tasks(&self, environment: Option<&str>)
        -> Result<Vec<ConsoleCommand>, GatewayError>;

    async fn run_generator(
        &self,
        generator: &str,
        arguments: &[String],
        environment: Option<&str>,
    ) -> Result<CommandExecution, GatewayError>;

    /// Empty `params` are not sent.
    async fn run_task(
        &self,
        task: &str,
        arguments: &[String],
        params: &BTreeMap<String, String>,
        environment: Option<&str>,
    ) -> Result<CommandExecution, GatewayError>;

    async fn request_doctor_snapshot(
        &self,
        environment: Option<&str>,
        flags: DoctorFlags,
    ) -> Result<DoctorSnapshot, GatewayError>;

    async fn fetch_job_status(
        &self,
        job_id: &str,
        environment: Option<&str>,
    ) -> Result<JobStatus, GatewayError>;
}

/// Source of dependency snapshots for the graph view
#[async_trait]
pub trait GraphSource: Clone + Send + Sync + 'static {
    async fn fetch_snapshot(&self) -> Result<GraphSnapshot, GatewayError>;
}

/// Advice about a single graph node
#[async_trait]
pub trait AssistantAdapter: Clone + Send + Sync + 'static {
    async fn advise(&self, node: &Node, prompt: Option<&str>)
        -> Result<AssistantAdvice, GatewayError>;
}

/// Generates new graph nodes (controllers, models, workers, ...) through
/// the backend's scaffold generator. Only debug builds of the backend serve it.
#[async_trait]
pub trait GraphMutator: Clone + Send + Sync + 'static {
    async fn create_node(
        &self,
        request: &NodeCreationRequest,
    ) -> Result<ScaffoldGeneration, GatewayError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{AssistantAdapter, BackendGateway, GatewayError, GraphMutator, GraphSource};
    use async_trait::async_trait;
    use lc_core::{
        CommandExecution, ConsoleCommand, DoctorFlags, DoctorSnapshot, GraphSnapshot, JobStatus,
        Node,
    };
    use lc_wire::{AssistantAdvice, NodeCreationRequest, ScaffoldGeneration};
    use parking_lot::Mutex;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded gateway call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum GatewayCall {
        ListGenerators { environment: Option<String> },
        ListTasks { environment: Option<String> },
        RunGenerator { generator: String, arguments: Vec<String>, environment: Option<String> },
        RunTask {
            task: String,
            arguments: Vec<String>,
            params: BTreeMap<String, String>,
            environment: Option<String>,
        },
        DoctorSnapshot { environment: Option<String>, flags: DoctorFlags },
        JobStatus { job_id: String, environment: Option<String> },
        GraphSnapshot,
        Advise { node: String, prompt: Option<String> },
        CreateNode(NodeCreationRequest),
    }

    struct FakeGatewayState {
        calls: Vec<GatewayCall>,
        generators: Result<Vec<ConsoleCommand>, GatewayError>,
        tasks: Result<Vec<ConsoleCommand>, GatewayError>,
        executions: VecDeque<Result<CommandExecution, GatewayError>>,
        doctor: Result<DoctorSnapshot, GatewayError>,
        job_statuses: VecDeque<Result<JobStatus, GatewayError>>,
        snapshots: VecDeque<Result<GraphSnapshot, GatewayError>>,
        advice: Result<AssistantAdvice, GatewayError>,
        generation: Result<ScaffoldGeneration, GatewayError>,
        delay: Option<Duration>,
    }

    /// Scripted gateway for tests.
    ///
    /// Executions, job statuses and snapshots are consumed in order; when a
    /// queue runs dry the last-resort default is a successful, empty result.
    #[derive(Clone)]
    pub struct FakeGateway {
        inner: Arc<Mutex<FakeGatewayState>>,
    }

    impl Default for FakeGateway {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeGatewayState {
                    calls: Vec::new(),
                    generators: Ok(Vec::new()),
                    tasks: Ok(Vec::new()),
                    executions: VecDeque::new(),
                    doctor: Ok(DoctorSnapshot::default()),
                    job_statuses: VecDeque::new(),
                    snapshots: VecDeque::new(),
                    advice: Ok(AssistantAdvice::default()),
                    generation: Ok(ScaffoldGeneration::default()),
                    delay: None,
                })),
            }
        }
    }

    impl FakeGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// All recorded calls, oldest first
        pub fn calls(&self) -> Vec<GatewayCall> {
            self.inner.lock().calls.clone()
        }

        pub fn set_generators(&self, result: Result<Vec<ConsoleCommand>, GatewayError>) {
            self.inner.lock().generators = result;
        }

        pub fn set_tasks(&self, result: Result<Vec<ConsoleCommand>, GatewayError>) {
            self.inner.lock().tasks = result;
        }

        /// Queue the result of the next generator or task run
        pub fn push_execution(&self, result: Result<CommandExecution, GatewayError>) {
            self.inner.lock().executions.push_back(result);
        }

        pub fn set_doctor(&self, result: Result<DoctorSnapshot, GatewayError>) {
            self.inner.lock().doctor = result;
        }

        pub fn push_job_status(&self, result: Result<JobStatus, GatewayError>) {
            self.inner.lock().job_statuses.push_back(result);
        }

        pub fn push_snapshot(&self, result: Result<GraphSnapshot, GatewayError>) {
            self.inner.lock().snapshots.push_back(result);
        }

        pub fn set_advice(&self, result: Result<AssistantAdvice, GatewayError>) {
            self.inner.lock().advice = result;
        }

        pub fn set_generation(&self, result: Result<ScaffoldGeneration, GatewayError>) {
            self.inner.lock().generation = result;
        }

        /// Sleep this long inside every call, after recording it
        pub fn set_delay(&self, delay: Duration) {
            self.inner.lock().delay = Some(delay);
        }

        async fn record(&self, call: GatewayCall) {
            let delay = {
                let mut state = self.inner.lock();
                state.calls.push(call);
                state.delay
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    fn owned(value: Option<&str>) -> Option<String> {
        value.map(str::to_string)
    }

    #[async_trait]
    impl BackendGateway for FakeGateway {
        async fn list_generators(
            &self,
            environment: Option<&str>,
        ) -> Result<Vec<ConsoleCommand>, GatewayError> {
            self.record(GatewayCall::ListGenerators { environment: owned(environment) }).await;
            self.inner.lock().generators.clone()
        }

        async fn list_tasks(
            &self,
            environment: Option<&str>,
        ) -> Result<Vec<ConsoleCommand>, GatewayError> {
            self.record(GatewayCall::ListTasks { environment: owned(environment) }).await;
            self.inner.lock().tasks.clone()
        }

        async fn run_generator(
            &self,
            generator: &str,
            arguments: &[String],
            environment: Option<&str>,
        ) -> Result<CommandExecution, GatewayError> {
            self.record(GatewayCall::RunGenerator {
                generator: generator.to_string(),
                arguments: arguments.to_vec(),
                environment: owned(environment),
            })
            .await;
            self.inner.lock().executions.pop_front().unwrap_or_else(|| Ok(CommandExecution::default()))
        }

        async fn run_task(
            &self,
            task: &str,
            arguments: &[String],
            params: &BTreeMap<String, String>,
            environment: Option<&str>,
        ) -> Result<CommandExecution, GatewayError> {
            self.record(GatewayCall::RunTask {
                task: task.to_string(),
                arguments: arguments.to_vec(),
                params: params.clone(),
                environment: owned(environment),
            })
            .await;
            self.inner.lock().executions.pop_front().unwrap_or_else(|| Ok(CommandExecution::default()))
        }

        async fn request_doctor_snapshot(
            &self,
            environment: Option<&str>,
            flags: DoctorFlags,
        ) -> Result<DoctorSnapshot, GatewayError> {
            self.record(GatewayCall::DoctorSnapshot { environment: owned(environment), flags }).await;
            self.inner.lock().doctor.clone()
        }

        async fn fetch_job_status(
            &self,
            job_id: &str,
            environment: Option<&str>,
        ) -> Result<JobStatus, GatewayError> {
            self.record(GatewayCall::JobStatus {
                job_id: job_id.to_string(),
                environment: owned(environment),
            })
            .await;
            self.inner
                .lock()
                .job_statuses
                .pop_front()
                .unwrap_or_else(|| Ok(JobStatus::new(job_id, "running")))
        }
    }

    #[async_trait]
    impl GraphSource for FakeGateway {
        async fn fetch_snapshot(&self) -> Result<GraphSnapshot, GatewayError> {
            self.record(GatewayCall::GraphSnapshot).await;
            self.inner.lock().snapshots.pop_front().unwrap_or_else(|| Ok(GraphSnapshot::default()))
        }
    }

    #[async_trait]
    impl AssistantAdapter for FakeGateway {
        async fn advise(
            &self,
            node: &Node,
            prompt: Option<&str>,
        ) -> Result<AssistantAdvice, GatewayError> {
            self.record(GatewayCall::Advise { node: node.key.clone(), prompt: owned(prompt) }).await;
            self.inner.lock().advice.clone()
        }
    }

    #[async_trait]
    impl GraphMutator for FakeGateway {
        async fn create_node(
            &self,
            request: &NodeCreationRequest,
        ) -> Result<ScaffoldGeneration, GatewayError> {
            self.record(GatewayCall::CreateNode(request.clone())).await;
            self.inner.lock().generation.clone()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGateway, GatewayCall};

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
