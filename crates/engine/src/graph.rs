// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Graph explorer: snapshot refresh into a shared view-model, and node
//! creation through the backend's scaffold generator.

use crate::error::ConsoleError;
use lc_adapters::{GatewayError, GraphMutator, GraphSource, NodeCreationRequest, ScaffoldGeneration};
use lc_core::{to_view_model, ViewModel};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Published explorer state
#[derive(Debug, Clone, Default)]
pub struct GraphState {
    /// Latest successfully built view-model
    pub view: Option<Arc<ViewModel>>,
    pub last_error: Option<String>,
}

struct Tracked {
    published: GraphState,
    /// Ticket of the newest refresh applied so far
    applied: u64,
}

/// Keeps the latest view-model for a [`GraphSource`].
///
/// Each refresh rebuilds the view-model wholesale. A failed refresh keeps
/// the previous view-model and records the error. Overlapping refreshes are
/// ordered by when they started: a refresh finishing after a newer one has
/// been applied leaves the state untouched.
pub struct GraphExplorer<S> {
    source: S,
    tickets: AtomicU64,
    state: Mutex<Tracked>,
    notify: watch::Sender<GraphState>,
}

impl<S: GraphSource> GraphExplorer<S> {
    pub fn new(source: S) -> Self {
        let (notify, _) = watch::channel(GraphState::default());
        Self {
            source,
            tickets: AtomicU64::new(0),
            state: Mutex::new(Tracked { published: GraphState::default(), applied: 0 }),
            notify,
        }
    }

    /// Fetch a snapshot and rebuild the view-model. The caller always gets
    /// this refresh's own outcome, even when it was too stale to publish.
    pub async fn refresh(&self) -> Result<Arc<ViewModel>, GatewayError> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = self.source.fetch_snapshot().await.map(|snapshot| Arc::new(to_view_model(&snapshot)));
        self.apply(ticket, &outcome);
        outcome
    }

    fn apply(&self, ticket: u64, outcome: &Result<Arc<ViewModel>, GatewayError>) {
        let mut tracked = self.state.lock();
        if ticket < tracked.applied {
            tracing::debug!(ticket, applied = tracked.applied, "discarding stale graph refresh");
            return;
        }
        tracked.applied = ticket;
        let state = &mut tracked.published;
        match outcome {
            Ok(view) => {
                tracing::info!(
                    nodes = view.nodes.len(),
                    edges = view.edges.len(),
                    "graph refreshed"
                );
                state.view = Some(Arc::clone(view));
                state.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "graph refresh failed");
                state.last_error = Some(e.to_string());
            }
        }
        self.notify.send_replace(state.clone());
    }

    pub fn view(&self) -> Option<Arc<ViewModel>> {
        self.state.lock().published.view.clone()
    }

    pub fn state(&self) -> GraphState {
        self.state.lock().published.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GraphState> {
        self.notify.subscribe()
    }
}

impl<S: GraphSource + GraphMutator> GraphExplorer<S> {
    /// Ask the backend to generate a node, then refresh so it shows up.
    ///
    /// The name is trimmed and must be non-empty (the scheduler has none).
    /// A failed follow-up refresh is recorded in the state but does not
    /// fail the creation.
    pub async fn create_node(&self, request: &NodeCreationRequest) -> Result<ScaffoldGeneration, ConsoleError> {
        let request = request
            .normalized()
            .ok_or_else(|| ConsoleError::InvalidRequest(format!("{} name is required", request.component())))?;

        let generation = self.source.create_node(&request).await?;
        tracing::info!(component = request.component(), name = request.name(), "graph node created");

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "graph refresh after node creation failed");
        }
        Ok(generation)
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
