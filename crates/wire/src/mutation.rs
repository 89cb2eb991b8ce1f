// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Body and result of `POST /__loco/graph/nodes`.

use serde::{Deserialize, Serialize};

/// One `name:type` attribute of a model, migration or scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub data_type: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self { name: name.into(), data_type: data_type.into() }
    }

    /// Parse `name:type`. Both sides are trimmed and must be non-empty.
    pub fn parse(text: &str) -> Option<Self> {
        let (name, data_type) = text.split_once(':')?;
        let (name, data_type) = (name.trim(), data_type.trim());
        if name.is_empty() || data_type.is_empty() {
            return None;
        }
        Some(Self::new(name, data_type))
    }
}

/// Presentation style of generated controllers and scaffolds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodePresentation {
    Htmx,
    Html,
    #[default]
    Api,
}

/// A graph node to generate, tagged by `component`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "snake_case")]
pub enum NodeCreationRequest {
    Model {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        with_timestamps: Option<bool>,
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
    Migration {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        with_timestamps: Option<bool>,
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
    Scaffold {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        with_timestamps: Option<bool>,
        #[serde(default)]
        fields: Vec<FieldDefinition>,
        interface: NodePresentation,
    },
    Controller {
        name: String,
        #[serde(default)]
        actions: Vec<String>,
        interface: NodePresentation,
    },
    Task {
        name: String,
    },
    Scheduler {},
    Worker {
        name: String,
    },
    Mailer {
        name: String,
    },
    Data {
        name: String,
    },
}

impl NodeCreationRequest {
    /// Component tag as sent on the wire
    pub fn component(&self) -> &'static str {
        match self {
            Self::Model { .. } => "model",
            Self::Migration { .. } => "migration",
            Self::Scaffold { .. } => "scaffold",
            Self::Controller { .. } => "controller",
            Self::Task { .. } => "task",
            Self::Scheduler {} => "scheduler",
            Self::Worker { .. } => "worker",
            Self::Mailer { .. } => "mailer",
            Self::Data { .. } => "data",
        }
    }

    /// The component name; the scheduler has none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Model { name, .. }
            | Self::Migration { name, .. }
            | Self::Scaffold { name, .. }
            | Self::Controller { name, .. }
            | Self::Task { name }
            | Self::Worker { name }
            | Self::Mailer { name }
            | Self::Data { name } => Some(name),
            Self::Scheduler {} => None,
        }
    }

    pub(crate) fn name_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Model { name, .. }
            | Self::Migration { name, .. }
            | Self::Scaffold { name, .. }
            | Self::Controller { name, .. }
            | Self::Task { name }
            | Self::Worker { name }
            | Self::Mailer { name }
            | Self::Data { name } => Some(name),
            Self::Scheduler {} => None,
        }
    }

    /// Copy with the name trimmed, or `None` when a required name is blank.
    pub fn normalized(&self) -> Option<Self> {
        let mut request = self.clone();
        if let Some(name) = request.name_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return None;
            }
        }
        Some(request)
    }
}

/// Outcome reported by the backend's scaffold generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldGeneration {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
