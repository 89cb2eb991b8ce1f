// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters between the console and the backend's HTTP surface

mod client;
mod gateway;
mod http;

pub use client::{HttpGateway, DEFAULT_TIMEOUT};
pub use gateway::{AssistantAdapter, BackendGateway, GatewayError, GraphMutator, GraphSource};
pub use lc_wire::{
    AssistantAdvice, FieldDefinition, NodeCreationRequest, NodePresentation, ScaffoldGeneration,
};

#[cfg(any(test, feature = "test-support"))]
pub use gateway::{FakeGateway, GatewayCall};
