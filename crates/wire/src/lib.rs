// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP contract with the backend's introspection endpoints.
//!
//! Endpoint paths, request bodies, query encoding and lenient decoding of
//! response bodies. Transport lives in `lc-adapters`.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod decode;
mod listing;
mod mutation;
pub mod paths;
mod request;

pub use decode::{decode, decode_commands, decode_doctor, error_message, DecodeError};
pub use listing::parse_listable_commands;
pub use mutation::{FieldDefinition, NodeCreationRequest, NodePresentation, ScaffoldGeneration};
pub use request::{
    query_string, AssistantAdvice, AssistantRequest, DoctorSnapshotBody, GenerationBody,
    TaskRunBody,
};
