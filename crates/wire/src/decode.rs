// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lenient decoding of response bodies.
//!
//! Bodies that are not the expected JSON become a [`DecodeError`] carrying
//! the raw text, never a panic. Listings and doctor output additionally
//! accept plain text.

use crate::listing::parse_listable_commands;
use lc_core::{ConsoleCommand, DoctorSnapshot};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

/// Longest raw excerpt kept in error messages
const RAW_EXCERPT_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected response ({message}): {}", excerpt(.raw))]
pub struct DecodeError {
    pub message: String,
    pub raw: String,
}

fn excerpt(raw: &str) -> &str {
    match raw.char_indices().nth(RAW_EXCERPT_LEN) {
        Some((end, _)) => &raw[..end],
        None => raw,
    }
}

/// Decode a JSON body into `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    serde_json::from_str(body)
        .map_err(|e| DecodeError { message: e.to_string(), raw: body.trim().to_string() })
}

/// Decode a command listing: a JSON array of `{command, summary}`, or
/// help-style plain text.
pub fn decode_commands(body: &str) -> Result<Vec<ConsoleCommand>, DecodeError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        decode(body)
    } else {
        Ok(parse_listable_commands(body))
    }
}

/// Decode a doctor snapshot. Textual stdout is parsed as JSON when possible
/// and otherwise wrapped as `{"raw": "<text>"}`.
pub fn decode_doctor(body: &str) -> Result<DoctorSnapshot, DecodeError> {
    let mut snapshot: DoctorSnapshot = decode(body)?;
    if let Value::String(text) = &snapshot.stdout {
        snapshot.stdout = serde_json::from_str::<Value>(text)
            .ok()
            .filter(|value| value.is_object() || value.is_array())
            .unwrap_or_else(|| json!({ "raw": text }));
    }
    Ok(snapshot)
}

/// Human-readable message from an error response body.
///
/// Understands `{"error": .., "description": ..}` and `{"message": ..}`
/// bodies; anything else is returned trimmed.
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };
    let field = |name: &str| map.get(name).and_then(Value::as_str).filter(|s| !s.is_empty());
    match (field("error"), field("description").or_else(|| field("message"))) {
        (Some(error), Some(detail)) => format!("{error}: {detail}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => trimmed.to_string(),
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
