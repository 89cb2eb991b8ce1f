// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use lc_adapters::GatewayError;
use thiserror::Error;

/// Errors from console operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Rejected before reaching the backend
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
