// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::time::Duration;

/// Version string shown by `lc --version`
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5150";

const DEFAULT_LOG_FILTER: &str = "warn";

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Backend base URL: `LC_BASE_URL` > default
pub fn base_url() -> String {
    non_empty("LC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Target environment (`LC_ENVIRONMENT`); unset means the backend default
pub fn environment() -> Option<String> {
    non_empty("LC_ENVIRONMENT")
}

/// HTTP transport timeout (default 10s, configurable via `LC_TIMEOUT_MS`)
pub fn timeout() -> Duration {
    std::env::var("LC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(lc_adapters::DEFAULT_TIMEOUT)
}

/// Tracing filter directives (`LC_LOG`, default `warn`)
pub fn log_filter() -> String {
    non_empty("LC_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
