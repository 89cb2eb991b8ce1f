//! CLI help output specs

use crate::prelude::*;

#[test]
fn lc_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn lc_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("graph")
        .stdout_has("explain")
        .stdout_has("generators")
        .stdout_has("tasks")
        .stdout_has("generate")
        .stdout_has("doctor")
        .stdout_has("job");
}

#[test]
fn lc_task_help_shows_param_flag() {
    cli().args(&["task", "--help"]).passes().stdout_has("--param");
}

#[test]
fn lc_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unreachable_backend_fails_with_connect_error() {
    // Nothing listens on port 9 on loopback
    cli()
        .env("LC_BASE_URL", "http://127.0.0.1:9")
        .args(&["generators"])
        .fails()
        .stderr_has("failed to load commands");
}

#[test]
fn https_url_is_rejected() {
    cli().args(&["--url", "https://example.com", "tasks"]).fails().stderr_has("https");
}
