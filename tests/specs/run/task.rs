//! `lc task` specs

use crate::prelude::*;

const RUN: &str = "/__loco/cli/tasks/run";

#[test]
fn task_sends_arguments_and_params() {
    let backend = Backend::start().post(RUN, json!({"status": 0, "stdout": "seeded 3 users\n", "stderr": ""}));

    cli()
        .backend(&backend)
        .args(&["task", "seed_data", "-p", "alpha=one", "--param", " beta = two ", "users"])
        .passes()
        .stdout_has("[success] cargo loco task seed_data users alpha:one beta:two (exit 0, ")
        .stdout_has("seeded 3 users");

    let body = backend.requests_to(RUN)[0].json();
    assert_eq!(
        body,
        json!({"task": "seed_data", "arguments": ["users"], "params": {"alpha": "one", "beta": "two"}})
    );
}

#[test]
fn params_are_omitted_when_absent() {
    let backend = Backend::start().post(RUN, json!({"status": 0, "stdout": "", "stderr": ""}));

    cli().backend(&backend).args(&["task", "cleanup"]).passes();

    let body = backend.requests_to(RUN)[0].json();
    assert!(body.get("params").is_none());
    assert_eq!(body["arguments"], json!([]));
}

#[test]
fn malformed_param_is_rejected_locally() {
    let backend = Backend::start();

    cli()
        .backend(&backend)
        .args(&["task", "seed_data", "--param", "novalue"])
        .fails()
        .stderr_has("invalid param 'novalue'");

    assert!(backend.requests().is_empty());
}

#[test]
fn backend_failure_is_reported() {
    let backend = Backend::start().route(
        "POST",
        RUN,
        422,
        r#"{"error":"unprocessable","description":"task not allowed"}"#.into(),
    );

    let run = cli()
        .backend(&backend)
        .args(&["task", "drop_db"])
        .fails()
        .stderr_has("task failed: HTTP 422: unprocessable: task not allowed");
    assert_eq!(run.code(), Some(1));
}
