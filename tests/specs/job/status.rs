//! `lc job` specs

use crate::prelude::*;

const STATUS: &str = "/__loco/cli/jobs/status";

#[test]
fn running_job_reports_running_and_succeeds() {
    let backend = Backend::start().get(STATUS, json!({"id": "42", "state": "running"}));

    cli()
        .backend(&backend)
        .args(&["job", "42"])
        .passes()
        .stdout_eq("[running] cargo loco jobs status 42\nrunning\n");

    assert_eq!(backend.requests_to(STATUS)[0].target, "/__loco/cli/jobs/status?job_id=42");
}

#[test]
fn wait_polls_until_the_job_completes() {
    let backend = Backend::start()
        .get(STATUS, json!({"id": "42", "state": "queued"}))
        .get(STATUS, json!({"id": "42", "state": "running"}))
        .get(STATUS, json!({"id": "42", "state": "completed", "result": {"status": 0, "stdout": "done"}}));

    cli()
        .backend(&backend)
        .args(&["job", "42", "--wait", "--interval-ms", "10"])
        .passes()
        .stdout_has("[success] cargo loco jobs status 42 (exit 0, ")
        .stdout_has("done")
        .stdout_lacks("queued");

    assert_eq!(backend.requests_to(STATUS).len(), 3);
}

#[test]
fn failed_job_exits_with_its_status() {
    let backend = Backend::start().get(
        STATUS,
        json!({"id": "7", "state": "failed", "result": {"status": 4, "stderr": "migration failed"}}),
    );

    let run = cli()
        .backend(&backend)
        .args(&["--environment", "production", "job", "7"])
        .fails()
        .stderr_has("job failed: migration failed");
    assert_eq!(run.code(), Some(4));

    assert_eq!(
        backend.requests_to(STATUS)[0].target,
        "/__loco/cli/jobs/status?job_id=7&environment=production"
    );
}

#[test]
fn job_error_without_result_fails() {
    let backend = Backend::start().get(STATUS, json!({"id": "9", "state": "unknown", "error": "job not found"}));

    cli().backend(&backend).args(&["job", "9"]).fails().stderr_has("job failed: job not found");
}

#[test]
fn blank_job_id_is_rejected() {
    let backend = Backend::start();

    cli().backend(&backend).args(&["job", "  "]).fails().stderr_has("job id is required");

    assert!(backend.requests().is_empty());
}
