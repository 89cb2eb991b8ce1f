//! `lc generate` specs

use crate::prelude::*;

const RUN: &str = "/__loco/cli/generators/run";

#[test]
fn successful_generator_prints_status_and_output() {
    let backend =
        Backend::start().post(RUN, json!({"status": 0, "stdout": "added: src/models/post.rs\n", "stderr": ""}));

    cli()
        .backend(&backend)
        .args(&["generate", "model", "post", "title:string"])
        .passes()
        .stdout_has("[success] cargo loco generate model post title:string (exit 0, ")
        .stdout_has("added: src/models/post.rs");

    let sent = backend.requests_to(RUN);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "POST");
    assert_eq!(sent[0].json(), json!({"generator": "model", "arguments": ["post", "title:string"]}));
}

#[test]
fn generator_name_is_trimmed_and_environment_sent() {
    let backend = Backend::start().post(RUN, json!({"status": 0, "stdout": "", "stderr": ""}));

    cli()
        .backend(&backend)
        .env("LC_ENVIRONMENT", "test")
        .args(&["generate", "  controller  ", "posts"])
        .passes()
        .stdout_has("cargo loco generate controller posts --environment test");

    let body = backend.requests_to(RUN)[0].json();
    assert_eq!(body["generator"], "controller");
    assert_eq!(body["environment"], "test");
}

#[test]
fn non_zero_exit_becomes_process_exit_code() {
    let backend = Backend::start().post(RUN, json!({"status": 2, "stdout": "", "stderr": ""}));

    let run = cli()
        .backend(&backend)
        .args(&["generate", "model"])
        .fails()
        .stdout_has("[error]")
        .stderr_has("generator failed with exit code 2");
    assert_eq!(run.code(), Some(2));
}

#[test]
fn stderr_output_marks_run_as_failed() {
    let backend =
        Backend::start().post(RUN, json!({"status": 0, "stdout": "", "stderr": "error: model exists"}));

    let run = cli()
        .backend(&backend)
        .args(&["generate", "model", "post"])
        .fails()
        .stderr_has("error: model exists");
    assert_eq!(run.code(), Some(1));
}

#[test]
fn blank_generator_is_rejected_without_backend_call() {
    let backend = Backend::start();

    cli()
        .backend(&backend)
        .args(&["generate", "   "])
        .fails()
        .stderr_has("generator failed: generator is required");

    assert!(backend.requests().is_empty());
}

#[test]
fn json_output_prints_the_history_entry() {
    let backend = Backend::start().post(RUN, json!({"status": 0, "stdout": "ok", "stderr": ""}));

    let run = cli().backend(&backend).args(&["-o", "json", "generate", "model"]).passes();

    let entry = run.stdout_json();
    assert_eq!(entry["kind"], "generator");
    assert_eq!(entry["status"], "success");
    assert_eq!(entry["exit_code"], 0);
    assert_eq!(entry["stdout"], "ok");
}
