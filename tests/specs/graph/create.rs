//! `lc graph create` specs

use crate::prelude::*;

const NODES: &str = "/__loco/graph/nodes";

fn backend() -> Backend {
    Backend::start()
        .post(NODES, json!({"message": "model post generated"}))
        .get("/__loco/graph", super::show::snapshot())
}

#[test]
fn create_posts_tagged_request_and_prints_message() {
    let backend = backend();

    cli()
        .backend(&backend)
        .args(&["graph", "create", "model", "  post ", "--field", "title:string", "--no-timestamps"])
        .passes()
        .stdout_eq("model post generated\n");

    let sent = backend.requests_to(NODES);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "POST");
    assert_eq!(
        sent[0].json(),
        json!({
            "component": "model",
            "name": "post",
            "with_timestamps": false,
            "fields": [{"name": "title", "data_type": "string"}],
        })
    );
}

#[test]
fn create_controller_sends_actions_and_interface() {
    let backend = backend();

    cli()
        .backend(&backend)
        .args(&["graph", "create", "controller", "pages", "-a", "home", "-a", "about", "--interface", "html"])
        .passes();

    assert_eq!(
        backend.requests_to(NODES)[0].json(),
        json!({"component": "controller", "name": "pages", "actions": ["home", "about"], "interface": "html"})
    );
}

#[test]
fn create_json_output_is_the_generation() {
    let backend = backend();

    let run = cli().backend(&backend).args(&["-o", "json", "graph", "create", "scheduler"]).passes();

    assert_eq!(run.stdout_json(), json!({"message": "model post generated"}));
    assert_eq!(backend.requests_to(NODES)[0].json(), json!({"component": "scheduler"}));
}

#[test]
fn blank_name_is_rejected_before_any_request() {
    let backend = backend();

    cli()
        .backend(&backend)
        .args(&["graph", "create", "worker", "   "])
        .fails()
        .stderr_has("failed to create worker: worker name is required");

    assert!(backend.requests().is_empty());
}

#[test]
fn invalid_field_is_rejected_before_any_request() {
    let backend = backend();

    cli()
        .backend(&backend)
        .args(&["graph", "create", "model", "post", "--field", "title"])
        .fails()
        .stderr_has("invalid field 'title': expected NAME:TYPE");

    assert!(backend.requests().is_empty());
}

#[test]
fn release_backend_without_the_endpoint_fails() {
    let backend = Backend::start().route("POST", NODES, 404, r#"{"error":"not_found"}"#.to_string());

    cli()
        .backend(&backend)
        .args(&["graph", "create", "task", "seed"])
        .fails()
        .stderr_has("failed to create task: HTTP 404: not_found");

    assert!(backend.requests_to("/__loco/graph").is_empty());
}
