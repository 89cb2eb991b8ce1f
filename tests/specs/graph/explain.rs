//! `lc explain` specs

use crate::prelude::*;

const ASSISTANT: &str = "/__loco/assistant";

fn backend() -> Backend {
    Backend::start().get("/__loco/graph", super::show::snapshot()).post(
        ASSISTANT,
        json!({"summary": "Mailer drains the email queue", "remediationTips": ["check SMTP credentials"]}),
    )
}

#[test]
fn explain_sends_node_and_prompt() {
    let backend = backend();

    cli()
        .backend(&backend)
        .args(&["explain", "background_worker:0:mailer", "--prompt", "  why is it slow?  "])
        .passes()
        .stdout_eq("Mailer drains the email queue\n  - check SMTP credentials\n");

    let body = backend.requests_to(ASSISTANT)[0].json();
    assert_eq!(body["node"]["key"], "background_worker:0:mailer");
    assert_eq!(body["node"]["payload"]["type"], "background_worker");
    assert_eq!(body["prompt"], "why is it slow?");
}

#[test]
fn unknown_node_fails_without_asking() {
    let backend = backend();

    cli()
        .backend(&backend)
        .args(&["explain", "task:9:nope"])
        .fails()
        .stderr_has("unknown node 'task:9:nope'");

    assert!(backend.requests_to(ASSISTANT).is_empty());
}
