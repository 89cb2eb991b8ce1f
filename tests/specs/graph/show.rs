//! `lc graph` specs

use crate::prelude::*;

pub fn snapshot() -> serde_json::Value {
    json!({
        "routes": [{"path": "/api/posts", "methods": ["GET", "POST"]}],
        "dependencies": {
            "background_workers": [{"name": "mailer", "command": "worker mailer", "tags": ["email"]}],
            "scheduler_jobs": [{
                "name": "cleanup",
                "command": "task cleanup",
                "schedule": "0 * * * *",
                "run_on_start": true,
                "shell": false
            }],
            "tasks": [{"name": "seed", "description": "Seed data"}]
        },
        "health": {"ok": true}
    })
}

#[test]
fn graph_prints_sections_and_statistics() {
    let backend = Backend::start().get("/__loco/graph", snapshot());

    cli().backend(&backend).args(&["graph"]).passes().stdout_eq(
        "Application  All health checks are passing\n\
         routes: 1  background workers: 1  scheduler jobs: 1  tasks: 1\n\
         \n\
         Routes\n  route:0:/api/posts  GET, POST\n\
         \n\
         Background workers\n  background_worker:0:mailer  worker mailer [email]\n\
         \n\
         Scheduler jobs\n  scheduler_job:0:cleanup  0 * * * *  task cleanup  (run on start)\n\
         \n\
         Tasks\n  task:0:seed  Seed data\n",
    );
}

#[test]
fn graph_json_is_the_view_model() {
    let backend = Backend::start().get("/__loco/graph", snapshot());

    let run = cli().backend(&backend).args(&["graph", "-o", "json"]).passes();

    let view = run.stdout_json();
    assert_eq!(view["nodes"].as_array().map(Vec::len), Some(5));
    assert_eq!(view["edges"].as_array().map(Vec::len), Some(4));
    assert_eq!(view["statistics"], json!({"route": 1, "background_worker": 1, "scheduler_job": 1, "task": 1}));
    assert_eq!(view["edges"][0]["source"], "application");
}

#[test]
fn missing_health_falls_back_to_health_endpoint() {
    let backend = Backend::start()
        .get("/__loco/graph", json!({"routes": []}))
        .get("/_health", json!({"ok": false, "details": {"db": "down"}}));

    cli()
        .backend(&backend)
        .args(&["graph"])
        .passes()
        .stdout_has("Application  Health checks are reporting problems");

    assert_eq!(backend.requests_to("/_health").len(), 1);
}

#[test]
fn unavailable_graph_fails() {
    let backend = Backend::start().route("GET", "/__loco/graph", 503, "maintenance".into());

    cli()
        .backend(&backend)
        .args(&["graph"])
        .fails()
        .stderr_has("failed to load graph: HTTP 503: maintenance");
}
