//! `lc generators` / `lc tasks` specs

use crate::prelude::*;

fn catalog() -> Backend {
    Backend::start()
        .get(
            "/__loco/cli/generators",
            json!([
                {"command": "scaffold", "summary": "Generates a CRUD scaffold"},
                {"command": "model", "summary": "Generates a model"},
            ]),
        )
        .get("/__loco/cli/tasks", json!([{"command": "seed_data", "summary": "Seed the database"}]))
}

#[test]
fn generators_are_sorted_and_aligned() {
    let backend = catalog();

    cli()
        .backend(&backend)
        .args(&["generators"])
        .passes()
        .stdout_eq("model     Generates a model\nscaffold  Generates a CRUD scaffold\n");
}

#[test]
fn tasks_list_as_json() {
    let backend = catalog();

    let run = cli().backend(&backend).args(&["tasks", "-o", "json"]).passes();

    assert_eq!(run.stdout_json(), json!([{"command": "seed_data", "summary": "Seed the database"}]));
}

#[test]
fn environment_is_forwarded_as_query() {
    let backend = catalog();

    cli().backend(&backend).args(&["--environment", "staging", "tasks"]).passes();

    let listed = backend.requests_to("/__loco/cli/tasks");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].target, "/__loco/cli/tasks?environment=staging");
}

#[test]
fn plain_text_listing_is_accepted() {
    let backend = Backend::start()
        .route("GET", "/__loco/cli/generators", 200, "controller Generates a controller\n".into())
        .get("/__loco/cli/tasks", json!([]));

    cli().backend(&backend).args(&["generators"]).passes().stdout_has("controller  Generates a controller");
}

#[test]
fn backend_error_fails_the_listing() {
    let backend = Backend::start()
        .route("GET", "/__loco/cli/generators", 500, r#"{"error":"boom"}"#.into())
        .get("/__loco/cli/tasks", json!([]));

    cli()
        .backend(&backend)
        .args(&["generators"])
        .fails()
        .stderr_has("failed to load commands: HTTP 500: boom");
}
