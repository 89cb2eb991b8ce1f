//! `lc doctor` specs

use crate::prelude::*;

const DOCTOR: &str = "/__loco/cli/doctor/snapshot";

#[test]
fn doctor_forwards_every_flag() {
    let backend = Backend::start().post(DOCTOR, json!({"status": 0, "stdout": "{\"checks\":[]}", "stderr": ""}));

    cli()
        .backend(&backend)
        .args(&["doctor", "--production", "--graph"])
        .passes()
        .stdout_has("cargo loco doctor --production --graph");

    let body = backend.requests_to(DOCTOR)[0].json();
    assert_eq!(body, json!({"production": true, "config": false, "graph": true, "assistant": false}));
}

#[test]
fn json_stdout_is_kept_structured() {
    let backend = Backend::start()
        .post(DOCTOR, json!({"status": 0, "stdout": "{\"db\":\"ok\"}", "stderr": ""}));

    let run = cli().backend(&backend).args(&["doctor", "-o", "json"]).passes();

    assert_eq!(run.stdout_json()["stdout"], json!({"db": "ok"}));
}

#[test]
fn text_stdout_is_wrapped_as_raw() {
    let backend =
        Backend::start().post(DOCTOR, json!({"status": 0, "stdout": "all good", "stderr": ""}));

    let run = cli().backend(&backend).args(&["doctor", "-o", "json"]).passes();

    assert_eq!(run.stdout_json()["stdout"], json!({"raw": "all good"}));
}

#[test]
fn failed_checks_exit_with_doctor_status() {
    let backend = Backend::start()
        .post(DOCTOR, json!({"status": 3, "stdout": "", "stderr": "redis unreachable"}));

    let run = cli()
        .backend(&backend)
        .args(&["doctor", "--config"])
        .fails()
        .stdout_has("[error] cargo loco doctor --config (exit 3, ")
        .stderr_has("redis unreachable");
    assert_eq!(run.code(), Some(3));
}
