//! End-to-end parsing and usage-error behavior of the `appadm` binary.
//!
//! Only paths that never reach the network are exercised here; handler
//! semantics against the service are covered by the unit tests with a mock
//! client.

use assert_cmd::Command;
use predicates::prelude::*;

fn appadm() -> Command {
    let mut cmd = Command::cargo_bin("appadm").unwrap();
    // keep the test hermetic even if the host has a config file
    cmd.env("APPADM_ENDPOINT", "http://localhost:1");
    cmd.env_remove("APPADM_APP_TYPE");
    cmd
}

#[test]
fn help_lists_entity_scopes() {
    appadm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("application"))
        .stdout(predicate::str::contains("attempt"))
        .stdout(predicate::str::contains("container"));
}

#[test]
fn application_help_lists_subcommands() {
    appadm()
        .args(["application", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("kill"))
        .stdout(predicate::str::contains("update-lifetime"))
        .stdout(predicate::str::contains("move-to-queue"));
}

#[test]
fn conflicting_upgrade_modes_are_a_usage_error() {
    appadm()
        .args([
            "application",
            "upgrade",
            "my-service",
            "--initiate",
            "spec.json",
            "--cancel",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn auto_finalize_outside_initiate_is_a_usage_error() {
    appadm()
        .args([
            "application",
            "upgrade",
            "my-service",
            "--cancel",
            "--auto-finalize",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn upgrade_without_a_mode_is_a_usage_error() {
    appadm()
        .args(["application", "upgrade", "my-service"])
        .assert()
        .code(2);
}

#[test]
fn unknown_flag_is_a_usage_error() {
    appadm()
        .args(["application", "kill", "app_1712000000000_0001", "--queue", "prod"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--queue"));
}

#[test]
fn kill_without_ids_is_a_usage_error() {
    appadm().args(["application", "kill"]).assert().code(2);
}

#[test]
fn unknown_state_is_rejected_before_any_request() {
    // the endpoint is unroutable, so reaching the network would not exit 255
    // with the valid-state listing
    appadm()
        .args(["application", "list", "--app-states", "SLEEPING"])
        .assert()
        .code(255)
        .stdout(predicate::str::contains("SLEEPING"))
        .stdout(predicate::str::contains("RUNNING"));
}

#[test]
fn name_status_without_type_fails_with_guidance() {
    appadm()
        .args(["application", "status", "my-web-service"])
        .assert()
        .code(255)
        .stdout(predicate::str::contains("--app-type"));
}

#[test]
fn upgrade_express_rejects_missing_spec_file() {
    appadm()
        .args([
            "application",
            "upgrade",
            "my-service",
            "--express",
            "/nonexistent/spec.json",
            "--app-type",
            "service",
        ])
        .assert()
        .code(255)
        .stdout(predicate::str::contains("/nonexistent/spec.json does not exist."));
}

#[test]
fn unreachable_endpoint_surfaces_a_transport_error() {
    let spec = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(spec.path(), b"{\"name\": \"my-service\"}").unwrap();
    appadm()
        .args(["application", "upgrade", "my-service", "--app-type", "service"])
        .arg("--express")
        .arg(spec.path())
        .assert()
        .code(255)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn entity_alias_app_works() {
    appadm()
        .args(["app", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status"));
}
