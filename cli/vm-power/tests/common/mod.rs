// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for vm-power integration tests
//!
//! The binary is pointed at a wiremock server through `VM_POWER_ENDPOINT`
//! and authenticates with a static token, so no real credentials or
//! network are involved.

// Allow unused code - not every test file uses every helper
// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use std::process::Output;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROJECT: &str = "my-project";
pub const ZONE: &str = "asia-south1-a";
pub const INSTANCE: &str = "dev-backend-vm";

pub const INSTANCE_PATH: &str =
    "/compute/v1/projects/my-project/zones/asia-south1-a/instances/dev-backend-vm";

/// Variables that would leak the caller's environment into a test run
const SCRUBBED_ENV: &[&str] = &[
    "VM_POWER_PROFILE",
    "VM_POWER_PROJECT",
    "VM_POWER_ZONE",
    "VM_POWER_INSTANCE",
    "VM_POWER_ENDPOINT",
    "VM_POWER_TIMEOUT",
    "VM_POWER_CONFIG_DIR",
    "GOOGLE_OAUTH_ACCESS_TOKEN",
    "GOOGLE_APPLICATION_CREDENTIALS",
    "GCE_METADATA_HOST",
    "RUST_LOG",
];

/// Get a Command for running the vm-power binary with a clean environment
pub fn vm_power_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vm-power").expect("Failed to find vm-power binary");
    for key in SCRUBBED_ENV {
        cmd.env_remove(key);
    }
    cmd
}

/// A command aimed at `server` with the standard target and a static token
pub fn cmd_for_server(server: &MockServer, config_dir: &TempDir) -> Command {
    let mut cmd = vm_power_cmd();
    cmd.env("VM_POWER_ENDPOINT", server.uri())
        .env("VM_POWER_CONFIG_DIR", config_dir.path())
        .env("GOOGLE_OAUTH_ACCESS_TOKEN", "ya29.test")
        .args(["--project", PROJECT, "--zone", ZONE, "--instance", INSTANCE]);
    cmd
}

/// Run a command off the async runtime so the mock server keeps serving
pub async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute vm-power"))
        .await
        .expect("join blocking task")
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn instance_body(status: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "compute#instance",
        "name": INSTANCE,
        "status": status,
    })
}

pub fn operation_body(op_type: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "compute#operation",
        "name": format!("operation-{}", op_type),
        "operationType": op_type,
        "status": "PENDING",
    })
}

/// Answer status reads with `status`
pub async fn mount_status(server: &MockServer, status: &str) {
    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance_body(status)))
        .mount(server)
        .await;
}

/// Accept exactly `times` requests for `action`
pub async fn expect_action(server: &MockServer, action: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("{}/{}", INSTANCE_PATH, action)))
        .respond_with(ResponseTemplate::new(200).set_body_json(operation_body(action)))
        .expect(times)
        .mount(server)
        .await;
}

/// Fail the test if any start or stop request arrives
pub async fn forbid_mutations(server: &MockServer) {
    expect_action(server, "start", 0).await;
    expect_action(server, "stop", 0).await;
}
