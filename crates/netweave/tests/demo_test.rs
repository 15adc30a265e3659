//! The shipped demo declarations must stay valid

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn test_peered_vpcs_demo_validates() {
    let mut cmd = Command::cargo_bin("weave").unwrap();
    cmd.arg("validate")
        .arg("--file")
        .arg(demo("peered-vpcs.kdl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("topology is valid"))
        .stdout(predicate::str::contains("instances: 3"));
}

#[test]
fn test_egress_variant_validates() {
    let mut cmd = Command::cargo_bin("weave").unwrap();
    cmd.arg("validate")
        .arg("--file")
        .arg(demo("peered-vpcs-egress.kdl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("topology is valid"));
}

#[test]
fn test_demo_outputs_expose_instance_ids() {
    let mut cmd = Command::cargo_bin("weave").unwrap();
    cmd.arg("outputs")
        .arg("--file")
        .arg(demo("peered-vpcs.kdl"))
        .assert()
        .success()
        .stdout(predicate::str::contains("app-network-id"))
        .stdout(predicate::str::contains("i-app-1"))
        .stdout(predicate::str::contains("i-edge-1"))
        .stdout(predicate::str::contains("i-app-2"));
}
