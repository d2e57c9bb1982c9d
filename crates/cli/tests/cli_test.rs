use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "MODULE.bazel", "module(name = \"acme\")\n");
    write(
        root,
        "lake.yaml",
        "config:\n  language_defaults:\n    java:\n      group_id: com.acme.proto\n",
    );
    write(
        root,
        "users/bundle.yaml",
        "name: users\nconfig:\n  languages:\n    java:\n      enabled: true\n      artifact_id: users-proto\n",
    );
    write(root, "users/BUILD.bazel", "proto_library(name = \"users_proto\", srcs = [\"users.proto\"])\n");
    write(root, "users/users.proto", "syntax = \"proto3\";\n");
    temp_dir
}

#[test]
fn test_help() {
    Command::cargo_bin("protolake")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("index"));
}

#[test]
fn test_generate_starlark() {
    let repo = repo();
    Command::cargo_bin("protolake")
        .unwrap()
        .current_dir(repo.path())
        .args(["generate", "users"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("load(\"@rules_proto_grpc_java//:defs.bzl\""))
        .stdout(predicate::str::contains("java_proto_bundle(\n    name = \"users_java_bundle\","))
        .stdout(predicate::str::contains("\\\"${VERSION:-1.0.0}\\\""))
        .stdout(predicate::str::contains("build_validation(\n    name = \"all\","));
}

#[test]
fn test_generate_json() {
    let repo = repo();
    let output = Command::cargo_bin("protolake")
        .unwrap()
        .args(["generate", "--format", "json", "--repo-root"])
        .arg(repo.path())
        .arg(repo.path().join("users"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rules = rules.as_array().unwrap();
    assert_eq!(rules[0]["name"], "users_all_protos");
    assert_eq!(rules[2]["attrs"]["group_id"], "com.acme.proto");
}

#[test]
fn test_config_command() {
    let repo = repo();
    Command::cargo_bin("protolake")
        .unwrap()
        .current_dir(repo.path())
        .args(["config", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"artifact_id\": \"users-proto\""))
        .stdout(predicate::str::contains("\"group_id\": \"com.acme.proto\""));
}

#[test]
fn test_config_without_bundle_fails() {
    let repo = repo();
    fs::create_dir_all(repo.path().join("empty")).unwrap();
    Command::cargo_bin("protolake")
        .unwrap()
        .current_dir(repo.path())
        .args(["config", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No named bundle"));
}

#[test]
fn test_index_command() {
    let repo = repo();
    Command::cargo_bin("protolake")
        .unwrap()
        .current_dir(repo.path().join("users"))
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"users/users.proto\": \"//users:users_proto\""));
}
