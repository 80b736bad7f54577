//! Tests for global flags, help output and the static commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_version_and_help() {
    let env = TestEnv::new();

    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fsns"));

    let help = env.command_bare().arg("--help").assert().success();
    let out = String::from_utf8(help.get_output().stdout.clone()).unwrap();
    for command in [
        "parse", "list", "attrs", "name", "bind", "handler", "icon", "rename", "columns",
        "registry", "devices", "completions",
    ] {
        assert!(out.contains(command), "help is missing {command}");
    }
}

#[test]
fn test_columns_table() {
    let env = TestEnv::new();

    let out = env.stdout_of(&["columns"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "INDEX\tKEY\tTITLE\tALIGN\tWIDTH\tTYPE\tDEFAULT");
    assert_eq!(lines[1], "0\tname\tName\tleft\t15\ttext\ton");
    assert!(lines[4].starts_with("3\tsize\tSize\tright"));
    assert!(lines[5].contains("\tdate\t"));
}

#[test]
fn test_completions_for_bash() {
    let env = TestEnv::new();

    env.command_bare()
        .args(["--quiet", "completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_fsns"))
        .stderr("");
}

#[test]
fn test_registry_flag_from_environment() {
    let env = TestEnv::new();

    env.command_bare()
        .env("FSNS_REGISTRY", &env.registry)
        .args(["registry", "set", ".md", "mdfile"])
        .assert()
        .success();

    assert!(env.registry.exists());
    assert_eq!(env.stdout_of(&["registry", "list"]), ".md\tmdfile");
}

#[test]
fn test_registry_path_from_config_file() {
    let env = TestEnv::new();
    let db = env.home.join("from-config.db");
    let config = env.home.join("extra.yaml");
    std::fs::write(&config, format!("registry_path: {}\n", db.display())).unwrap();

    env.command_bare()
        .arg("--config")
        .arg(&config)
        .args(["registry", "set", ".md", "mdfile"])
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let env = TestEnv::new();
    env.create_dir("sub");

    env.command()
        .args(["--verbose", "list", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG: using type registry"));
}
