//! Tests for the registry-backed commands: `registry`, `handler`, `icon`,
//! `bind`, `rename` and `devices`.

mod common;

use common::{arg, TestEnv, TEXT_TYPE};
use predicates::prelude::*;

const DROP_HANDLER: &str = "{0000ABCD-0000-0000-0000-000000000001}";
const FS_FOLDER: &str = "{F3364BA0-65B9-11CE-A9BA-00AA004AE837}";

#[test]
fn test_registry_set_unset_and_list() {
    let env = TestEnv::new();

    env.command()
        .args(["registry", "set", ".pdf", "pdffile"])
        .assert()
        .success();
    env.command()
        .args(["registry", "set", "pdffile", "PDF Document"])
        .assert()
        .success();

    let out = env.stdout_of(&["registry", "list"]);
    assert_eq!(out, ".pdf\tpdffile\npdffile\tPDF Document");

    env.command()
        .args(["registry", "unset", "PDFFILE"])
        .assert()
        .success();
    env.command()
        .args(["registry", "unset", "pdffile"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not set"));
}

#[test]
fn test_registry_import_reports_counts() {
    let env = TestEnv::new();
    let snapshot = env.home.join("types.yaml");
    std::fs::write(&snapshot, TEXT_TYPE).unwrap();

    env.command()
        .args(["registry", "import"])
        .arg(&snapshot)
        .assert()
        .success()
        .stderr(predicate::str::contains("Imported 4 keys and 0 blocked classes"));
}

#[test]
fn test_handler_found_missing_and_blocked() {
    let env = TestEnv::new();
    let file = env.create_file("scan.pdf", "%PDF");

    env.command()
        .args(["handler", arg(&file), "--kind", "drop"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No drop handler"));

    env.command()
        .args(["registry", "set", ".pdf\\shellex\\DropHandler", DROP_HANDLER])
        .assert()
        .success();
    env.command()
        .args(["handler", arg(&file), "--kind", "drop"])
        .assert()
        .success()
        .stdout(format!("{DROP_HANDLER}\n"));

    env.command()
        .args(["registry", "block", DROP_HANDLER])
        .assert()
        .success();
    env.command()
        .args(["handler", arg(&file), "--kind", "drop"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is blocked"));

    env.command()
        .args(["registry", "unblock", DROP_HANDLER])
        .assert()
        .success();
    env.command()
        .args(["handler", arg(&file), "--kind", "drop"])
        .assert()
        .success();
}

#[test]
fn test_icon_locations() {
    let env = TestEnv::new();
    env.import_registry(TEXT_TYPE);
    let file = env.create_file("readme.txt", "x");
    let dir = env.create_dir("plain");

    assert_eq!(env.stdout_of(&["icon", arg(&file)]), "notepad.exe,1");
    assert_eq!(env.stdout_of(&["icon", arg(&dir)]), "shell32.dll,-4");
}

#[test]
fn test_bind_folder_and_unbindable_file() {
    let env = TestEnv::new();
    let dir = env.create_dir("photos");
    let file = env.create_file("a.xyz", "");

    assert_eq!(
        env.stdout_of(&["bind", arg(&dir)]),
        format!("{FS_FOLDER}\t{}", dir.display())
    );

    env.command()
        .args(["bind", arg(&file)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bind target missing"));
}

#[test]
fn test_rename_keeps_hidden_extension() {
    let env = TestEnv::new();
    let draft = env.create_file("draft.md", "text");

    env.command()
        .args(["rename", arg(&draft), "final"])
        .assert()
        .success()
        .stdout("final.md\n");

    assert!(!draft.exists());
    assert!(env.path("final.md").exists());
}

#[test]
fn test_rename_rejects_separators() {
    let env = TestEnv::new();
    let draft = env.create_file("draft.md", "text");

    env.command()
        .args(["rename", arg(&draft), "../escape"])
        .assert()
        .code(4);
    assert!(draft.exists());
}

#[test]
fn test_devices_lists_interfaces_of_one_class() {
    let env = TestEnv::new();
    let class = "{4D36E967-E325-11CE-BFC1-08002BE10318}";
    env.create_file(&format!("devs/{class}/disk0"), "");
    env.create_file(&format!("devs/{class}/disk1"), "");
    env.create_dir("devs/{00000000-0000-0000-0000-000000000001}");

    let out = env.stdout_of(&["devices", arg(&env.path("devs")), "--class", class, "--open"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.starts_with(class)));
    assert!(out.contains("disk0"));
    assert!(out.contains("disk1"));

    env.command()
        .args(["devices", arg(&env.path("devs")), "--class", "{00000000-0000-0000-0000-000000000002}"])
        .assert()
        .success()
        .stdout("");
}
