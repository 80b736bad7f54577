//! Common test utilities for CLI integration tests.
//!
//! Every command runs against a temporary tree, a temporary type registry
//! and a temporary home directory, with `FSNS_*` variables cleared so the
//! developer's own configuration never leaks in.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads from the environment.
const FSNS_VARS: [&str; 9] = [
    "FSNS_HIDE_EXTENSIONS",
    "FSNS_SHOW_HIDDEN",
    "FSNS_SORT_COLUMN",
    "FSNS_REGISTRY",
    "FSNS_SIDECAR_NAME",
    "FSNS_SHORTCUT_EXTENSION",
    "FSNS_OUTPUT_FORMAT",
    "FSNS_DATA_DIR",
    "FSNS_LOG_MODE",
];

/// An isolated tree, registry and home directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Root of the tree under test.
    pub tree: PathBuf,
    /// The home directory handed to the binary.
    pub home: PathBuf,
    /// The registry database.
    pub registry: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with an empty tree.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let tree = temp_dir.path().join("tree");
        let home = temp_dir.path().join("home");
        std::fs::create_dir_all(&tree).expect("Failed to create tree");
        std::fs::create_dir_all(&home).expect("Failed to create home");
        let registry = temp_dir.path().join("registry.db");

        Self {
            temp_dir,
            tree,
            home,
            registry,
        }
    }

    /// The binary with a clean environment but no registry flag.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("fsns").expect("Failed to find fsns binary");
        for var in FSNS_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.home).current_dir(&self.tree);
        cmd
    }

    /// The binary pointed at this environment's registry.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--registry").arg(&self.registry);
        cmd
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.tree.join(relative)
    }

    /// Create a file (and its parents) inside the tree.
    pub fn create_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Create a directory (and its parents) inside the tree.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        std::fs::create_dir_all(&path).expect("Failed to create directory");
        path
    }

    /// Import a YAML registry snapshot.
    pub fn import_registry(&self, yaml: &str) {
        let file = self.home.join("snapshot.yaml");
        std::fs::write(&file, yaml).expect("Failed to write snapshot");
        self.command()
            .args(["--quiet", "registry", "import"])
            .arg(&file)
            .assert()
            .success();
    }

    /// Run a command and return its trimmed stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run fsns");
        assert!(
            output.status.success(),
            "fsns {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim_end()
            .to_string()
    }
}

/// Registry entries for a text type that always shows its extension.
#[allow(dead_code)]
pub const TEXT_TYPE: &str = r#"
keys:
  .txt: txtfile
  txtfile: Text Document
  'txtfile\AlwaysShowExt': ""
  'txtfile\DefaultIcon': "notepad.exe,1"
"#;

/// Path as the binary receives it.
#[allow(dead_code)]
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("non UTF-8 temp path")
}
