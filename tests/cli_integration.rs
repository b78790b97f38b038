use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn rusty_reclaim() -> Command {
    Command::cargo_bin("rusty-reclaim").unwrap()
}

/// A scratch home directory with its own config path.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = rusty_reclaim();
        cmd.env("HOME", self.home())
            .env_remove("XDG_DATA_HOME")
            .arg("--config")
            .arg(self.config())
            .arg("-q");
        cmd
    }
}

const MIB: usize = 1024 * 1024;

fn fill(path: &Path, mb: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![b'x'; mb * MIB]).unwrap();
}

#[test]
fn shows_help() {
    rusty_reclaim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reclaim disk space"));
}

#[test]
fn shows_version() {
    rusty_reclaim()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn requires_subcommand() {
    rusty_reclaim()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn folder_subcommand_help() {
    rusty_reclaim()
        .args(["folder", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan the subfolders"));
}

#[test]
fn tui_subcommand_help() {
    rusty_reclaim()
        .args(["tui", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--system"));
}

#[test]
fn folder_scan_prints_table_and_total() {
    let sandbox = Sandbox::new();
    let root = sandbox.home().join("projects");
    fill(&root.join("big/data.bin"), 3);
    fill(&root.join("small/data.bin"), 1);

    sandbox
        .cmd()
        .args(["folder", "-d", "1"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Subfolder"))
        .stdout(predicate::str::contains("big"))
        .stdout(predicate::str::contains("Total:"));
}

#[test]
fn folder_scan_json_applies_min_size() {
    let sandbox = Sandbox::new();
    let root = sandbox.home().join("projects");
    fill(&root.join("big/data.bin"), 3);
    fill(&root.join("small/data.bin"), 1);

    let output = sandbox
        .cmd()
        .args(["folder", "-d", "1", "--json", "--min-mb", "2"])
        .arg(&root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "big");
    assert_eq!(items[0]["category"], "Subfolder");
    let bytes = items[0]["size"]["bytes"].as_u64().unwrap();
    assert!(bytes >= 3 * MIB as u64 && bytes < 4 * MIB as u64);
}

#[test]
fn folder_scan_defaults_to_home() {
    let sandbox = Sandbox::new();
    fill(&sandbox.home().join("Downloads/iso.img"), 2);

    sandbox
        .cmd()
        .args(["folder", "-d", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Home Folder"));
}

#[test]
fn folder_scan_rejects_missing_dir() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["folder", "/nonexistent/rusty-reclaim-test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn unknown_size_filter_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["folder", "--filter", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown size filter"));
}

#[test]
fn invalid_config_fails() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.config(), "max_depth = 0\n").unwrap();
    sandbox.cmd().args(["classifiers"]).assert().failure();
}

#[test]
fn classifiers_list_shows_builtins() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["classifiers", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("python"))
        .stdout(predicate::str::contains("virtual_machines"));
}

#[test]
fn classifiers_disable_persists() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["classifiers", "disable", "nodejs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled classifier 'nodejs'"));

    let saved = fs::read_to_string(sandbox.config()).unwrap();
    assert!(saved.contains("nodejs = false"));
}

#[test]
fn classifiers_unknown_name_exits_2() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["classifiers", "enable", "cobol"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown classifier 'cobol'"));
    assert!(!sandbox.config().exists());
}

#[test]
fn trash_declined_keeps_file() {
    let sandbox = Sandbox::new();
    let file = sandbox.home().join("old.log");
    fs::write(&file, b"log line").unwrap();

    sandbox
        .cmd()
        .arg("trash")
        .arg(&file)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));
    assert!(file.exists());
}

#[test]
fn trash_refuses_home() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["trash"])
        .arg(sandbox.home())
        .write_stdin("y\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[y/N]").not())
        .stderr(predicate::str::contains("Refusing to modify critical"));
    assert!(sandbox.home().is_dir());
}

#[test]
fn trash_missing_path_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["trash", "--force", "/nonexistent/rusty-reclaim-test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn generates_completions() {
    rusty_reclaim()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rusty-reclaim"));
}
