#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// An initialized repository with one committed file (`seed.txt`)
#[fixture]
pub fn seeded_repository_dir(init_repository_dir: TempDir) -> TempDir {
    use fake::Fake;
    use fake::faker::lorem::en::Words;

    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    write_file(init_repository_dir.path(), "seed.txt", &content);

    run_gitlet_command(init_repository_dir.path(), &["add", "seed.txt"])
        .assert()
        .success();
    run_gitlet_command(init_repository_dir.path(), &["commit", "seed commit"])
        .assert()
        .success();

    init_repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run a command expected to succeed and capture its stdout
pub fn run_gitlet_stdout(dir: &Path, args: &[&str]) -> String {
    let assertion = run_gitlet_command(dir, args).assert().success();
    let stdout = assertion.get_output().stdout.clone();

    String::from_utf8(stdout).expect("Command output is not valid UTF-8")
}

pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", name, e));
}

pub fn read_file(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name))
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", name, e))
}

pub fn delete_file(dir: &Path, name: &str) {
    std::fs::remove_file(dir.join(name))
        .unwrap_or_else(|e| panic!("Failed to delete file {:?}: {}", name, e));
}

pub fn file_exists(dir: &Path, name: &str) -> bool {
    dir.join(name).is_file()
}

/// Read the tip commit id of a branch straight from its ref file
pub fn branch_tip(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".gitlet").join("refs").join("heads").join(branch);

    std::fs::read_to_string(&ref_path)
        .unwrap_or_else(|e| panic!("Failed to read ref {:?}: {}", ref_path, e))
        .trim()
        .to_string()
}

/// Collect the commit ids printed by `log`, newest first
pub fn log_commit_ids(dir: &Path) -> Vec<String> {
    run_gitlet_stdout(dir, &["log"])
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .map(|id| id.to_string())
        .collect()
}
