use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::{
    init_repository_dir, log_commit_ids, run_gitlet_command, run_gitlet_stdout, write_file,
};

const CLEAN_STATUS: &str = "=== Branches ===\n\
     *master\n\
     \n\
     === Staged Files ===\n\
     \n\
     === Removed Files ===\n\
     \n\
     === Modifications Not Staged For Commit ===\n\
     \n\
     === Untracked Files ===\n\
     \n";

#[rstest]
fn basic_lifecycle_from_init_to_log(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "hello.txt", "A\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    run_gitlet_command(dir, &["commit", "first"])
        .assert()
        .success();

    write_file(dir, "hello.txt", "B\n");
    let status = run_gitlet_stdout(dir, &["status"]);
    assert!(status.contains("=== Modifications Not Staged For Commit ===\nhello.txt (modified)\n"));

    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    run_gitlet_command(dir, &["commit", "second"])
        .assert()
        .success();

    let log = run_gitlet_stdout(dir, &["log"]);
    assert_eq!(log.matches("===\n").count(), 3);

    let second = log.find("second").expect("second commit missing from log");
    let first = log.find("first").expect("first commit missing from log");
    let initial = log
        .find("initial commit")
        .expect("initial commit missing from log");
    assert!(second < first && first < initial);
}

#[rstest]
fn status_reports_a_modified_file_exactly(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "hello.txt", "A\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    run_gitlet_command(dir, &["commit", "first"])
        .assert()
        .success();
    write_file(dir, "hello.txt", "B\n");

    let status = run_gitlet_stdout(dir, &["status"]);

    assert_eq!(
        status,
        "=== Branches ===\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         hello.txt (modified)\n\
         \n\
         === Untracked Files ===\n\
         \n"
    );
}

#[rstest]
fn status_reports_staged_and_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "staged.txt", "content\n");
    write_file(dir, "untracked.txt", "content\n");
    run_gitlet_command(dir, &["add", "staged.txt"])
        .assert()
        .success();

    let status = run_gitlet_stdout(dir, &["status"]);

    assert!(status.contains("=== Staged Files ===\nstaged.txt\n"));
    assert!(status.contains("=== Untracked Files ===\nuntracked.txt\n"));
}

#[rstest]
fn adding_twice_is_equivalent_to_adding_once(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "hello.txt", "A\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    let index_after_first = std::fs::read(dir.join(".gitlet").join("index")).unwrap();
    let status_after_first = run_gitlet_stdout(dir, &["status"]);

    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    let index_after_second = std::fs::read(dir.join(".gitlet").join("index")).unwrap();
    let status_after_second = run_gitlet_stdout(dir, &["status"]);

    assert_eq!(index_after_first, index_after_second);
    assert_eq!(status_after_first, status_after_second);
}

#[rstest]
fn re_adding_the_tracked_content_reverts_the_staging(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "hello.txt", "A\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    run_gitlet_command(dir, &["commit", "first"])
        .assert()
        .success();

    // stage a modification, then restore the tracked content and re-add
    write_file(dir, "hello.txt", "B\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    write_file(dir, "hello.txt", "A\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();

    assert_eq!(run_gitlet_stdout(dir, &["status"]), CLEAN_STATUS);
}

#[rstest]
fn committing_without_changes_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "hello.txt", "A\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();
    run_gitlet_command(dir, &["commit", "first"])
        .assert()
        .success();

    run_gitlet_command(dir, &["commit", "second"])
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
}

#[rstest]
fn committing_with_an_empty_message_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "hello.txt", "A\n");
    run_gitlet_command(dir, &["add", "hello.txt"])
        .assert()
        .success();

    run_gitlet_command(dir, &["commit", ""])
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");
}

#[rstest]
fn adding_a_missing_file_is_rejected(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["add", "absent.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn log_starts_with_the_initial_commit_after_init(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    let log = run_gitlet_stdout(dir, &["log"]);

    assert_eq!(log.matches("===\n").count(), 1);
    assert!(log.contains("initial commit"));
    assert_eq!(log_commit_ids(dir).len(), 1);
}
