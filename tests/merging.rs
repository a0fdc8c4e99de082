use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::{
    branch_tip, file_exists, init_repository_dir, read_file, run_gitlet_command,
    run_gitlet_stdout, write_file,
};

#[rstest]
fn fast_forward_merge_advances_the_branch_without_a_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "c1.txt", "one\n");
    run_gitlet_command(dir, &["add", "c1.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "c1"]).assert().success();

    run_gitlet_command(dir, &["branch", "feat"]).assert().success();
    run_gitlet_command(dir, &["checkout", "feat"]).assert().success();

    write_file(dir, "c2.txt", "two\n");
    run_gitlet_command(dir, &["add", "c2.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "c2"]).assert().success();
    let feat_tip = branch_tip(dir, "feat");

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    run_gitlet_command(dir, &["merge", "feat"])
        .assert()
        .success()
        .stdout("Current branch fast-forwarded.\n");

    assert_eq!(branch_tip(dir, "master"), feat_tip);
    assert!(file_exists(dir, "c2.txt"));

    let log = run_gitlet_stdout(dir, &["log"]);
    assert_eq!(log.matches("===\n").count(), 3);
    assert!(!log.contains("Merge:"));
}

#[rstest]
fn merging_an_ancestor_branch_is_a_no_op(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "a.txt", "1\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "base"]).assert().success();

    run_gitlet_command(dir, &["branch", "old"]).assert().success();

    write_file(dir, "a.txt", "2\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "ahead"]).assert().success();
    let master_tip = branch_tip(dir, "master");

    run_gitlet_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout("Given branch is an ancestor of the current branch.\n");

    assert_eq!(branch_tip(dir, "master"), master_tip);
}

#[rstest]
fn conflicting_changes_produce_the_bracketed_payload(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "f.txt", "x\n");
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "base"]).assert().success();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    write_file(dir, "f.txt", "y\n");
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "head change"]).assert().success();

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    write_file(dir, "f.txt", "z\n");
    run_gitlet_command(dir, &["add", "f.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "other change"]).assert().success();
    let other_tip = branch_tip(dir, "other");

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    let head_tip = branch_tip(dir, "master");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(dir, "f.txt"),
        "<<<<<<< HEAD\n\
         y\n\
         =======\n\
         z\n\
         >>>>>>>\n"
    );

    // the merge commit exists, with both parents in order
    let log = run_gitlet_stdout(dir, &["log"]);
    assert!(log.contains("Merged other into master."));
    assert!(log.contains(&format!(
        "Merge: {} {}",
        &head_tip[..7],
        &other_tip[..7]
    )));
}

#[rstest]
fn non_overlapping_changes_merge_cleanly(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "a.txt", "a1\n");
    write_file(dir, "b.txt", "b1\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["add", "b.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "base"]).assert().success();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    write_file(dir, "a.txt", "a2\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "head side"]).assert().success();

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    write_file(dir, "b.txt", "b2\n");
    write_file(dir, "c.txt", "c1\n");
    run_gitlet_command(dir, &["add", "b.txt"]).assert().success();
    run_gitlet_command(dir, &["add", "c.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "other side"]).assert().success();

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    // this side's change is kept, the other side's changes are taken
    assert_eq!(read_file(dir, "a.txt"), "a2\n");
    assert_eq!(read_file(dir, "b.txt"), "b2\n");
    assert_eq!(read_file(dir, "c.txt"), "c1\n");

    let log = run_gitlet_stdout(dir, &["log"]);
    assert!(log.contains("Merged other into master."));
    assert!(log.contains("Merge: "));
}

#[rstest]
fn a_deletion_on_the_other_side_is_carried_over(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "keep.txt", "keep\n");
    write_file(dir, "drop.txt", "drop\n");
    run_gitlet_command(dir, &["add", "keep.txt"]).assert().success();
    run_gitlet_command(dir, &["add", "drop.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "base"]).assert().success();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    write_file(dir, "keep.txt", "kept\n");
    run_gitlet_command(dir, &["add", "keep.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "head side"]).assert().success();

    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    run_gitlet_command(dir, &["rm", "drop.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "drop it"]).assert().success();

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    assert!(!file_exists(dir, "drop.txt"));
    assert_eq!(read_file(dir, "keep.txt"), "kept\n");
}

#[rstest]
fn merge_preconditions_are_checked_in_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "a.txt", "1\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "base"]).assert().success();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    // dirty staging wins over everything else
    write_file(dir, "a.txt", "2\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["merge", "ghost"])
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");

    // restore a clean staging area
    write_file(dir, "a.txt", "1\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();

    run_gitlet_command(dir, &["merge", "ghost"])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");

    run_gitlet_command(dir, &["merge", "master"])
        .assert()
        .success()
        .stdout("Cannot merge a branch with itself.\n");
}

#[rstest]
fn merge_aborts_when_an_untracked_file_is_in_the_way(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    write_file(dir, "a.txt", "1\n");
    run_gitlet_command(dir, &["add", "a.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "base"]).assert().success();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();

    write_file(dir, "b.txt", "theirs\n");
    run_gitlet_command(dir, &["add", "b.txt"]).assert().success();
    run_gitlet_command(dir, &["commit", "other b"]).assert().success();

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    write_file(dir, "b.txt", "mine\n");

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");
}
