use crate::common::command::{init_repository_dir, lit_commit, run_lit_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

fn commit_file(dir: &std::path::Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_lit_command(dir, &["add", name]).assert().success();
    lit_commit(dir, message).assert().success();
}

#[rstest]
fn branch_creates_a_pointer_without_switching(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Branches ===\nfeature\n*master\n"));
}

#[rstest]
fn creating_a_duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));
}

#[rstest]
fn rm_branch_deletes_the_pointer(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_lit_command(dir.path(), &["rm-branch", "feature"])
        .assert()
        .success();

    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Branches ===\n*master\n"));
}

#[rstest]
fn the_current_branch_cannot_be_removed(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove the current branch."));
}

#[rstest]
fn removing_an_unknown_branch_fails(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["rm-branch", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn checking_out_a_branch_swaps_the_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "shared.txt", "master version\n", "master commit");

    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "shared.txt", "feature version\n", "feature commit");

    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("shared.txt")), "master version\n");

    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.path().join("shared.txt")), "feature version\n");
}

#[rstest]
fn checkout_removes_files_the_target_does_not_track(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "master-only.txt", "m\n", "master only");

    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();

    assert!(!dir.path().join("master-only.txt").exists());
}

#[rstest]
fn checking_out_the_current_branch_fails(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No need to checkout the current branch.",
        ));
}

#[rstest]
fn checking_out_an_unknown_branch_fails(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["checkout", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such branch exists."));
}
