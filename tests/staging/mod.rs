use crate::common::command::{init_repository_dir, lit_commit, run_lit_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn add_then_commit_records_the_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));

    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    lit_commit(dir.path(), "add wug").assert().success();

    run_lit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add wug"));
    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));
}

#[rstest]
fn adding_a_missing_file_fails(init_repository_dir: TempDir) {
    run_lit_command(init_repository_dir.path(), &["add", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist."));
}

#[rstest]
fn committing_without_staged_changes_fails(init_repository_dir: TempDir) {
    lit_commit(init_repository_dir.path(), "empty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn committing_with_an_empty_message_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();

    lit_commit(dir.path(), "")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a commit message."));
}

#[rstest]
fn staging_unchanged_tracked_content_is_a_no_op(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    lit_commit(dir.path(), "add wug").assert().success();

    // modify, stage, then restore the committed content and stage again
    write_file(FileSpec::new(
        dir.path().join("wug.txt"),
        "changed\n".to_string(),
    ));
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();

    lit_commit(dir.path(), "nothing left")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn rm_deletes_a_tracked_file_and_stages_the_removal(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    lit_commit(dir.path(), "add wug").assert().success();

    run_lit_command(dir.path(), &["rm", "wug.txt"])
        .assert()
        .success();

    assert!(!dir.path().join("wug.txt").exists());
    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\nwug.txt"));

    lit_commit(dir.path(), "remove wug").assert().success();
    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ===\n\n"));
}

#[rstest]
fn removing_an_untracked_file_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(
        dir.path().join("random.txt"),
        "stuff\n".to_string(),
    ));

    run_lit_command(dir.path(), &["rm", "random.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No reason to remove the file."));
}

#[rstest]
fn adding_a_removed_file_restores_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    lit_commit(dir.path(), "add wug").assert().success();

    run_lit_command(dir.path(), &["rm", "wug.txt"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join("wug.txt")), "wug\n");
    lit_commit(dir.path(), "nothing left")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No changes added to the commit."));
}

#[rstest]
fn files_in_nested_directories_are_tracked_by_relative_path(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(
        dir.path().join("a").join("b").join("deep.txt"),
        "deep\n".to_string(),
    ));

    run_lit_command(dir.path(), &["add", "a/b/deep.txt"])
        .assert()
        .success();
    lit_commit(dir.path(), "add deep").assert().success();

    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Untracked Files ===\n\n"));
}
