use crate::common::command::{head_commit_id, init_repository_dir, lit_commit, run_lit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

fn commit_file(dir: &std::path::Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_lit_command(dir, &["add", name]).assert().success();
    lit_commit(dir, message).assert().success();
}

#[rstest]
fn log_lists_commits_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "a\n", "first");
    commit_file(dir.path(), "b.txt", "b\n", "second");

    let output = run_lit_command(dir.path(), &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let second_pos = stdout.find("second").unwrap();
    let first_pos = stdout.find("first").unwrap();
    let root_pos = stdout.find("initial commit").unwrap();
    assert!(second_pos < first_pos && first_pos < root_pos);
}

#[rstest]
fn log_follows_only_the_first_parent(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "base.txt", "base\n", "base");

    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "feature.txt", "f\n", "feature work");
    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir.path(), "master.txt", "m\n", "master work");
    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success();

    run_lit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged feature into master."))
        .stdout(predicate::str::contains("Merge: "))
        .stdout(predicate::str::contains("master work"))
        .stdout(predicate::str::contains("feature work").not());
}

#[rstest]
fn global_log_includes_commits_from_every_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "base.txt", "base\n", "base");

    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "feature.txt", "f\n", "feature work");
    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();

    run_lit_command(dir.path(), &["global-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base"))
        .stdout(predicate::str::contains("feature work"))
        .stdout(predicate::str::contains("initial commit"));
}

#[rstest]
fn find_prints_the_ids_of_matching_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "a\n", "the message");
    let wanted = head_commit_id(dir.path());
    commit_file(dir.path(), "b.txt", "b\n", "another message");

    run_lit_command(dir.path(), &["find", "the message"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&wanted));
}

#[rstest]
fn find_requires_an_exact_message_match(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "a\n", "the message");

    run_lit_command(dir.path(), &["find", "the"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Found no commit with that message.",
        ));
}

#[rstest]
fn status_shows_branches_staged_and_untracked_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    run_lit_command(dir.path(), &["branch", "other-branch"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.path().join("wug.txt"), "wug\n".to_string()));
    run_lit_command(dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("random.stuff"),
        "noise\n".to_string(),
    ));

    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Branches ===\n*master\nother-branch\n",
        ))
        .stdout(predicate::str::contains("=== Staged Files ===\nwug.txt\n"))
        .stdout(predicate::str::contains(
            "=== Untracked Files ===\nrandom.stuff\n",
        ));
}

#[rstest]
fn status_reports_unstaged_modifications_and_deletions(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "kept.txt", "kept\n", "base");
    commit_file(dir.path(), "edited.txt", "v1\n", "more");

    write_file(FileSpec::new(
        dir.path().join("edited.txt"),
        "v2\n".to_string(),
    ));
    std::fs::remove_file(dir.path().join("kept.txt")).unwrap();

    run_lit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edited.txt (modified)"))
        .stdout(predicate::str::contains("kept.txt (deleted)"));
}
