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
    run_lit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_lit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("lit").expect("Failed to find lit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn lit_commit(dir: &Path, message: &str) -> Command {
    run_lit_command(dir, &["commit", message])
}

/// The full id of the current head commit, parsed from `lit log`
pub fn head_commit_id(dir: &Path) -> String {
    let output = run_lit_command(dir, &["log"])
        .output()
        .expect("Failed to run lit log");
    let stdout = String::from_utf8(output.stdout).expect("log output is not utf-8");

    stdout
        .lines()
        .find_map(|line| line.strip_prefix("commit "))
        .expect("No commit line in log output")
        .to_string()
}
