use crate::common::file::{FileSpec, write_file};
use crate::common::temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";

#[fixture]
pub fn repository_dir() -> TempDir {
    temp_dir()
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_plumb_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed once
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        dir.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_plumb_command(dir, &["add", "."]).assert().success();
    plumb_commit(dir, "Initial commit").assert().success();

    init_repository_dir
}

#[fixture]
pub fn repository_with_multiple_commits(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();

    for (index, message) in ["First commit", "Second commit", "Third commit"]
        .iter()
        .enumerate()
    {
        write_file(FileSpec::new(
            dir.join(format!("file{}.txt", index + 1)),
            format!("content {}", index + 1),
        ));
        run_plumb_command(dir, &["add", "."]).assert().success();
        plumb_commit(dir, message).assert().success();
    }

    init_repository_dir
}

pub fn run_plumb_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("plumb").expect("Failed to find plumb binary");
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn plumb_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_plumb_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", AUTHOR_NAME),
        ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

/// Get the commit the current branch points at
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".git").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    // HEAD file contains either a commit SHA or a ref like "ref: refs/heads/master"
    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let ref_file = dir.join(".git").join(ref_path.trim());
        let commit_sha = std::fs::read_to_string(ref_file)?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}
