use crate::common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, committed_repository_dir, get_head_commit_sha,
    init_repository_dir, plumb_commit, repository_dir, repository_with_multiple_commits,
    run_plumb_command,
};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_the_metadata_layout(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_plumb_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Initialized empty repository in"));

    let git_dir = repository_dir.child(".git");
    assert!(git_dir.child("objects").path().is_dir());
    assert!(git_dir.child("refs/heads").path().is_dir());
    assert!(git_dir.child("index").path().is_file());
    assert_eq!(
        std::fs::read_to_string(git_dir.child("HEAD").path())?,
        "ref: refs/heads/master\n"
    );

    Ok(())
}

#[rstest]
fn init_accepts_a_target_path(repository_dir: TempDir) {
    run_plumb_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project"));

    assert!(repository_dir.child("nested/project/.git/HEAD").path().is_file());
}

#[rstest]
fn hash_object_prints_the_blob_id(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("hello.txt").write_str("hello\n")?;

    run_plumb_command(init_repository_dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout("ce013625030ba8dba906f756967f9e9ca394464a\n");
    assert!(
        !init_repository_dir
            .child(".git/objects/ce/013625030ba8dba906f756967f9e9ca394464a")
            .path()
            .exists()
    );

    run_plumb_command(init_repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?);
    assert!(
        init_repository_dir
            .child(".git/objects/ce/013625030ba8dba906f756967f9e9ca394464a")
            .path()
            .is_file()
    );

    Ok(())
}

#[rstest]
fn cat_file_prints_blob_content_and_kind(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("hello.txt").write_str("hello\n")?;
    run_plumb_command(init_repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();

    let oid = "ce013625030ba8dba906f756967f9e9ca394464a";
    run_plumb_command(init_repository_dir.path(), &["cat-file", "-p", oid])
        .assert()
        .success()
        .stdout("hello\n");
    run_plumb_command(init_repository_dir.path(), &["cat-file", "-t", oid])
        .assert()
        .success()
        .stdout("blob\n");

    Ok(())
}

#[rstest]
fn cat_file_of_a_missing_object_fails(init_repository_dir: TempDir) {
    run_plumb_command(
        init_repository_dir.path(),
        &["cat-file", "-p", "0123456789abcdef0123456789abcdef01234567"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[rstest]
fn cat_file_rejects_a_malformed_id(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["cat-file", "-t", "xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[rstest]
fn first_commit_is_a_root_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("alpha\n")?;
    run_plumb_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    plumb_commit(init_repository_dir.path(), "Initial commit\n\nWith a body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[master \(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?);

    let head = get_head_commit_sha(init_repository_dir.path())?;
    assert_eq!(head.len(), 40);

    Ok(())
}

#[rstest]
fn commit_without_author_fails(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["commit", "-m", "nobody"])
        .env_remove("GIT_AUTHOR_NAME")
        .env_remove("GIT_AUTHOR_EMAIL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GIT_AUTHOR_NAME"));
}

#[rstest]
fn ls_tree_lists_flat_entries(committed_repository_dir: TempDir) {
    let stdout = run_plumb_command(committed_repository_dir.path(), &["ls-tree", "HEAD"])
        .output()
        .expect("Failed to run ls-tree")
        .stdout;
    let stdout = String::from_utf8(stdout).expect("ls-tree output is UTF-8");

    let names = stdout
        .lines()
        .map(|line| {
            let (meta, name) = line.split_once('\t').expect("entry has a tab");
            assert!(meta.starts_with("100644 blob "));
            name.to_string()
        })
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["1.txt", "a/2.txt", "a/b/3.txt"]);
}

#[rstest]
fn log_walks_history_newest_first(repository_with_multiple_commits: TempDir) {
    let stdout = run_plumb_command(repository_with_multiple_commits.path(), &["log"])
        .output()
        .expect("Failed to run log")
        .stdout;
    let stdout = String::from_utf8(stdout).expect("log output is UTF-8");

    let messages = stdout
        .lines()
        .filter_map(|line| line.strip_prefix("    "))
        .collect::<Vec<_>>();
    assert_eq!(messages, vec!["Third commit", "Second commit", "First commit"]);
    assert_eq!(
        stdout.matches(&format!("Author: {AUTHOR_NAME} <{AUTHOR_EMAIL}>")).count(),
        3
    );
    assert!(stdout.contains("Date:   Sun Jan 1 12:00:00 2023 +0000"));
}

#[rstest]
fn log_from_a_specific_commit(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();
    let head = get_head_commit_sha(dir)?;

    run_plumb_command(dir, &["log", &head])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {head}")));

    Ok(())
}

#[rstest]
fn log_without_commits_fails(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have any commits yet"));
}

#[rstest]
fn checkout_into_a_directory_restores_files(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let head = get_head_commit_sha(dir)?;
    let index_before = std::fs::read(dir.join(".git/index"))?;

    run_plumb_command(dir, &["checkout", &head, "--into", "restored"])
        .assert()
        .success();

    let restored = committed_repository_dir.child("restored");
    assert_eq!(std::fs::read_to_string(restored.child("1.txt").path())?, "one");
    assert_eq!(std::fs::read_to_string(restored.child("a/2.txt").path())?, "two");
    assert_eq!(
        std::fs::read_to_string(restored.child("a/b/3.txt").path())?,
        "three"
    );
    assert_eq!(get_head_commit_sha(dir)?, head);
    assert_eq!(std::fs::read(dir.join(".git/index"))?, index_before);

    Ok(())
}

#[rstest]
fn checkout_overwrites_modified_worktree_files(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    committed_repository_dir.child("1.txt").write_str("changed")?;

    run_plumb_command(committed_repository_dir.path(), &["checkout", "HEAD"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(committed_repository_dir.child("1.txt").path())?,
        "one"
    );

    Ok(())
}

#[rstest]
fn adding_a_missing_file_fails(init_repository_dir: TempDir) {
    run_plumb_command(init_repository_dir.path(), &["add", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
