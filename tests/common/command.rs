use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn run_repodiff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("repodiff").expect("Failed to find repodiff binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Initialize a repository with its HEAD on `main`, ready to commit.
pub fn init_git_repository(dir: &Path) {
    run_git_command(dir, &["init", "--quiet"]).assert().success();
    run_git_command(dir, &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
    run_git_command(dir, &["config", "user.name", "repodiff-tests"])
        .assert()
        .success();
    run_git_command(dir, &["config", "user.email", "repodiff-tests@example.com"])
        .assert()
        .success();
    run_git_command(dir, &["config", "commit.gpgsign", "false"])
        .assert()
        .success();
}

pub fn git_commit_all(dir: &Path, message: &str) {
    run_git_command(dir, &["add", "."]).assert().success();
    run_git_command(dir, &["commit", "--quiet", "--allow-empty", "-m", message])
        .assert()
        .success();
}

/// Create `<root>/<name>` as a git repository with one commit on `main`
/// containing the given files.
pub fn create_repository(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", dir, e));

    init_git_repository(&dir);
    for (path, content) in files {
        write_file(FileSpec::new(dir.join(path), content.to_string()));
    }
    git_commit_all(&dir, "Initial commit");

    dir
}

/// Object id of a committed blob, via `git hash-object`.
pub fn blob_oid(repository: &Path, file: &str) -> String {
    let output = run_git_command(repository, &["hash-object", file])
        .output()
        .expect("Failed to run git hash-object");

    String::from_utf8(output.stdout)
        .expect("git hash-object produced non-utf8 output")
        .trim()
        .to_string()
}

/// Remove a blob's loose object file, leaving the path tracked but
/// unreadable at the reference.
pub fn delete_blob_object(repository: &Path, oid: &str) {
    let (dir, file) = oid.split_at(2);
    let object_path = repository.join(".git").join("objects").join(dir).join(file);
    std::fs::remove_file(&object_path)
        .unwrap_or_else(|e| panic!("Failed to delete object {:?}: {}", object_path, e));
}
