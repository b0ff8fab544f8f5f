//! TestRepo helper for integration tests.
//!
//! Provides a temporary git repository with deterministic authors and dates.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A temporary git repository for testing.
///
/// The repository is automatically cleaned up when the TestRepo is dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new git repository in a temporary directory, on branch `main`.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    /// Get the path to the repository root.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args([
            "-c",
            "user.name=Test Runner",
            "-c",
            "user.email=runner@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(self.path())
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    /// Execute a git command in this repository.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit code.
    pub fn git(&self, args: &[&str]) -> String {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute git command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Stage everything and commit as `author` at `date` (`YYYY-MM-DDTHH:MM:SS`, UTC).
    ///
    /// `author` is a `(name, email)` pair. Returns the full commit hash.
    pub fn commit(&self, author: (&str, &str), date: &str, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.commit_with(author, date, &["commit", "-q", "-m", message])
    }

    /// Commit without any changes.
    pub fn commit_empty(&self, author: (&str, &str), date: &str, message: &str) -> String {
        self.commit_with(author, date, &["commit", "-q", "--allow-empty", "-m", message])
    }

    fn commit_with(&self, (name, email): (&str, &str), date: &str, args: &[&str]) -> String {
        let date = format!("{}+0000", date);
        let output = self
            .command(args)
            .env("GIT_AUTHOR_NAME", name)
            .env("GIT_AUTHOR_EMAIL", email)
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_NAME", name)
            .env("GIT_COMMITTER_EMAIL", email)
            .env("GIT_COMMITTER_DATE", &date)
            .output()
            .expect("Failed to execute git commit");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("git commit failed: {}", stderr);
        }

        self.head()
    }

    /// Move a file with `git mv`.
    pub fn rename(&self, from: &str, to: &str) {
        if let Some(parent) = Path::new(to).parent() {
            std::fs::create_dir_all(self.path().join(parent))
                .expect("Failed to create parent directories");
        }
        self.git(&["mv", from, to]);
    }

    /// Add a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    /// Full hash of HEAD.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
