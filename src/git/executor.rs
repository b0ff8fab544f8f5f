//! git command executor
//!
//! Handles running git commands and capturing their output.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDateTime;

use super::GitError;
use super::constants::{self, commands, errors, flags, special};
use super::format::Formats;
use crate::config::{DATE_TIME_FORMAT, RepoConfiguration};

/// Source of raw history text
///
/// The analyzers only ever see the text this trait returns, so tests can
/// substitute canned output for a real repository. Every call is a single
/// blocking unit; a failure affects only the caller's unit of work.
pub trait HistorySource: Sync {
    /// Raw `git log` stream for the configured branch and window
    fn commit_log(&self, config: &RepoConfiguration) -> Result<String, GitError>;

    /// Raw `git blame --line-porcelain` output for `path` at `rev`
    fn blame(
        &self,
        rev: &str,
        path: &str,
        since: Option<NaiveDateTime>,
        ignore_whitespace: bool,
    ) -> Result<String, GitError>;

    /// Raw rename history of `path` at `rev`, newest first
    fn rename_history(
        &self,
        rev: &str,
        path: &str,
        since: Option<NaiveDateTime>,
        until: Option<NaiveDateTime>,
    ) -> Result<String, GitError>;

    /// Raw list of files tracked at `rev`, one path per line
    fn tracked_files(&self, rev: &str) -> Result<String, GitError>;

    /// Full hash of the newest commit on `branch` not after `until`
    fn resolve_reference(
        &self,
        branch: &str,
        until: Option<NaiveDateTime>,
    ) -> Result<String, GitError>;
}

/// Executor for git commands
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// Path to the repository
    repo_path: PathBuf,
}

impl GitExecutor {
    /// Create a new executor for a specific repository path
    pub fn with_repo_path(path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Run a git command with the given arguments
    ///
    /// Always runs against the executor's repository via `-C`, with
    /// `core.quotePath` off so paths agree with the `-z` file list.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<String, GitError> {
        let mut cmd = Command::new(constants::GIT_COMMAND);
        cmd.arg(flags::REPO_PATH).arg(&self.repo_path);
        cmd.args([flags::CONFIG, special::QUOTE_PATH_OFF]);
        cmd.args(args.iter().map(AsRef::as_ref));

        tracing::debug!(
            repo = %self.repo_path.display(),
            args = ?args.iter().map(AsRef::as_ref).collect::<Vec<_>>(),
            "running git"
        );

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::GitNotFound
            } else {
                GitError::IoError(e)
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let exit_code = output.status.code().unwrap_or(-1);

            if stderr.to_lowercase().contains(errors::NOT_A_REPO) {
                return Err(GitError::NotARepository);
            }

            Err(GitError::CommandFailed { stderr, exit_code })
        }
    }

    /// Get the git version
    pub fn version(&self) -> Result<String, GitError> {
        let output = self.run(&[flags::VERSION])?;
        // Output format: "git version 2.43.0"
        let trimmed = output.trim();
        Ok(trimmed
            .strip_prefix(special::VERSION_PREFIX)
            .unwrap_or(trimmed)
            .to_string())
    }
}

fn since_arg(since: NaiveDateTime) -> String {
    format!("--since={}", since.format(DATE_TIME_FORMAT))
}

fn until_arg(until: NaiveDateTime) -> String {
    format!("--until={}", until.format(DATE_TIME_FORMAT))
}

fn before_arg(until: NaiveDateTime) -> String {
    format!("--before={}", until.format(DATE_TIME_FORMAT))
}

/// Build `git log` arguments for commit analysis
pub(crate) fn log_args(config: &RepoConfiguration) -> Vec<String> {
    let mut args = vec![
        commands::LOG.to_string(),
        config.branch().to_string(),
        flags::NO_MERGES.to_string(),
        flags::NUMSTAT.to_string(),
        flags::SHORTSTAT.to_string(),
        Formats::log_date().to_string(),
        Formats::log().to_string(),
    ];
    if config.ignore_whitespace() {
        args.push(flags::IGNORE_WHITESPACE.to_string());
    }
    if let Some(since) = config.since() {
        args.push(since_arg(since));
    }
    if let Some(until) = config.until() {
        args.push(until_arg(until));
    }
    args
}

/// Build `git blame` arguments
pub(crate) fn blame_args(
    rev: &str,
    path: &str,
    since: Option<NaiveDateTime>,
    ignore_whitespace: bool,
) -> Vec<String> {
    let mut args = vec![
        commands::BLAME.to_string(),
        flags::LINE_PORCELAIN.to_string(),
        flags::ROOT.to_string(),
    ];
    if ignore_whitespace {
        args.push(flags::IGNORE_WHITESPACE.to_string());
    }
    if let Some(since) = since {
        args.push(since_arg(since));
    }
    args.extend([rev.to_string(), flags::PATHSPEC.to_string(), path.to_string()]);
    args
}

impl HistorySource for GitExecutor {
    fn commit_log(&self, config: &RepoConfiguration) -> Result<String, GitError> {
        self.run(&log_args(config))
    }

    fn blame(
        &self,
        rev: &str,
        path: &str,
        since: Option<NaiveDateTime>,
        ignore_whitespace: bool,
    ) -> Result<String, GitError> {
        self.run(&blame_args(rev, path, since, ignore_whitespace))
    }

    fn rename_history(
        &self,
        rev: &str,
        path: &str,
        since: Option<NaiveDateTime>,
        until: Option<NaiveDateTime>,
    ) -> Result<String, GitError> {
        let mut args = vec![
            commands::LOG.to_string(),
            flags::FOLLOW.to_string(),
            flags::FIND_RENAMES.to_string(),
            flags::RENAMES_ONLY.to_string(),
            flags::NAME_STATUS.to_string(),
            Formats::rename_history().to_string(),
        ];
        if let Some(since) = since {
            args.push(since_arg(since));
        }
        if let Some(until) = until {
            args.push(until_arg(until));
        }
        args.extend([rev.to_string(), flags::PATHSPEC.to_string(), path.to_string()]);
        self.run(&args)
    }

    fn tracked_files(&self, rev: &str) -> Result<String, GitError> {
        self.run(&[
            commands::LS_TREE,
            flags::RECURSIVE,
            flags::NAME_ONLY,
            flags::NUL_TERMINATED,
            rev,
        ])
    }

    fn resolve_reference(
        &self,
        branch: &str,
        until: Option<NaiveDateTime>,
    ) -> Result<String, GitError> {
        let mut args = vec![commands::REV_LIST.to_string(), flags::MAX_ONE.to_string()];
        if let Some(until) = until {
            args.push(before_arg(until));
        }
        args.push(branch.to_string());

        let output = self.run(&args)?;
        let hash = output.trim();
        if hash.is_empty() {
            return Err(GitError::RevisionNotFound(match until {
                Some(until) => format!("{} before {}", branch, until.format(DATE_TIME_FORMAT)),
                None => branch.to_string(),
            }));
        }
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(date, DATE_TIME_FORMAT).unwrap()
    }

    #[test]
    fn test_executor_with_path() {
        let executor = GitExecutor::with_repo_path("/tmp/test");
        assert_eq!(executor.repo_path(), Path::new("/tmp/test"));
    }

    #[test]
    fn test_log_args_include_window_and_stats() {
        let config = RepoConfiguration::new("/repo")
            .with_branch("main")
            .with_window(Some(at("2018-02-06T00:00:00")), Some(at("2018-02-08T23:59:59")))
            .unwrap();

        let args = log_args(&config);
        assert_eq!(args[0], "log");
        assert_eq!(args[1], "main");
        assert!(args.contains(&"--numstat".to_string()));
        assert!(args.contains(&"--shortstat".to_string()));
        assert!(args.contains(&"-w".to_string()));
        assert!(args.contains(&"--since=2018-02-06T00:00:00".to_string()));
        assert!(args.contains(&"--until=2018-02-08T23:59:59".to_string()));
    }

    #[test]
    fn test_blame_args_put_path_last() {
        let args = blame_args("HEAD", "src/a b.rs", Some(at("2020-01-01T00:00:00")), false);
        assert_eq!(
            args,
            vec![
                "blame",
                "--line-porcelain",
                "--root",
                "--since=2020-01-01T00:00:00",
                "HEAD",
                "--",
                "src/a b.rs",
            ]
        );
    }
}
