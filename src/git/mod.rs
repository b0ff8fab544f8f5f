//! git command execution layer
//!
//! This module handles executing git commands and parsing their output.

pub mod constants;
mod executor;
mod format;
/// Parser module (public for integration testing)
pub mod parser;

pub use executor::{GitExecutor, HistorySource};
pub use format::{COMMIT_INFO_MARKER, Formats, LOG_SPLITTER};

use std::io;
use thiserror::Error;

/// Errors that can occur when acquiring history from git
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("git command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("Failed to parse git output: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("git is not installed or not in PATH")]
    GitNotFound,

    #[error("No commit found for {0}")]
    RevisionNotFound(String),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
