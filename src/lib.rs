//! repotally - contribution analysis for git repositories
//!
//! Turns the raw output of `git log` and `git blame` into per-author
//! contribution data: commits with their insertions and deletions split by
//! file type, and the current owner of every line of every tracked file.
//!
//! This library provides:
//! - [`analysis`]: Commit and line attribution analysis, summaries, and the repository pipeline
//! - [`config`]: Repository configuration (TOML) and author resolution settings
//! - [`git`]: git command execution and output parsing
//! - [`model`]: Domain models

pub mod analysis;
pub mod config;
pub mod git;
pub mod model;
