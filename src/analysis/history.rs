//! Commit history aggregation

use rayon::prelude::*;

use super::commit_stats::analyze_commit;
use crate::config::RepoConfiguration;
use crate::model::{CommitRecord, CommitResult};

/// Analyze parsed records in parallel, preserving input order
pub fn analyze_commits(records: &[CommitRecord], config: &RepoConfiguration) -> Vec<CommitResult> {
    records
        .par_iter()
        .map(|record| analyze_commit(record, config))
        .collect()
}

/// Filter and order analyzed commits
///
/// Drops commits by unknown authors and commits on the ignore list (full
/// hash or abbreviated prefix), then sorts ascending by time. The sort is
/// stable and commits without a parseable time come first.
pub fn aggregate_commits(
    commits: Vec<CommitResult>,
    config: &RepoConfiguration,
) -> Vec<CommitResult> {
    tracing::info!(
        location = %config.location().display(),
        branch = %config.branch(),
        "Analyzing commits"
    );

    let total = commits.len();
    let mut kept: Vec<CommitResult> = commits
        .into_iter()
        .filter(|commit| !commit.author.is_unknown())
        .filter(|commit| !commit.hash.is_inside_commit_list(config.ignore_commits()))
        .collect();

    kept.sort_by_key(|commit| commit.time);

    tracing::debug!(total, kept = kept.len(), "commit aggregation complete");
    kept
}
