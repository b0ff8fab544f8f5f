//! Commit statistics analysis
//!
//! Turns a parsed [`CommitRecord`] into a [`CommitResult`]: resolves the
//! author, parses the date, extracts tags, and buckets insertions and
//! deletions by file type.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::config::{DATE_TIME_FORMAT, RepoConfiguration};
use crate::git::parser::Parser;
use crate::model::{CommitHash, CommitRecord, CommitResult, ContributionStats, FileType};

/// Analyze one commit record
///
/// Never drops the record: an unknown author yields [`crate::model::Author::unknown`]
/// and an unparseable date yields `time: None`. Filtering happens later in
/// [`super::aggregate_commits`].
pub fn analyze_commit(record: &CommitRecord, config: &RepoConfiguration) -> CommitResult {
    let author = config.author(&record.author_name, &record.author_email);
    let time = parse_commit_date(&record.date, &record.hash);
    let tags = Parser::extract_tags(&record.refs);

    let mut result = CommitResult {
        author,
        hash: CommitHash::new(&record.hash),
        time,
        message_title: record.message_title.clone(),
        message_body: record.message_body.clone(),
        tags,
        insertions: 0,
        deletions: 0,
        file_type_contributions: BTreeMap::new(),
    };

    let stats = record.stats.trim();
    if stats.is_empty() {
        // empty commit, no files changed
        return result;
    }

    let stat_lines: Vec<&str> = stats.lines().collect();
    let (summary, file_lines) = stat_lines
        .split_last()
        .map(|(summary, files)| (*summary, files))
        .unwrap_or(("", &[]));

    let contributions = file_type_contributions(file_lines, config, &record.hash);
    let totals = ContributionStats::new(
        Parser::parse_insertions(summary),
        Parser::parse_deletions(summary),
    );

    if !contributions.is_empty() {
        let mut summed = ContributionStats::default();
        for stats in contributions.values() {
            summed += *stats;
        }
        if summed != totals {
            tracing::warn!(
                commit = %record.hash,
                summary = ?totals,
                per_file = ?summed,
                "commit summary disagrees with per-file stats"
            );
        }
    }

    result.insertions = totals.insertions;
    result.deletions = totals.deletions;
    result.file_type_contributions = contributions;
    result
}

/// Parse a strict local ISO 8601 date; logs and returns `None` on failure
pub fn parse_commit_date(raw: &str, hash: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_FORMAT) {
        Ok(time) => Some(time),
        Err(err) => {
            tracing::warn!(
                commit = %hash,
                date = %raw,
                error = %err,
                "Unable to parse the date from git log result for commit"
            );
            None
        }
    }
}

/// Sum insertions and deletions of the per-file lines by file type
fn file_type_contributions(
    lines: &[&str],
    config: &RepoConfiguration,
    hash: &str,
) -> BTreeMap<FileType, ContributionStats> {
    let mut contributions: BTreeMap<FileType, ContributionStats> = BTreeMap::new();

    for line in lines.iter().filter(|line| !line.trim().is_empty()) {
        let Some(numstat) = Parser::parse_numstat_line(line) else {
            tracing::warn!(commit = %hash, line = %line, "skipping malformed numstat line");
            continue;
        };
        *contributions
            .entry(config.file_type(&numstat.path))
            .or_default() += numstat.stats;
    }

    contributions
}
