//! Per-author contribution summaries
//!
//! Both summaries are plain sums, so partial results computed on different
//! workers can be merged in any order.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::model::{Author, CommitResult, ContributionStats, FileSnapshotResult, FileType};

/// Width of the time buckets in a [`ContributionSummary`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    /// Weeks start on Monday
    Week,
}

impl Period {
    /// First day of the bucket containing `date`
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Day => date,
            Period::Week => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            other => Err(format!("unknown period '{}' (expected day or week)", other)),
        }
    }
}

/// Contributions of one author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorContribution {
    pub commits: u64,
    pub totals: ContributionStats,
    pub file_types: BTreeMap<FileType, ContributionStats>,
    /// Keyed by the first day of each bucket
    pub buckets: BTreeMap<NaiveDate, ContributionStats>,
}

impl AuthorContribution {
    fn add_commit(&mut self, commit: &CommitResult, period: Period) {
        self.commits += 1;
        self.totals += commit.totals();
        for (file_type, stats) in &commit.file_type_contributions {
            *self.file_types.entry(file_type.clone()).or_default() += *stats;
        }
        if let Some(time) = commit.time {
            *self
                .buckets
                .entry(period.bucket_start(time.date()))
                .or_default() += commit.totals();
        }
    }

    fn merge(&mut self, other: AuthorContribution) {
        self.commits += other.commits;
        self.totals += other.totals;
        for (file_type, stats) in other.file_types {
            *self.file_types.entry(file_type).or_default() += stats;
        }
        for (day, stats) in other.buckets {
            *self.buckets.entry(day).or_default() += stats;
        }
    }
}

/// Commit contributions per author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributionSummary {
    pub period: Period,
    pub authors: BTreeMap<Author, AuthorContribution>,
}

impl ContributionSummary {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            authors: BTreeMap::new(),
        }
    }

    /// Summarize already aggregated commits
    ///
    /// A commit without a time counts towards the totals but lands in no bucket.
    pub fn from_commits(commits: &[CommitResult], period: Period) -> Self {
        let mut summary = Self::new(period);
        for commit in commits {
            summary.add(commit);
        }
        summary
    }

    pub fn add(&mut self, commit: &CommitResult) {
        self.authors
            .entry(commit.author.clone())
            .or_default()
            .add_commit(commit, self.period);
    }

    /// Sum another summary into this one
    ///
    /// Both summaries must use the same period.
    pub fn merge(&mut self, other: ContributionSummary) {
        debug_assert_eq!(self.period, other.period);
        for (author, contribution) in other.authors {
            self.authors.entry(author).or_default().merge(contribution);
        }
    }

    pub fn get(&self, author: &Author) -> Option<&AuthorContribution> {
        self.authors.get(author)
    }
}

/// Current line ownership per author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorLineTotals {
    pub lines: BTreeMap<Author, u64>,
    pub file_types: BTreeMap<Author, BTreeMap<FileType, u64>>,
}

impl AuthorLineTotals {
    pub fn from_snapshot(snapshot: &FileSnapshotResult) -> Self {
        let mut totals = Self::default();
        for (author, count) in snapshot.author_line_counts() {
            *totals
                .file_types
                .entry(author.clone())
                .or_default()
                .entry(snapshot.file_type.clone())
                .or_insert(0) += count;
            *totals.lines.entry(author).or_insert(0) += count;
        }
        totals
    }

    pub fn from_snapshots<'a>(snapshots: impl IntoIterator<Item = &'a FileSnapshotResult>) -> Self {
        snapshots
            .into_iter()
            .map(Self::from_snapshot)
            .fold(Self::default(), |mut acc, totals| {
                acc.merge(totals);
                acc
            })
    }

    pub fn merge(&mut self, other: AuthorLineTotals) {
        for (author, count) in other.lines {
            *self.lines.entry(author).or_insert(0) += count;
        }
        for (author, file_types) in other.file_types {
            let entry = self.file_types.entry(author).or_default();
            for (file_type, count) in file_types {
                *entry.entry(file_type).or_insert(0) += count;
            }
        }
    }

    /// Lines owned by `author`, zero when absent
    pub fn lines_of(&self, author: &Author) -> u64 {
        self.lines.get(author).copied().unwrap_or(0)
    }
}
