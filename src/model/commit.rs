//! Commit data models

use std::collections::BTreeMap;
use std::ops::AddAssign;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{Author, CommitHash, FileType};

/// Raw fields of one `git log` record, before analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub author_name: String,
    pub author_email: String,
    pub date: String,
    pub message_title: String,
    /// Body with the 4-space log indentation already removed
    pub message_body: String,
    /// Raw `%D` ref list (e.g. `HEAD -> main, tag: v1.0`)
    pub refs: String,
    /// Per-file numstat lines followed by the shortstat summary line
    pub stats: String,
}

/// Inserted and deleted line counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContributionStats {
    pub insertions: u64,
    pub deletions: u64,
}

impl ContributionStats {
    pub fn new(insertions: u64, deletions: u64) -> Self {
        Self {
            insertions,
            deletions,
        }
    }
}

impl AddAssign for ContributionStats {
    fn add_assign(&mut self, rhs: Self) {
        self.insertions += rhs.insertions;
        self.deletions += rhs.deletions;
    }
}

/// Analyzed commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResult {
    pub author: Author,
    pub hash: CommitHash,
    /// `None` when the raw date could not be parsed
    pub time: Option<NaiveDateTime>,
    pub message_title: String,
    pub message_body: String,
    /// `None` (never empty) when the commit carries no tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub insertions: u64,
    pub deletions: u64,
    /// Only file types touched by this commit
    pub file_type_contributions: BTreeMap<FileType, ContributionStats>,
}

impl CommitResult {
    /// Check if the commit touched no files
    pub fn is_empty(&self) -> bool {
        self.file_type_contributions.is_empty() && self.insertions == 0 && self.deletions == 0
    }

    /// Totals across all file types
    pub fn totals(&self) -> ContributionStats {
        ContributionStats::new(self.insertions, self.deletions)
    }
}
