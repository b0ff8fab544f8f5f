//! Blame (line attribution) data models

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Author, CommitHash, FileType};

/// One line of `git blame --line-porcelain` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameLine {
    /// Commit that last touched the line
    pub commit: CommitHash,
    /// Raw author name of that commit
    pub author_name: String,
    /// Raw author email, without angle brackets
    pub author_email: String,
    /// Line number in the blamed commit's version of the file
    pub original_line: usize,
    /// 1-based line number in the blamed revision
    pub final_line: usize,
    /// Path of the file in the blamed commit
    pub filename: String,
    /// True when the commit lies at or beyond the lower bound of the window
    pub boundary: bool,
    /// Line content without the leading tab
    pub content: String,
}

/// A rename reported by `git log --follow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEvent {
    /// Commit that performed the rename
    pub commit: CommitHash,
    /// Path before the rename
    pub from: String,
    /// Path after the rename
    pub to: String,
}

/// Owner of one currently present line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttribution {
    /// 1-based line number
    pub line_number: usize,
    pub commit: CommitHash,
    pub author: Author,
    pub content: String,
}

/// Line attribution of one file at one reference point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSnapshotResult {
    pub path: String,
    pub file_type: FileType,
    pub lines: Vec<LineAttribution>,
}

impl FileSnapshotResult {
    pub fn new(path: String, file_type: FileType) -> Self {
        Self {
            path,
            file_type,
            lines: Vec::new(),
        }
    }

    /// Get a line by its 1-based number
    pub fn line(&self, line_number: usize) -> Option<&LineAttribution> {
        line_number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Number of lines owned by each author, unknown lines included
    pub fn author_line_counts(&self) -> BTreeMap<Author, u64> {
        let mut counts = BTreeMap::new();
        for line in &self.lines {
            *counts.entry(line.author.clone()).or_insert(0) += 1;
        }
        counts
    }
}
