//! Rename history parser (git log --follow --name-status)

use super::super::format::RENAME_COMMIT_PREFIX;
use super::{Parser, RENAME_STATUS_REGEX};
use crate::model::{CommitHash, RenameEvent};

impl Parser {
    /// Parse rename history into events, keeping git's newest-first order
    ///
    /// Format:
    /// ```text
    /// commit <hash>
    ///
    /// R100\t<old path>\t<new path>
    /// ```
    pub fn parse_rename_history(output: &str) -> Vec<RenameEvent> {
        let mut events = Vec::new();
        let mut current: Option<CommitHash> = None;

        for line in output.lines() {
            if let Some(hash) = line.strip_prefix(RENAME_COMMIT_PREFIX) {
                current = Some(CommitHash::new(hash));
                continue;
            }

            if let Some(commit) = &current
                && let Some(caps) = RENAME_STATUS_REGEX.captures(line)
            {
                events.push(RenameEvent {
                    commit: commit.clone(),
                    from: Self::unquote_path(&caps[1]),
                    to: Self::unquote_path(&caps[2]),
                });
            }
        }

        events
    }
}
