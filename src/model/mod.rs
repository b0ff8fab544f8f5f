//! Data models for repotally
//!
//! This module contains the plain data structures shared by the parsers and
//! analyzers: authors, commit hashes, commit results and blame snapshots.

mod author;
mod blame;
mod commit;
mod commit_hash;
mod file_type;

pub use author::{Author, AuthorAlias, UNKNOWN_AUTHOR_GIT_ID};
pub use blame::{BlameLine, FileSnapshotResult, LineAttribution, RenameEvent};
pub use commit::{CommitRecord, CommitResult, ContributionStats};
pub use commit_hash::{CommitHash, MIN_PREFIX_LEN};
pub use file_type::{FileType, FileTypeRules, OTHER_FILE_TYPE};
