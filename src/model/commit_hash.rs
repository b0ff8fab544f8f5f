//! Commit hash data model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shortest abbreviation accepted when comparing hashes (git's own minimum)
pub const MIN_PREFIX_LEN: usize = 4;

/// A git commit identifier, either full (40 hex chars) or abbreviated
///
/// Stored lowercase. Use [`CommitHash::matches`] to compare hashes that may be
/// abbreviated; the derived `PartialEq` is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitHash(String);

impl CommitHash {
    /// Create a hash from its textual form
    pub fn new(hash: impl AsRef<str>) -> Self {
        Self(hash.as_ref().trim().to_ascii_lowercase())
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this hash looks like a valid (possibly abbreviated) commit id
    pub fn is_valid(&self) -> bool {
        self.0.len() >= MIN_PREFIX_LEN && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Check if two hashes name the same commit
    ///
    /// True when one is a prefix of the other and the shorter one has at least
    /// [`MIN_PREFIX_LEN`] characters. Symmetric.
    pub fn matches(&self, other: &CommitHash) -> bool {
        let (short, long) = if self.0.len() <= other.0.len() {
            (&self.0, &other.0)
        } else {
            (&other.0, &self.0)
        };
        short.len() >= MIN_PREFIX_LEN && long.starts_with(short.as_str())
    }

    /// Check if this hash matches any entry of `list`
    ///
    /// Shared by commit filtering and line attribution so that full and
    /// abbreviated ignore lists behave identically.
    pub fn is_inside_commit_list(&self, list: &[CommitHash]) -> bool {
        list.iter().any(|candidate| candidate.matches(self))
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitHash {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
