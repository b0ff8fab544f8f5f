//! Author data model

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// Git id reserved for [`Author::unknown`]
pub const UNKNOWN_AUTHOR_GIT_ID: &str = "-";

/// One raw identity that resolves to an [`Author`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorAlias {
    /// Raw author name as it appears in git output
    pub name: String,
    /// Raw author email; `None` matches any email
    pub email: Option<String>,
}

impl AuthorAlias {
    /// Alias matching an exact (name, email) pair
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: Some(email.into()),
        }
    }

    /// Alias matching a name with any email
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }
}

/// A canonical author
///
/// Identity is the git id alone: two authors with the same git id are equal
/// regardless of display name or aliases.
#[derive(Debug, Clone)]
pub struct Author {
    git_id: String,
    display_name: String,
    aliases: Vec<AuthorAlias>,
}

impl Author {
    /// Create an author whose git id doubles as the display name
    pub fn new(git_id: impl Into<String>) -> Self {
        let git_id = git_id.into();
        Self {
            display_name: git_id.clone(),
            git_id,
            aliases: Vec::new(),
        }
    }

    /// The sentinel for lines and commits that must not be attributed
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_AUTHOR_GIT_ID)
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Add an alias
    pub fn with_alias(mut self, alias: AuthorAlias) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn git_id(&self) -> &str {
        &self.git_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn aliases(&self) -> &[AuthorAlias] {
        &self.aliases
    }

    /// Check if this is the unknown sentinel
    pub fn is_unknown(&self) -> bool {
        self.git_id == UNKNOWN_AUTHOR_GIT_ID
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.git_id == other.git_id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.git_id.hash(state);
    }
}

impl PartialOrd for Author {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Author {
    fn cmp(&self, other: &Self) -> Ordering {
        self.git_id.cmp(&other.git_id)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.git_id)
    }
}

impl Serialize for Author {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.git_id)
    }
}
