//! Repository configuration
//!
//! Supports loading a repository's analysis settings from a TOML file:
//!
//! ```toml
//! location = "../my-repo"
//! branch = "main"
//! since = "2018-02-06"
//! until = "2018-02-08T23:59:59"
//! ignore_commits = ["2d87a431"]
//! ignored_authors = ["dependabot"]
//!
//! [[authors]]
//! git_id = "jane"
//! display_name = "Jane Doe"
//! aliases = [{ name = "Jane", email = "jane@x.com" }, { name = "Jane D" }]
//!
//! [[file_types]]
//! name = "docs"
//! patterns = ["docs/**", "**/*.md"]
//! ```

mod raw;

use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::analysis::AuthorResolver;
use crate::model::{Author, CommitHash, FileType, FileTypeRules};

pub use raw::{RawAlias, RawAuthor, RawFileType, RawRepoConfig};

/// Strict local date-time format used in configuration and git log output
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date-only format accepted in configuration
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur when loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)")]
    InvalidDate(String),

    #[error("Invalid file type glob: {0}")]
    InvalidGlob(#[from] globset::Error),

    #[error("Invalid commit hash '{0}' in ignore list")]
    InvalidCommitHash(String),

    #[error("Author git id '{0}' is reserved for unknown authors")]
    ReservedGitId(String),

    #[error("since date {since} is after until date {until}")]
    InvertedWindow {
        since: NaiveDateTime,
        until: NaiveDateTime,
    },
}

/// Read-only settings for analyzing one repository
#[derive(Debug, Clone)]
pub struct RepoConfiguration {
    location: PathBuf,
    branch: String,
    since: Option<NaiveDateTime>,
    until: Option<NaiveDateTime>,
    ignore_commits: Vec<CommitHash>,
    authors: Vec<Author>,
    ignored_authors: Vec<String>,
    accept_all_authors: bool,
    ignore_whitespace: bool,
    threads: Option<usize>,
    file_types: FileTypeRules,
    resolver: AuthorResolver,
}

impl RepoConfiguration {
    /// Default branch analyzed when none is configured
    pub const DEFAULT_BRANCH: &'static str = "HEAD";

    /// Create a configuration with defaults for the repository at `location`
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            branch: Self::DEFAULT_BRANCH.to_string(),
            since: None,
            until: None,
            ignore_commits: Vec::new(),
            authors: Vec::new(),
            ignored_authors: Vec::new(),
            accept_all_authors: false,
            ignore_whitespace: true,
            threads: None,
            file_types: FileTypeRules::default(),
            resolver: AuthorResolver::default(),
        }
    }

    /// Load a configuration from a TOML file
    ///
    /// A relative `location` is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&content, Some(base))
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str, base: Option<&Path>) -> Result<Self, ConfigError> {
        let raw: RawRepoConfig = toml::from_str(content)?;
        Self::from_raw(raw, base)
    }

    /// Validate a deserialized configuration
    pub fn from_raw(raw: RawRepoConfig, base: Option<&Path>) -> Result<Self, ConfigError> {
        let location = match base {
            Some(base) if raw.location.is_relative() => base.join(&raw.location),
            _ => raw.location,
        };

        let since = raw
            .since
            .as_deref()
            .map(|s| parse_config_date(s, NaiveTime::MIN))
            .transpose()?;
        let until = raw
            .until
            .as_deref()
            .map(|s| parse_config_date(s, end_of_day()))
            .transpose()?;

        let ignore_commits = raw
            .ignore_commits
            .iter()
            .map(|hash| {
                let hash = CommitHash::new(hash);
                if hash.is_valid() {
                    Ok(hash)
                } else {
                    Err(ConfigError::InvalidCommitHash(hash.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let file_types = FileTypeRules::new(
            raw.file_types
                .into_iter()
                .map(|file_type| (file_type.name, file_type.patterns)),
        )?;

        let authors: Vec<Author> = raw.authors.into_iter().map(RawAuthor::into_author).collect();
        if let Some(author) = authors.iter().find(|author| author.is_unknown()) {
            return Err(ConfigError::ReservedGitId(author.git_id().to_string()));
        }

        let mut config = Self::new(location)
            .with_window(since, until)?
            .with_ignore_commits(ignore_commits)
            .with_authors(authors)
            .with_ignored_authors(raw.ignored_authors)
            .with_accept_all_authors(raw.accept_all_authors)
            .with_file_types(file_types);
        if let Some(branch) = raw.branch {
            config = config.with_branch(branch);
        }
        if let Some(ignore_whitespace) = raw.ignore_whitespace {
            config.ignore_whitespace = ignore_whitespace;
        }
        Ok(config.with_threads(raw.threads))
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the analysis window; rejects `since` after `until`
    pub fn with_window(
        mut self,
        since: Option<NaiveDateTime>,
        until: Option<NaiveDateTime>,
    ) -> Result<Self, ConfigError> {
        if let (Some(since), Some(until)) = (since, until)
            && since > until
        {
            return Err(ConfigError::InvertedWindow { since, until });
        }
        self.since = since;
        self.until = until;
        Ok(self)
    }

    pub fn with_ignore_commits(mut self, ignore_commits: Vec<CommitHash>) -> Self {
        self.ignore_commits = ignore_commits;
        self
    }

    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self.rebuild_resolver();
        self
    }

    pub fn with_ignored_authors(mut self, ignored_authors: Vec<String>) -> Self {
        self.ignored_authors = ignored_authors;
        self.rebuild_resolver();
        self
    }

    pub fn with_accept_all_authors(mut self, accept_all_authors: bool) -> Self {
        self.accept_all_authors = accept_all_authors;
        self.rebuild_resolver();
        self
    }

    pub fn with_file_types(mut self, file_types: FileTypeRules) -> Self {
        self.file_types = file_types;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads.filter(|&n| n > 0);
        self
    }

    fn rebuild_resolver(&mut self) {
        self.resolver = AuthorResolver::new(&self.authors)
            .with_accept_all(self.accept_all_authors)
            .with_ignored(self.ignored_authors.iter().cloned());
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn since(&self) -> Option<NaiveDateTime> {
        self.since
    }

    pub fn until(&self) -> Option<NaiveDateTime> {
        self.until
    }

    pub fn ignore_commits(&self) -> &[CommitHash] {
        &self.ignore_commits
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Pass `-w` to git so whitespace-only changes are not counted
    pub fn ignore_whitespace(&self) -> bool {
        self.ignore_whitespace
    }

    /// Worker thread bound; `None` uses rayon's default
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Resolve a raw git identity to a configured author
    pub fn author(&self, name: &str, email: &str) -> Author {
        self.resolver.resolve(name, email)
    }

    /// Classify a path into its file type
    pub fn file_type(&self, path: &str) -> FileType {
        self.file_types.classify(path)
    }
}

/// Time given to date-only `until` values
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Parse a config date; date-only values take `default_time`
pub fn parse_config_date(value: &str, default_time: NaiveTime) -> Result<NaiveDateTime, ConfigError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .or_else(|_| {
            NaiveDate::parse_from_str(value, DATE_FORMAT).map(|date| date.and_time(default_time))
        })
        .map_err(|_| ConfigError::InvalidDate(value.to_string()))
}
