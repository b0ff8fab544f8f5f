//! File type classification

use std::fmt;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Name of the catch-all file type
pub const OTHER_FILE_TYPE: &str = "other";

/// A named bucket for contribution statistics (e.g. `java`, `docs`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileType(String);

impl FileType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn other() -> Self {
        Self::new(OTHER_FILE_TYPE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered glob rules mapping paths to file types
///
/// The first matching rule wins. With no rules configured, paths are classified
/// by their lowercase extension, and extensionless paths fall into `other`.
#[derive(Debug, Clone, Default)]
pub struct FileTypeRules {
    rules: Vec<(FileType, GlobSet)>,
}

impl FileTypeRules {
    /// Build rules from `(type name, glob patterns)` pairs
    pub fn new<I, P>(rules: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = (String, P)>,
        P: IntoIterator<Item = String>,
    {
        let mut compiled = Vec::new();
        for (name, patterns) in rules {
            let mut builder = GlobSetBuilder::new();
            for pattern in patterns {
                builder.add(Glob::new(&pattern)?);
            }
            compiled.push((FileType::new(name), builder.build()?));
        }
        Ok(Self { rules: compiled })
    }

    /// Classify a (post-rename) path
    pub fn classify(&self, path: &str) -> FileType {
        if self.rules.is_empty() {
            return classify_by_extension(path);
        }

        self.rules
            .iter()
            .find(|(_, globs)| globs.is_match(path))
            .map(|(file_type, _)| file_type.clone())
            .unwrap_or_else(FileType::other)
    }
}

fn classify_by_extension(path: &str) -> FileType {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            FileType::new(ext.to_ascii_lowercase())
        }
        _ => FileType::other(),
    }
}
