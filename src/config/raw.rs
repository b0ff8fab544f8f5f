//! Serde shapes of the TOML configuration file

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{Author, AuthorAlias};

/// Repository section as written in the config file
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawRepoConfig {
    #[serde(default)]
    pub location: PathBuf,
    pub branch: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    #[serde(default)]
    pub ignore_commits: Vec<String>,
    #[serde(default)]
    pub ignored_authors: Vec<String>,
    #[serde(default)]
    pub accept_all_authors: bool,
    pub ignore_whitespace: Option<bool>,
    pub threads: Option<usize>,
    #[serde(default)]
    pub authors: Vec<RawAuthor>,
    #[serde(default)]
    pub file_types: Vec<RawFileType>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawAuthor {
    pub git_id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub aliases: Vec<RawAlias>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawAlias {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawFileType {
    pub name: String,
    pub patterns: Vec<String>,
}

impl RawAuthor {
    pub fn into_author(self) -> Author {
        let mut author = Author::new(self.git_id);
        if let Some(display_name) = self.display_name {
            author = author.with_display_name(display_name);
        }
        for alias in self.aliases {
            author = author.with_alias(AuthorAlias {
                name: alias.name,
                email: alias.email,
            });
        }
        author
    }
}
