//! Author identity resolution
//!
//! Maps raw (name, email) pairs from git output onto configured authors.

use std::collections::{HashMap, HashSet};

use crate::model::Author;

/// Resolves raw git identities to canonical [`Author`]s
///
/// Lookup order: exact (name, email) alias, then name-only alias, then the
/// wildcard rule. Anything in the ignored set resolves to [`Author::unknown`].
#[derive(Debug, Clone, Default)]
pub struct AuthorResolver {
    by_pair: HashMap<(String, String), Author>,
    by_name: HashMap<String, Author>,
    ignored: HashSet<String>,
    accept_all: bool,
}

impl AuthorResolver {
    /// Build a resolver from registered authors
    ///
    /// Every author's git id is registered as a name-only alias of itself.
    /// When two authors claim the same alias, the first one registered keeps it.
    pub fn new(authors: &[Author]) -> Self {
        let mut resolver = Self::default();

        for author in authors {
            resolver
                .by_name
                .entry(author.git_id().to_string())
                .or_insert_with(|| author.clone());

            for alias in author.aliases() {
                match &alias.email {
                    Some(email) => {
                        resolver
                            .by_pair
                            .entry((alias.name.clone(), email.clone()))
                            .or_insert_with(|| author.clone());
                    }
                    None => {
                        resolver
                            .by_name
                            .entry(alias.name.clone())
                            .or_insert_with(|| author.clone());
                    }
                }
            }
        }

        resolver
    }

    /// Resolve any unmatched identity to an author named after the raw name
    pub fn with_accept_all(mut self, accept_all: bool) -> Self {
        self.accept_all = accept_all;
        self
    }

    /// Exclude authors by git id
    pub fn with_ignored<I, S>(mut self, git_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(git_ids.into_iter().map(Into::into));
        self
    }

    /// Resolve a raw identity; returns [`Author::unknown`] on no match
    pub fn resolve(&self, name: &str, email: &str) -> Author {
        let author = self
            .by_pair
            .get(&(name.to_string(), email.to_string()))
            .or_else(|| self.by_name.get(name))
            .cloned()
            .or_else(|| (self.accept_all && !name.is_empty()).then(|| Author::new(name)));

        match author {
            Some(author) if !self.ignored.contains(author.git_id()) => author,
            _ => Author::unknown(),
        }
    }
}
