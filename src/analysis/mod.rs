//! Analysis layer
//!
//! Pure functions over parsed git output plus a [`RepoAnalyzer`] that drives
//! them against a [`crate::git::HistorySource`].

mod author_resolver;
mod commit_stats;
mod history;
mod line_attribution;
mod pipeline;
mod summary;

pub use author_resolver::AuthorResolver;
pub use commit_stats::{analyze_commit, parse_commit_date};
pub use history::{aggregate_commits, analyze_commits};
pub use line_attribution::{
    MAX_RENAME_DEPTH, analyze_file, attribute_lines, blame_following_renames, stitch_renames,
};
pub use pipeline::{FileFailure, RepoAnalyzer, RepoReport, analyze_repositories};
pub use summary::{AuthorContribution, AuthorLineTotals, ContributionSummary, Period};
