//! git-specific constants
//!
//! Centralized definitions for git command names, flags, and output markers.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// git subcommands
pub mod commands {
    pub const LOG: &str = "log";
    pub const BLAME: &str = "blame";
    pub const LS_TREE: &str = "ls-tree";
    pub const REV_LIST: &str = "rev-list";
}

/// git command flags
pub mod flags {
    /// Run as if started in the given directory (global flag)
    pub const REPO_PATH: &str = "-C";
    /// Set a configuration value for one invocation (global flag)
    pub const CONFIG: &str = "-c";
    /// Skip merge commits so each change is counted once
    pub const NO_MERGES: &str = "--no-merges";
    /// Per-file insertion/deletion counts
    pub const NUMSTAT: &str = "--numstat";
    /// Aggregate summary line after the per-file counts
    pub const SHORTSTAT: &str = "--shortstat";
    /// Ignore whitespace when comparing lines
    pub const IGNORE_WHITESPACE: &str = "-w";
    /// Full commit metadata on every blamed line
    pub const LINE_PORCELAIN: &str = "--line-porcelain";
    /// Do not treat root commits as boundaries
    pub const ROOT: &str = "--root";
    /// Continue history across renames (single path only)
    pub const FOLLOW: &str = "--follow";
    /// Detect renames
    pub const FIND_RENAMES: &str = "-M";
    /// Only report renamed paths
    pub const RENAMES_ONLY: &str = "--diff-filter=R";
    /// Show status letter and paths for each change
    pub const NAME_STATUS: &str = "--name-status";
    /// Recurse into subtrees
    pub const RECURSIVE: &str = "-r";
    /// Print paths only
    pub const NAME_ONLY: &str = "--name-only";
    /// Separate paths with NUL and leave them unquoted
    pub const NUL_TERMINATED: &str = "-z";
    /// Limit output to one commit
    pub const MAX_ONE: &str = "-1";
    /// Separates revisions from paths
    pub const PATHSPEC: &str = "--";
    /// Show version
    pub const VERSION: &str = "--version";
}

/// Special git values
pub mod special {
    /// Suffix naming the first parent of a revision
    pub const PARENT_SUFFIX: &str = "^";
    /// Print non-ASCII path bytes verbatim instead of octal escapes
    pub const QUOTE_PATH_OFF: &str = "core.quotePath=false";
    /// Version output prefix (e.g., "git version 2.43.0")
    pub const VERSION_PREFIX: &str = "git version ";
}

/// Error detection patterns in git output
pub mod errors {
    /// Pattern indicating not a git repository
    pub const NOT_A_REPO: &str = "not a git repository";
}
