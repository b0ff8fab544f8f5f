//! git output parser
//!
//! Parses the output from git commands into structured data.

mod blame;
mod files;
mod log;
mod rename;
mod stat;

#[cfg(test)]
mod tests;

pub use stat::NumstatLine;

use regex::Regex;
use std::sync::LazyLock;

/// Regex for the count in a shortstat summary's insertion phrase
/// Example: ` 2 files changed, 4 insertions(+), 1 deletion(-)` -> `4`
static INSERTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) insertion").expect("Invalid insertion regex"));

/// Regex for the count in a shortstat summary's deletion phrase
static DELETION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) deletion").expect("Invalid deletion regex"));

/// Regex for the 4-space indentation git log adds to each body line
static MESSAGE_BODY_INDENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ {4}").expect("Invalid message body regex"));

/// Regex for git's brace rename shorthand
/// Format: `<prefix>{<old> => <new>}<suffix>`
/// Example: `src/{old => new}/Foo.java`
///
/// Groups:
/// 1. prefix
/// 2. new segment (may be empty)
/// 3. suffix
static BRACE_RENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\{[^{}]* => ([^{}]*)\}(.*)$").expect("Invalid brace rename regex")
});

/// Regex for a `git blame --porcelain` header line
/// Format: `<hash> <original_line> <final_line> [<group_size>]`
///
/// Groups:
/// 1. commit hash (full, optionally `^`-prefixed)
/// 2. original line number
/// 3. final line number
static BLAME_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\^?([0-9a-fA-F]{7,64}) (\d+) (\d+)(?: \d+)?$")
        .expect("Invalid blame header regex")
});

/// Regex for a rename status line in `git log --name-status`
/// Format: `R<score>\t<old path>\t<new path>`
static RENAME_STATUS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\d*\t([^\t]+)\t([^\t]+)$").expect("Invalid rename regex"));

/// Parser for git command output
pub struct Parser;
