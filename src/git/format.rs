//! git output formats for stable parsing
//!
//! These formats ensure consistent, parseable output from git commands
//! regardless of user configuration.

/// Separator between fields of one commit record
pub const LOG_SPLITTER: &str = "|\n|";

/// Line that starts every commit record in the log stream
pub const COMMIT_INFO_MARKER: &str = ">>>COMMIT INFO<<<";

/// Prefix of the commit lines in rename history output
pub const RENAME_COMMIT_PREFIX: &str = "commit ";

/// Formats for git commands
pub struct Formats;

impl Formats {
    /// Pretty format for `git log`
    ///
    /// Fields (joined by `|\n|`):
    /// 1. full hash
    /// 2. author name (mailmap applied)
    /// 3. author email (mailmap applied)
    /// 4. author date, formatted by [`Formats::log_date`]
    /// 5. subject
    /// 6. body, every line indented by 4 spaces
    /// 7. ref names (`%D`)
    ///
    /// Notes:
    /// - The body indentation keeps a body line starting with `|` from
    ///   forming a field separator. `%w(0,0,0)` resets wrapping so the
    ///   separator after the body starts its own line, even when the last
    ///   body line ends with `|`.
    /// - The record ends with `|`; numstat and shortstat lines follow it.
    pub fn log() -> &'static str {
        concat!(
            "--pretty=format:>>>COMMIT INFO<<<%n",
            "%H|%n|",
            "%aN|%n|",
            "%aE|%n|",
            "%ad|%n|",
            "%s|%n|",
            "%w(0,4,4)%b%w(0,0,0)|%n|",
            "%D|"
        )
    }

    /// Date format for `git log` (strict local ISO 8601, no timezone)
    pub fn log_date() -> &'static str {
        "--date=format:%Y-%m-%dT%H:%M:%S"
    }

    /// Pretty format for `git log --follow` rename history
    pub fn rename_history() -> &'static str {
        "--format=commit %H"
    }
}
