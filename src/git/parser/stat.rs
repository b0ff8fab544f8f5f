//! Stat block parser (git log --numstat --shortstat)

use regex::Regex;

use super::{BRACE_RENAME_REGEX, DELETION_REGEX, INSERTION_REGEX, Parser};
use crate::model::ContributionStats;

const MOVED_FILE_INDICATION: &str = "=> ";
const BINARY_COUNT: &str = "-";
const QUOTE: char = '"';

/// One per-file line of a numstat block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumstatLine {
    pub stats: ContributionStats,
    /// Destination path, with rename notation resolved
    pub path: String,
    /// git reported `-` counts (binary file)
    pub binary: bool,
}

impl Parser {
    /// Insertion count of a shortstat summary line; 0 when absent
    pub fn parse_insertions(summary: &str) -> u64 {
        Self::number_before(summary, &INSERTION_REGEX)
    }

    /// Deletion count of a shortstat summary line; 0 when absent
    pub fn parse_deletions(summary: &str) -> u64 {
        Self::number_before(summary, &DELETION_REGEX)
    }

    fn number_before(raw: &str, regex: &Regex) -> u64 {
        regex
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    }

    /// Parse a numstat line `<insertions>\t<deletions>\t<path>`
    ///
    /// Binary files (`-\t-\t<path>`) count as zero. Returns `None` for lines
    /// that do not have this shape.
    pub fn parse_numstat_line(line: &str) -> Option<NumstatLine> {
        let mut parts = line.splitn(3, '\t');
        let insertions = parts.next()?.trim();
        let deletions = parts.next()?.trim();
        let path = parts.next()?;

        let binary = insertions == BINARY_COUNT && deletions == BINARY_COUNT;
        let stats = if binary {
            ContributionStats::default()
        } else {
            ContributionStats::new(insertions.parse().ok()?, deletions.parse().ok()?)
        };

        let path = Self::extract_file_path(path);
        if path.is_empty() {
            return None;
        }

        Some(NumstatLine {
            stats,
            path,
            binary,
        })
    }

    /// Resolve the destination path of a possibly renamed file
    ///
    /// Examples:
    /// - `"src/{old => new}/Foo.java"` -> `"src/new/Foo.java"`
    /// - `"{a => }/b.txt"` -> `"b.txt"`
    /// - `"a/b.txt => a/c.txt"` -> `"a/c.txt"`
    /// - `"oldName => newPos/{movedFile.java}"` -> `"newPos/movedFile.java"`
    /// - `"q\"a.rs" => "q\"b.rs"` (quoted) -> `q"b.rs`
    pub fn extract_file_path(raw: &str) -> String {
        let raw = raw.trim();

        if let Some(caps) = BRACE_RENAME_REGEX.captures(raw) {
            let joined = format!("{}{}{}", &caps[1], &caps[2], &caps[3]);
            return collapse_slashes(&joined);
        }

        match raw.find(MOVED_FILE_INDICATION) {
            Some(pos) => {
                let moved: String = raw[pos + MOVED_FILE_INDICATION.len()..]
                    .chars()
                    .filter(|&c| c != '{' && c != '}')
                    .collect();
                Self::unquote_path(moved.trim())
            }
            None => Self::unquote_path(raw),
        }
    }

    /// Undo git's C-style quoting of a path
    ///
    /// Paths that are not wrapped in double quotes are returned unchanged.
    ///
    /// Example: `"caf\303\251.java"` -> `café.java`
    pub fn unquote_path(raw: &str) -> String {
        let Some(inner) = raw
            .strip_prefix(QUOTE)
            .and_then(|rest| rest.strip_suffix(QUOTE))
        else {
            return raw.to_string();
        };

        let mut bytes = Vec::with_capacity(inner.len());
        let mut iter = inner.bytes().peekable();
        while let Some(byte) = iter.next() {
            if byte != b'\\' {
                bytes.push(byte);
                continue;
            }
            match iter.next() {
                Some(b'a') => bytes.push(0x07),
                Some(b'b') => bytes.push(0x08),
                Some(b'f') => bytes.push(0x0c),
                Some(b'n') => bytes.push(b'\n'),
                Some(b'r') => bytes.push(b'\r'),
                Some(b't') => bytes.push(b'\t'),
                Some(b'v') => bytes.push(0x0b),
                Some(digit @ b'0'..=b'3') => {
                    let mut value = digit - b'0';
                    for _ in 0..2 {
                        match iter.peek() {
                            Some(&next @ b'0'..=b'7') => {
                                value = value * 8 + (next - b'0');
                                iter.next();
                            }
                            _ => break,
                        }
                    }
                    bytes.push(value);
                }
                Some(other) => bytes.push(other),
                None => bytes.push(b'\\'),
            }
        }

        String::from_utf8_lossy(&bytes).into_owned()
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.trim_start_matches('/').to_string()
}
