//! Commit log parser (git log)

use super::super::format::{COMMIT_INFO_MARKER, LOG_SPLITTER};
use super::{MESSAGE_BODY_INDENT_REGEX, Parser};
use crate::model::CommitRecord;

const FIELD_COUNT: usize = 7;
const COMMIT_HASH_INDEX: usize = 0;
const AUTHOR_INDEX: usize = 1;
const EMAIL_INDEX: usize = 2;
const DATE_INDEX: usize = 3;
const MESSAGE_TITLE_INDEX: usize = 4;
const MESSAGE_BODY_INDEX: usize = 5;
const REF_NAME_INDEX: usize = 6;

const REF_SPLITTER: &str = ", ";
const TAG_PREFIX: &str = "tag:";

impl Parser {
    /// Parse the full `git log` stream into commit records
    ///
    /// Each record starts with the `>>>COMMIT INFO<<<` marker line. Text
    /// before the first marker is ignored.
    pub fn parse_commit_log(output: &str) -> Vec<CommitRecord> {
        output
            .split(COMMIT_INFO_MARKER)
            .skip(1)
            .filter(|chunk| !chunk.trim().is_empty())
            .map(|chunk| {
                let (info, stats) = Self::split_record(chunk);
                Self::parse_commit_record(info, stats)
            })
            .collect()
    }

    /// Split one record into its info part and its stats block
    ///
    /// The info part ends at the `|` closing the ref list, which is the end
    /// of the first line after the last field separator. A record whose text
    /// ends there has an empty stats block.
    pub(super) fn split_record(chunk: &str) -> (&str, &str) {
        let chunk = chunk
            .strip_prefix("\r\n")
            .or_else(|| chunk.strip_prefix('\n'))
            .unwrap_or(chunk);

        let fields = Self::split_fields(chunk);
        let refs = match fields.last() {
            Some(refs) if fields.len() == FIELD_COUNT => *refs,
            _ => return (chunk.trim_end(), ""),
        };
        let refs_start = chunk.len() - refs.len();

        match refs.find('\n') {
            Some(pos) => {
                let info = chunk[..refs_start + pos].trim_end_matches('\r');
                let info = info.strip_suffix('|').unwrap_or(info);
                (info, refs[pos + 1..].trim())
            }
            None => {
                let info = chunk.trim_end();
                (info.strip_suffix('|').unwrap_or(info), "")
            }
        }
    }

    /// Parse one record's info part and stats block
    ///
    /// Splits into at most 7 fields, so a stray separator in the last field
    /// stays inside it. Missing fields default to empty strings.
    pub fn parse_commit_record(info: &str, stats: &str) -> CommitRecord {
        let fields = Self::split_fields(info);
        let field = |index: usize| fields.get(index).copied().unwrap_or_default();

        CommitRecord {
            hash: field(COMMIT_HASH_INDEX).trim().to_string(),
            author_name: field(AUTHOR_INDEX).to_string(),
            author_email: field(EMAIL_INDEX).to_string(),
            date: field(DATE_INDEX).to_string(),
            message_title: field(MESSAGE_TITLE_INDEX).to_string(),
            message_body: Self::strip_body_indent(field(MESSAGE_BODY_INDEX)),
            refs: field(REF_NAME_INDEX).to_string(),
            stats: stats.to_string(),
        }
    }

    /// Split on the field separator into at most [`FIELD_COUNT`] fields
    ///
    /// Every field but the body is a single line, so the first separator
    /// after it is the real one. The body is closed by the first separator
    /// that starts a line, since each body line is indented.
    fn split_fields(text: &str) -> Vec<&str> {
        let mut fields = Vec::with_capacity(FIELD_COUNT);
        let mut rest = text;

        while fields.len() < FIELD_COUNT - 1 {
            let end = if fields.len() == MESSAGE_BODY_INDEX {
                body_end(rest)
            } else {
                rest.find(LOG_SPLITTER)
            };
            let Some(end) = end else {
                break;
            };
            fields.push(&rest[..end]);
            rest = &rest[end + LOG_SPLITTER.len()..];
        }

        fields.push(rest);
        fields
    }

    /// Remove exactly 4 leading spaces from each body line that has them
    pub fn strip_body_indent(raw: &str) -> String {
        MESSAGE_BODY_INDENT_REGEX.replace_all(raw, "").into_owned()
    }

    /// Extract tag names from a `%D` ref list
    ///
    /// Returns `None` (never an empty list) when no ref is a tag.
    ///
    /// Examples:
    /// - `"HEAD -> main, tag: v1.0"` -> `Some(["v1.0"])`
    /// - `"HEAD -> main"` -> `None`
    pub fn extract_tags(refs: &str) -> Option<Vec<String>> {
        let tags: Vec<String> = refs
            .split(REF_SPLITTER)
            .filter(|reference| reference.contains(TAG_PREFIX))
            .filter_map(|reference| {
                reference
                    .rfind(TAG_PREFIX)
                    .map(|pos| reference[pos + TAG_PREFIX.len()..].trim().to_string())
            })
            .collect();

        if tags.is_empty() { None } else { Some(tags) }
    }
}

/// Offset of the separator closing the message body
///
/// Falls back to the first separator for a body without a trailing newline.
fn body_end(rest: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = rest[from..].find(LOG_SPLITTER) {
        let pos = from + offset;
        if pos == 0 || rest[..pos].ends_with('\n') {
            return Some(pos);
        }
        from = pos + 1;
    }
    rest.find(LOG_SPLITTER)
}
