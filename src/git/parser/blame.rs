//! Blame output parser (git blame --porcelain / --line-porcelain)

use std::collections::HashMap;

use super::{BLAME_HEADER_REGEX, Parser};
use crate::model::{BlameLine, CommitHash};

/// Commit metadata carried by porcelain header groups
#[derive(Debug, Clone, Default)]
struct CommitMeta {
    author_name: String,
    author_email: String,
    filename: String,
    boundary: bool,
}

/// Position of the line currently being read
struct PendingLine {
    hash: String,
    original_line: usize,
    final_line: usize,
}

impl Parser {
    /// Parse `git blame --line-porcelain` output into blame lines
    ///
    /// Also accepts plain `--porcelain` output, where commit metadata is only
    /// printed the first time a commit appears: metadata is remembered per
    /// commit and reused for later lines.
    ///
    /// Format of one entry:
    /// ```text
    /// <hash> <original_line> <final_line> [<group_size>]
    /// author <name>
    /// author-mail <<email>>
    /// ...
    /// boundary
    /// filename <path>
    /// \t<content>
    /// ```
    pub fn parse_blame(output: &str) -> Vec<BlameLine> {
        let mut lines = Vec::new();
        let mut metas: HashMap<String, CommitMeta> = HashMap::new();
        let mut pending: Option<PendingLine> = None;

        for line in output.lines() {
            if let Some(content) = line.strip_prefix('\t') {
                if let Some(current) = pending.take() {
                    let meta = metas.get(&current.hash).cloned().unwrap_or_default();
                    lines.push(BlameLine {
                        commit: CommitHash::new(&current.hash),
                        author_name: meta.author_name,
                        author_email: meta.author_email,
                        original_line: current.original_line,
                        final_line: current.final_line,
                        filename: meta.filename,
                        boundary: meta.boundary,
                        content: content.to_string(),
                    });
                }
                continue;
            }

            if let Some(header) = Self::parse_blame_header(line) {
                metas.entry(header.hash.clone()).or_default();
                pending = Some(header);
                continue;
            }

            let Some(current) = pending.as_ref() else {
                continue;
            };
            let Some(meta) = metas.get_mut(&current.hash) else {
                continue;
            };

            if line == "boundary" {
                meta.boundary = true;
            } else if let Some(email) = line.strip_prefix("author-mail ") {
                meta.author_email = email
                    .trim()
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string();
            } else if let Some(name) = line.strip_prefix("author ") {
                meta.author_name = name.to_string();
            } else if let Some(filename) = line.strip_prefix("filename ") {
                meta.filename = Self::unquote_path(filename);
            }
        }

        lines
    }

    fn parse_blame_header(line: &str) -> Option<PendingLine> {
        let caps = BLAME_HEADER_REGEX.captures(line)?;

        Some(PendingLine {
            hash: caps.get(1)?.as_str().to_ascii_lowercase(),
            original_line: caps.get(2)?.as_str().parse().ok()?,
            final_line: caps.get(3)?.as_str().parse().ok()?,
        })
    }
}
