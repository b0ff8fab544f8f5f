//! Line attribution analysis
//!
//! Attributes every line of a file at a reference point to the author of the
//! commit that last changed it. Lines from commits on the ignore list, and
//! lines from commits older than the analysis window, are attributed to the
//! unknown author.
//!
//! `git blame` follows whole-file renames on its own, but loses track when a
//! rename commit also rewrites much of the file. In that case the lines the
//! rename commit appears to own are matched against a blame of the old path
//! just before the rename, and inherit the older owner when their content is
//! unchanged.

use crate::config::RepoConfiguration;
use crate::git::{GitError, HistorySource};
use crate::git::constants::special;
use crate::git::parser::Parser;
use crate::model::{Author, BlameLine, CommitHash, FileSnapshotResult, LineAttribution};

/// Upper bound on rename hops followed for one file
pub const MAX_RENAME_DEPTH: usize = 32;

/// Attribute each blamed line to an author
///
/// Pure function of its inputs. `line_number` is taken from the blame's
/// final line number, so the output order matches the file.
pub fn attribute_lines(blame: &[BlameLine], config: &RepoConfiguration) -> Vec<LineAttribution> {
    blame
        .iter()
        .map(|line| LineAttribution {
            line_number: line.final_line,
            commit: line.commit.clone(),
            author: line_author(line, config),
            content: line.content.clone(),
        })
        .collect()
}

fn line_author(line: &BlameLine, config: &RepoConfiguration) -> Author {
    if line.boundary || line.commit.is_inside_commit_list(config.ignore_commits()) {
        return Author::unknown();
    }
    config.author(&line.author_name, &line.author_email)
}

/// Hand lines owned by `rename_commit` back to their owners in `prior`
///
/// Owned lines are matched to `prior` lines by exact content, greedily and
/// in order, so a line never matches above an earlier match. Unmatched
/// lines stay with the rename commit.
pub fn stitch_renames(
    current: Vec<BlameLine>,
    prior: &[BlameLine],
    rename_commit: &CommitHash,
) -> Vec<BlameLine> {
    let mut next_prior = 0;

    current
        .into_iter()
        .map(|mut line| {
            if line.boundary || !line.commit.matches(rename_commit) {
                return line;
            }
            let found = prior[next_prior.min(prior.len())..]
                .iter()
                .position(|candidate| candidate.content == line.content);
            if let Some(offset) = found {
                let source = &prior[next_prior + offset];
                line.commit = source.commit.clone();
                line.author_name = source.author_name.clone();
                line.author_email = source.author_email.clone();
                line.original_line = source.original_line;
                line.filename = source.filename.clone();
                line.boundary = source.boundary;
                next_prior += offset + 1;
            }
            line
        })
        .collect()
}

/// Blame `path` at `rev`, following renames the blame did not cross
pub fn blame_following_renames<S: HistorySource + ?Sized>(
    source: &S,
    config: &RepoConfiguration,
    rev: &str,
    path: &str,
) -> Result<Vec<BlameLine>, GitError> {
    blame_at_depth(source, config, rev, path, 0)
}

fn blame_at_depth<S: HistorySource + ?Sized>(
    source: &S,
    config: &RepoConfiguration,
    rev: &str,
    path: &str,
    depth: usize,
) -> Result<Vec<BlameLine>, GitError> {
    let output = source.blame(rev, path, config.since(), config.ignore_whitespace())?;
    let lines = Parser::parse_blame(&output);

    if depth >= MAX_RENAME_DEPTH {
        tracing::warn!(path, depth, "rename chain too long, not following further");
        return Ok(lines);
    }

    let history = source.rename_history(rev, path, config.since(), config.until())?;
    let Some(rename) = Parser::parse_rename_history(&history)
        .into_iter()
        .find(|rename| rename.to == path)
    else {
        return Ok(lines);
    };

    if lines.iter().any(|line| line.filename == rename.from) {
        // blame already crossed this rename
        return Ok(lines);
    }
    if !lines.iter().any(|line| line.commit.matches(&rename.commit)) {
        return Ok(lines);
    }

    let parent = format!("{}{}", rename.commit, special::PARENT_SUFFIX);
    tracing::debug!(from = %rename.from, to = %rename.to, commit = %rename.commit, "stitching rename");

    match blame_at_depth(source, config, &parent, &rename.from, depth + 1) {
        Ok(prior) => Ok(stitch_renames(lines, &prior, &rename.commit)),
        Err(err) => {
            tracing::warn!(
                path = %rename.from,
                rev = %parent,
                error = %err,
                "unable to blame the file before its rename"
            );
            Ok(lines)
        }
    }
}

/// Attribute every line of `path` at `rev`
pub fn analyze_file<S: HistorySource + ?Sized>(
    source: &S,
    config: &RepoConfiguration,
    rev: &str,
    path: &str,
) -> Result<FileSnapshotResult, GitError> {
    let blame = blame_following_renames(source, config, rev, path)?;

    let mut snapshot = FileSnapshotResult::new(path.to_string(), config.file_type(path));
    snapshot.lines = attribute_lines(&blame, config);
    Ok(snapshot)
}
