//! Tracked file list parser (git ls-tree -r --name-only -z)

use super::Parser;

impl Parser {
    /// Parse a tracked file list separated by NUL or newline
    pub fn parse_file_list(output: &str) -> Vec<String> {
        output
            .split(['\0', '\n'])
            .map(|path| path.trim_end_matches('\r'))
            .filter(|path| !path.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}
