use super::*;
use crate::model::{CommitHash, ContributionStats};

const HASH_A: &str = "404db2d6fdb7d7fe744ae35c0b666cc04308458e";
const HASH_B: &str = "46f790a17155fe18ff33792032efbe3d2beb1b92";

const LOG_OUTPUT: &str = ">>>COMMIT INFO<<<
46f790a17155fe18ff33792032efbe3d2beb1b92|
|Jane|
|jane@x.com|
|2020-01-02T09:30:00|
|Move Foo|
||
|HEAD -> master|
1\t0\t{src => newPos}/Foo.java
 1 file changed, 1 insertion(+)

>>>COMMIT INFO<<<
3a4c7a8cd9e7e8a0581e3f99963b959936c38f98|
|Jane|
|jane@x.com|
|2020-01-01T12:00:00|
|empty|
||
||
>>>COMMIT INFO<<<
404db2d6fdb7d7fe744ae35c0b666cc04308458e|
|Jane|
|jane@x.com|
|2020-01-01T10:00:00|
|Fix bug|
|    line one
    line two |
    x
|
|tag: v1.0|
3\t1\tsrc/Foo.java
 1 file changed, 3 insertions(+), 1 deletion(-)";

#[test]
fn test_parse_commit_log_splits_records() {
    let records = Parser::parse_commit_log(LOG_OUTPUT);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].hash, HASH_B);
    assert_eq!(records[1].hash, "3a4c7a8cd9e7e8a0581e3f99963b959936c38f98");
    assert_eq!(records[2].hash, HASH_A);
}

#[test]
fn test_parse_commit_log_fields() {
    let records = Parser::parse_commit_log(LOG_OUTPUT);
    let record = &records[2];

    assert_eq!(record.author_name, "Jane");
    assert_eq!(record.author_email, "jane@x.com");
    assert_eq!(record.date, "2020-01-01T10:00:00");
    assert_eq!(record.message_title, "Fix bug");
    assert_eq!(record.message_body, "line one\nline two |\nx\n");
    assert_eq!(record.refs, "tag: v1.0");
    assert_eq!(
        record.stats,
        "3\t1\tsrc/Foo.java\n 1 file changed, 3 insertions(+), 1 deletion(-)"
    );
}

#[test]
fn test_parse_commit_log_empty_commit_has_no_stats() {
    let records = Parser::parse_commit_log(LOG_OUTPUT);
    let record = &records[1];

    assert_eq!(record.message_title, "empty");
    assert_eq!(record.message_body, "");
    assert_eq!(record.refs, "");
    assert_eq!(record.stats, "");
}

#[test]
fn test_parse_commit_log_empty_commit_at_end_of_stream() {
    let output = ">>>COMMIT INFO<<<\nabcd123|\n|Jane|\n|jane@x.com|\n|2020-01-01T10:00:00|\n|t|\n||\n|HEAD -> main|";
    let records = Parser::parse_commit_log(output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].refs, "HEAD -> main");
    assert_eq!(records[0].stats, "");
}

#[test]
fn test_parse_commit_log_ignores_leading_noise() {
    let records = Parser::parse_commit_log("warning: something\n");
    assert!(records.is_empty());
    assert!(Parser::parse_commit_log("").is_empty());
}

#[test]
fn test_parse_commit_record_short_record_defaults_to_empty() {
    let record = Parser::parse_commit_record("abcd123|\n|Jane", "");
    assert_eq!(record.hash, "abcd123");
    assert_eq!(record.author_name, "Jane");
    assert_eq!(record.author_email, "");
    assert_eq!(record.date, "");
    assert_eq!(record.message_title, "");
    assert_eq!(record.message_body, "");
    assert_eq!(record.refs, "");
}

#[test]
fn test_parse_commit_record_bounded_field_count() {
    // A separator inside the last field must not create an eighth field
    let info = "h|\n|n|\n|e|\n|d|\n|t|\n|b|\n|tag: v1|\n|tag: v2";
    let record = Parser::parse_commit_record(info, "");
    assert_eq!(record.refs, "tag: v1|\n|tag: v2");
}

#[test]
fn test_parse_commit_log_body_ending_with_pipe() {
    let output = ">>>COMMIT INFO<<<\nabcd123|\n|Jane|\n|jane@x.com|\n|2020-01-01T10:00:00|\n|T|\n|    use a | b |\n|\n|HEAD -> main|\n";
    let records = Parser::parse_commit_log(output);
    assert_eq!(records[0].message_body, "use a | b |\n");
    assert_eq!(records[0].refs, "HEAD -> main");
}

#[test]
fn test_parse_commit_log_path_ending_with_pipe() {
    let output = ">>>COMMIT INFO<<<\nabcd123|\n|Jane|\n|jane@x.com|\n|2020-01-01T10:00:00|\n|T|\n||\n||\n\n\
                  2\t0\tx.rs\n1\t0\tweird|\n 2 files changed, 3 insertions(+)\n";
    let records = Parser::parse_commit_log(output);
    assert_eq!(records[0].refs, "");
    assert_eq!(
        records[0].stats,
        "2\t0\tx.rs\n1\t0\tweird|\n 2 files changed, 3 insertions(+)"
    );
}

#[test]
fn test_strip_body_indent_only_removes_four_spaces() {
    assert_eq!(Parser::strip_body_indent("    a\n      b\n  c"), "a\n  b\n  c");
    assert_eq!(Parser::strip_body_indent(""), "");
}

#[test]
fn test_extract_tags() {
    assert_eq!(
        Parser::extract_tags("HEAD -> main, tag: v1.0"),
        Some(vec!["v1.0".to_string()])
    );
    assert_eq!(
        Parser::extract_tags("tag: v2.0, tag: v2.0-rc1, origin/main"),
        Some(vec!["v2.0".to_string(), "v2.0-rc1".to_string()])
    );
}

#[test]
fn test_extract_tags_absent_not_empty() {
    assert_eq!(Parser::extract_tags("HEAD -> main"), None);
    assert_eq!(Parser::extract_tags(""), None);
}

#[test]
fn test_parse_summary_counts() {
    let summary = " 2 files changed, 4 insertions(+), 1 deletion(-)";
    assert_eq!(Parser::parse_insertions(summary), 4);
    assert_eq!(Parser::parse_deletions(summary), 1);
}

#[test]
fn test_parse_summary_missing_phrase_is_zero() {
    let summary = " 1 file changed, 3 insertions(+)";
    assert_eq!(Parser::parse_insertions(summary), 3);
    assert_eq!(Parser::parse_deletions(summary), 0);
    assert_eq!(Parser::parse_insertions(" 1 file changed, 2 deletions(-)"), 0);
}

#[test]
fn test_parse_numstat_line() {
    let line = Parser::parse_numstat_line("3\t1\tsrc/Foo.java").unwrap();
    assert_eq!(line.stats, ContributionStats::new(3, 1));
    assert_eq!(line.path, "src/Foo.java");
    assert!(!line.binary);
}

#[test]
fn test_parse_numstat_line_binary() {
    let line = Parser::parse_numstat_line("-\t-\tassets/logo.png").unwrap();
    assert_eq!(line.stats, ContributionStats::default());
    assert!(line.binary);
}

#[test]
fn test_parse_numstat_line_malformed() {
    assert!(Parser::parse_numstat_line("garbage").is_none());
    assert!(Parser::parse_numstat_line("x\t1\tfile").is_none());
    assert!(Parser::parse_numstat_line("1\t1\t").is_none());
}

#[test]
fn test_extract_file_path_plain() {
    assert_eq!(Parser::extract_file_path("src/Foo.java"), "src/Foo.java");
}

#[test]
fn test_extract_file_path_moved() {
    assert_eq!(Parser::extract_file_path("a/b.txt => a/c.txt"), "a/c.txt");
    assert_eq!(
        Parser::extract_file_path("oldName => newPos/{movedFile.java}"),
        "newPos/movedFile.java"
    );
}

#[test]
fn test_extract_file_path_brace_shorthand() {
    assert_eq!(
        Parser::extract_file_path("src/{old => new}/Foo.java"),
        "src/new/Foo.java"
    );
    assert_eq!(Parser::extract_file_path("{src => newPos}/Foo.java"), "newPos/Foo.java");
    assert_eq!(Parser::extract_file_path("a/{b => }/c.txt"), "a/c.txt");
    assert_eq!(Parser::extract_file_path("a/{ => b}/c.txt"), "a/b/c.txt");
    assert_eq!(Parser::extract_file_path("docs/{a.md => b.md}"), "docs/b.md");
}

#[test]
fn test_extract_file_path_quoted() {
    assert_eq!(Parser::extract_file_path("\"caf\\303\\251.java\""), "café.java");
    assert_eq!(Parser::extract_file_path("\"q\\\"uote.rs\""), "q\"uote.rs");
    assert_eq!(
        Parser::extract_file_path("\"q\\\"uote.rs\" => \"n\\\"ew.rs\""),
        "n\"ew.rs"
    );
}

#[test]
fn test_parse_numstat_line_quoted_path_keeps_extension() {
    let line = Parser::parse_numstat_line("1\t0\t\"src/caf\\303\\251.java\"").unwrap();
    assert_eq!(line.path, "src/café.java");
}

#[test]
fn test_unquote_path_escapes() {
    assert_eq!(Parser::unquote_path("plain.rs"), "plain.rs");
    assert_eq!(Parser::unquote_path("\"a\\tb\\\\c\""), "a\tb\\c");
    assert_eq!(Parser::unquote_path("\""), "\"");
}

fn porcelain_entry(hash: &str, original: usize, line: usize, author: &str, extra: &str, content: &str) -> String {
    format!(
        "{hash} {original} {line} 1\n\
         author {author}\n\
         author-mail <{author_lower}@x.com>\n\
         author-time 1517904000\n\
         author-tz +0800\n\
         committer {author}\n\
         committer-mail <{author_lower}@x.com>\n\
         committer-time 1517904000\n\
         committer-tz +0800\n\
         summary Some change\n\
         {extra}\
         filename blameTest.java\n\
         \t{content}\n",
        author_lower = author.to_lowercase()
    )
}

#[test]
fn test_parse_blame_line_porcelain() {
    let output = format!(
        "{}{}",
        porcelain_entry(HASH_A, 1, 1, "Jane", "", "class Foo {"),
        porcelain_entry(HASH_B, 5, 2, "John", "previous abc blameTest.java\n", "    int x;")
    );

    let lines = Parser::parse_blame(&output);
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0].commit, CommitHash::new(HASH_A));
    assert_eq!(lines[0].author_name, "Jane");
    assert_eq!(lines[0].author_email, "jane@x.com");
    assert_eq!(lines[0].final_line, 1);
    assert_eq!(lines[0].filename, "blameTest.java");
    assert_eq!(lines[0].content, "class Foo {");
    assert!(!lines[0].boundary);

    assert_eq!(lines[1].commit, CommitHash::new(HASH_B));
    assert_eq!(lines[1].author_name, "John");
    assert_eq!(lines[1].original_line, 5);
    assert_eq!(lines[1].final_line, 2);
    assert_eq!(lines[1].content, "    int x;");
}

#[test]
fn test_parse_blame_boundary() {
    let output = porcelain_entry(HASH_A, 1, 1, "Jane", "boundary\n", "a");
    let lines = Parser::parse_blame(&output);
    assert!(lines[0].boundary);
}

#[test]
fn test_parse_blame_plain_porcelain_reuses_metadata() {
    let mut output = porcelain_entry(HASH_A, 1, 1, "Jane", "", "first");
    output.push_str(&format!("{HASH_A} 2 2\n\tsecond\n"));

    let lines = Parser::parse_blame(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].author_name, "Jane");
    assert_eq!(lines[1].author_email, "jane@x.com");
    assert_eq!(lines[1].filename, "blameTest.java");
    assert_eq!(lines[1].content, "second");
}

#[test]
fn test_parse_blame_empty_content_line() {
    let output = porcelain_entry(HASH_A, 1, 1, "Jane", "", "");
    let lines = Parser::parse_blame(&output);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].content, "");
}

#[test]
fn test_parse_blame_quoted_filename() {
    let output = porcelain_entry(HASH_A, 1, 1, "Jane", "", "a")
        .replace("filename blameTest.java", "filename \"q\\\"a.rs\"");
    let lines = Parser::parse_blame(&output);
    assert_eq!(lines[0].filename, "q\"a.rs");
}

#[test]
fn test_parse_blame_ignores_content_without_header() {
    assert!(Parser::parse_blame("\torphan line\n").is_empty());
    assert!(Parser::parse_blame("").is_empty());
}

#[test]
fn test_parse_rename_history() {
    let output = format!(
        "commit {HASH_B}\n\nR100\tsrc/Foo.java\tnewPos/Foo.java\ncommit {HASH_A}\n\nR087\told/Foo.java\tsrc/Foo.java\n"
    );
    let events = Parser::parse_rename_history(&output);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].commit, CommitHash::new(HASH_B));
    assert_eq!(events[0].from, "src/Foo.java");
    assert_eq!(events[0].to, "newPos/Foo.java");
    assert_eq!(events[1].from, "old/Foo.java");
}

#[test]
fn test_parse_rename_history_quoted_paths() {
    let output = format!("commit {HASH_A}\n\nR100\t\"q\\\"a.rs\"\t\"q\\\"b.rs\"\n");
    let events = Parser::parse_rename_history(&output);
    assert_eq!(events[0].from, "q\"a.rs");
    assert_eq!(events[0].to, "q\"b.rs");
}

#[test]
fn test_parse_rename_history_skips_other_statuses() {
    let output = format!("commit {HASH_A}\n\nM\tsrc/Foo.java\nA\tsrc/Bar.java\n");
    assert!(Parser::parse_rename_history(&output).is_empty());
}

#[test]
fn test_parse_file_list() {
    assert_eq!(
        Parser::parse_file_list("a.txt\0src/b c.rs\0"),
        vec!["a.txt".to_string(), "src/b c.rs".to_string()]
    );
    assert_eq!(
        Parser::parse_file_list("a.txt\nb.txt\n"),
        vec!["a.txt".to_string(), "b.txt".to_string()]
    );
    assert!(Parser::parse_file_list("").is_empty());
}
