//! Comment extraction from Python source lines.
//!
//! This is the pure half of the pipeline: an ordered sequence of raw source
//! lines goes in, an ordered batch of postable comment strings comes out.
//! No file or network I/O happens here, which keeps the grammar exhaustively
//! unit-testable.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::logutil::preview;

/// Maximum length of a posted status, in characters. Longer comments are
/// truncated, never rejected.
pub const MAX_COMMENT_LEN: usize = 140;

// Match all hashes followed by a character. If it is an !, don't match
// (keeps shebang lines out). The filter then removes the hashes plus any
// run of non-space characters glued to them; only leading spaces are
// stripped afterwards, trailing whitespace stays as-is.
static COMMENT_MATCHER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+[^!]").unwrap());
static COMMENT_FILTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#+[^ ]*").unwrap());

/// Errors produced while collecting comments.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("No comments found to post.")]
    NoCommentsFound,
}

/// Collect the comment lines out of `lines`, in order.
///
/// A line qualifies when it starts with one or more `#` characters followed
/// by anything other than `!`. The leading hash run and any non-space
/// characters attached to it are removed, then leading spaces (only spaces)
/// are stripped. The original trailing whitespace, including the line
/// terminator, is preserved verbatim.
///
/// A comment may come out empty when the line reduces to nothing under the
/// grammar; such comments are kept. An entirely empty batch is an error:
/// there is nothing to post, and the caller should stop before any delivery
/// is attempted.
pub fn extract_comments<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, ExtractError> {
    let mut comments = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if !COMMENT_MATCHER.is_match(line) {
            continue;
        }

        let filtered = COMMENT_FILTER.replace(line, "");
        let mut comment = filtered.trim_start_matches(' ').to_string();

        if comment.chars().count() > MAX_COMMENT_LEN {
            warn!(
                "Comment is too long, truncating to {} characters: {}",
                MAX_COMMENT_LEN,
                preview(&comment)
            );
            comment = comment.chars().take(MAX_COMMENT_LEN).collect();
        }
        comments.push(comment);
    }

    if comments.is_empty() {
        return Err(ExtractError::NoCommentsFound);
    }

    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_one(line: &str) -> String {
        let out = extract_comments(&[line]).expect("line should yield a comment");
        assert_eq!(out.len(), 1);
        out.into_iter().next().unwrap()
    }

    #[test]
    fn test_basic_comment_line() {
        assert_eq!(extract_one("# Basic line"), "Basic line");
    }

    #[test]
    fn test_shebang_line_excluded() {
        assert!(matches!(
            extract_comments(&["#! Script syntax"]),
            Err(ExtractError::NoCommentsFound)
        ));
    }

    #[test]
    fn test_multiple_hashes() {
        assert_eq!(extract_one("#### Multiple hashes"), "Multiple hashes");
    }

    #[test]
    fn test_leading_whitespace_stripped() {
        assert_eq!(extract_one("#     Leading space"), "Leading space");
    }

    #[test]
    fn test_embedded_newline_preserved() {
        assert_eq!(extract_one("# \n Newline"), "\n Newline");
    }

    #[test]
    fn test_embedded_tab_preserved() {
        assert_eq!(extract_one("# \t Tab"), "\t Tab");
    }

    #[test]
    fn test_docstring_line_skipped() {
        assert!(matches!(
            extract_comments(&["\"\"\"Docstring\"\"\""]),
            Err(ExtractError::NoCommentsFound)
        ));
    }

    #[test]
    fn test_hash_glued_text_consumed_up_to_space() {
        // The filter eats the hashes plus the non-space run stuck to them.
        assert_eq!(extract_one("#glued rest of line"), "rest of line");
        assert_eq!(extract_one("#glued"), "");
    }

    #[test]
    fn test_trailing_whitespace_preserved() {
        assert_eq!(extract_one("# padded   "), "padded   ");
        assert_eq!(extract_one("# terminated\n"), "terminated\n");
    }

    #[test]
    fn test_non_comment_lines_skipped() {
        let lines = [
            "import os",
            "",
            "# keep me",
            "x = 1  # not a comment line",
            "    # indented comments do not qualify",
        ];
        let comments = extract_comments(&lines).unwrap();
        assert_eq!(comments, vec!["keep me".to_string()]);
    }

    #[test]
    fn test_long_comment_truncated() {
        let body: String = "a".repeat(200);
        let line = format!("# {}", body);
        let comment = extract_one(&line);
        assert_eq!(comment.chars().count(), MAX_COMMENT_LEN);
        assert_eq!(comment, "a".repeat(MAX_COMMENT_LEN));
    }

    #[test]
    fn test_exactly_max_length_untouched() {
        let body: String = "b".repeat(MAX_COMMENT_LEN);
        assert_eq!(extract_one(&format!("# {}", body)), body);
    }

    #[test]
    fn test_ordering_preserved() {
        let lines = ["# first", "code()", "# second", "# third"];
        let comments = extract_comments(&lines).unwrap();
        assert_eq!(comments, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let lines = ["# one", "#! skip", "#### two", "not a comment"];
        let first = extract_comments(&lines).unwrap();
        let second = extract_comments(&lines).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let lines: [&str; 0] = [];
        assert!(matches!(
            extract_comments(&lines),
            Err(ExtractError::NoCommentsFound)
        ));
    }
}
