//! Changelog Parser
//!
//! Splits text into lines and classifies each line once.
//! The rule passes only ever look at the classified sequence.

pub mod classify;
pub mod header;

pub use classify::{classify, is_blank, is_conflict_marker, LineKind};
pub use header::{parse_version_header, VersionHeader};

/// A classified changelog line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangelogLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Raw text without the line terminator
    pub text: &'a str,
    pub kind: LineKind,
}

/// Classify a single line
pub fn parse_line(number: usize, text: &str) -> ChangelogLine<'_> {
    ChangelogLine {
        number,
        text,
        kind: classify(text),
    }
}

/// Classify every line, numbering from 1
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<ChangelogLine<'_>> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| parse_line(idx + 1, line.as_ref()))
        .collect()
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`
///
/// A terminator at the very end does not produce a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(idx) => {
                lines.push(&rest[..idx]);
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}
