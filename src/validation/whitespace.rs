//! Whitespace Pass
//!
//! Enforces blank-line discipline once the body of the changelog starts:
//!
//! ```text
//! ## [1.0.0] - 2017-06-20     <- preceded by a blank line
//! ### Added                   <- directly under the version header
//! - item 1
//! - item 2                    <- no blank lines between entries
//!
//! ### Fixed                   <- preceded by a blank line
//! ```
//!
//! Everything before the first line starting with `##` is the preamble and
//! is never checked.

use super::message::{ValidationMessage, Violation};
use crate::parser::{ChangelogLine, LineKind};

/// At most one message per line, in line order
pub fn check_whitespace(lines: &[ChangelogLine<'_>]) -> Vec<ValidationMessage> {
    let mut messages = Vec::new();
    let mut in_body = false;

    for (idx, line) in lines.iter().enumerate() {
        in_body = in_body || line.text.starts_with("##");
        if !in_body {
            continue;
        }

        let previous = idx.checked_sub(1).map(|i| lines[i].kind);
        let two_back = idx.checked_sub(2).map(|i| lines[i].kind);

        if let Some(violation) = check_line(line, previous, two_back) {
            messages.push(ValidationMessage::new(violation));
        }
    }

    messages
}

/// Checks in priority order; the first one that applies wins
fn check_line(
    line: &ChangelogLine<'_>,
    previous: Option<LineKind>,
    two_back: Option<LineKind>,
) -> Option<Violation> {
    use LineKind::*;

    match (line.kind, previous, two_back) {
        (Entry, Some(Blank), _) => Some(Violation::UnexpectedWhitespace {
            line: line.number - 1,
        }),
        (Blank, Some(Blank), _) => Some(Violation::UnexpectedWhitespace { line: line.number }),
        (VersionHeader, Some(prev), _) if prev != Blank => {
            Some(Violation::MissingWhiteLine { line: line.number })
        }
        // Sections sit directly under their version header; conflict blocks are left alone
        (SectionHeader, Some(prev), _)
            if !matches!(prev, Blank | VersionHeader | ConflictMarker) =>
        {
            Some(Violation::MissingWhiteLine { line: line.number })
        }
        (SectionHeader, Some(Blank), Some(VersionHeader)) => Some(Violation::UnexpectedWhitespace {
            line: line.number - 1,
        }),
        _ => None,
    }
}
