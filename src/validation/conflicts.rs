//! Git Conflict Marker Pass

use super::message::{ValidationMessage, Violation};
use crate::parser::{ChangelogLine, LineKind};

/// One message per leftover merge marker, in line order
pub fn check_conflict_markers(lines: &[ChangelogLine<'_>]) -> Vec<ValidationMessage> {
    lines
        .iter()
        .filter(|line| line.kind == LineKind::ConflictMarker)
        .map(|line| {
            ValidationMessage::new(Violation::GitMergeLeftover {
                line: line.number,
                content: line.text.to_string(),
            })
        })
        .collect()
}
