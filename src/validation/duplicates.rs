//! Duplicate Version Pass
//!
//! Reports version identifiers that head more than one release block.

use std::collections::HashMap;

use super::message::{ValidationMessage, Violation};
use crate::parser::{parse_version_header, ChangelogLine};

/// One message per version identifier found on two or more header lines
///
/// Only full `## [version] - YYYY-MM-DD` headers count. Messages are ordered
/// by the first occurrence of each version.
pub fn check_duplicate_versions(lines: &[ChangelogLine<'_>]) -> Vec<ValidationMessage> {
    let mut occurrences: HashMap<&str, Vec<usize>> = HashMap::new();

    for line in lines {
        if !line.text.starts_with("##") {
            continue;
        }
        if let Some(header) = parse_version_header(line.text) {
            occurrences
                .entry(header.version)
                .or_default()
                .push(line.number);
        }
    }

    let mut duplicates: Vec<(&str, Vec<usize>)> = occurrences
        .into_iter()
        .filter(|(_, numbers)| numbers.len() > 1)
        .collect();
    duplicates.sort_by_key(|(_, numbers)| numbers[0]);

    duplicates
        .into_iter()
        .map(|(version, lines)| {
            log::trace!("version {} repeated on lines {:?}", version, lines);
            ValidationMessage::new(Violation::DuplicateVersion {
                version: version.to_string(),
                lines,
            })
        })
        .collect()
}
