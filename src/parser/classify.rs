//! Line Classifier
//!
//! Maps a raw changelog line to exactly one [`LineKind`].
//! No state, no allocation: every predicate looks at the line prefix or
//! matches one of the anchored git conflict patterns.

use regex::Regex;
use std::sync::LazyLock;

static GIT_OURS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<<<<<<< .+$").expect("valid ours marker pattern"));
static GIT_SEPARATOR_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=======$").expect("valid separator pattern"));
static GIT_THEIRS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>>>>>>> .+$").expect("valid theirs marker pattern"));

/// Classification of a single changelog line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `## [1.0.0] - 2019-02-15`
    VersionHeader,
    /// `### Added`
    SectionHeader,
    /// `<<<<<<< HEAD`, `=======` or `>>>>>>> branch`
    ConflictMarker,
    /// Empty or whitespace-only line
    Blank,
    /// `- some change`
    Entry,
    /// Top-level title, reference links and anything else
    Other,
}

/// Classify a raw line (without its terminator)
pub fn classify(line: &str) -> LineKind {
    if is_conflict_marker(line) {
        LineKind::ConflictMarker
    } else if line.starts_with("## ") {
        LineKind::VersionHeader
    } else if line.starts_with("### ") {
        LineKind::SectionHeader
    } else if is_blank(line) {
        LineKind::Blank
    } else if !line.starts_with('#') && !line.starts_with('[') {
        LineKind::Entry
    } else {
        LineKind::Other
    }
}

/// True if the line is one of the three markers git leaves behind after a
/// conflicting merge
pub fn is_conflict_marker(line: &str) -> bool {
    GIT_OURS_MARKER.is_match(line)
        || GIT_SEPARATOR_MARKER.is_match(line)
        || GIT_THEIRS_MARKER.is_match(line)
}

/// Blank after trimming control characters and spaces from both ends
pub fn is_blank(line: &str) -> bool {
    line.trim_matches(|c: char| c <= ' ').is_empty()
}
