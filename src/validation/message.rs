//! Validation Messages
//!
//! Every problem the linter reports is a [`Violation`]; the rendered text is
//! stable and consumers match against it.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::rule::Rule;

/// Severity of a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single problem found in a changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The same version identifier heads more than one release block
    DuplicateVersion { version: String, lines: Vec<usize> },
    /// A marker line left behind by an unresolved git merge
    GitMergeLeftover { line: usize, content: String },
    /// A blank line where none is allowed
    UnexpectedWhitespace { line: usize },
    /// A header that needs a blank line before it
    MissingWhiteLine { line: usize },
    /// The changelog could not be read
    FileNotFound { path: PathBuf },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateVersion { version, lines } => {
                let lines: Vec<String> = lines.iter().map(|n| n.to_string()).collect();
                write!(
                    f,
                    "Version {} appeared multiple lines @ line {}",
                    version,
                    lines.join(", ")
                )
            }
            Violation::GitMergeLeftover { line, content } => {
                write!(f, "Found git merge leftover at line {}: '{}'", line, content)
            }
            Violation::UnexpectedWhitespace { line } => {
                write!(f, "Unexpected whitespace @ line {}", line)
            }
            Violation::MissingWhiteLine { line } => {
                write!(f, "Line {} should be preceded by white line", line)
            }
            Violation::FileNotFound { path } => {
                write!(f, "File does not exist: {}", path.display())
            }
        }
    }
}

/// A validation message as returned by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    violation: Violation,
}

impl ValidationMessage {
    pub fn new(violation: Violation) -> Self {
        Self { violation }
    }

    /// Human-readable text of the message
    pub fn message(&self) -> String {
        self.violation.to_string()
    }

    /// 1-based line the message points at
    ///
    /// For duplicate versions this is the first repeated occurrence, i.e. the
    /// second header carrying the version.
    pub fn line(&self) -> Option<usize> {
        match &self.violation {
            Violation::DuplicateVersion { lines, .. } => lines.get(1).or(lines.first()).copied(),
            Violation::GitMergeLeftover { line, .. }
            | Violation::UnexpectedWhitespace { line }
            | Violation::MissingWhiteLine { line } => Some(*line),
            Violation::FileNotFound { .. } => None,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.violation {
            Violation::UnexpectedWhitespace { .. } | Violation::MissingWhiteLine { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Rule that produced the message, `None` when the file could not be read
    pub fn rule(&self) -> Option<Rule> {
        match self.violation {
            Violation::DuplicateVersion { .. } => Some(Rule::DuplicateVersions),
            Violation::GitMergeLeftover { .. } => Some(Rule::GitConflicts),
            Violation::UnexpectedWhitespace { .. } | Violation::MissingWhiteLine { .. } => {
                Some(Rule::Whitespace)
            }
            Violation::FileNotFound { .. } => None,
        }
    }
}

impl From<Violation> for ValidationMessage {
    fn from(violation: Violation) -> Self {
        Self::new(violation)
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.violation.fmt(f)
    }
}
