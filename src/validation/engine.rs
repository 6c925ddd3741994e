//! Validation Engine
//!
//! Runs the rule passes over one classified line sequence and concatenates
//! their messages: duplicate versions, then git conflict markers, then
//! whitespace.

use std::fs;
use std::path::Path;

use super::conflicts::check_conflict_markers;
use super::duplicates::check_duplicate_versions;
use super::message::{Severity, ValidationMessage, Violation};
use super::rule::{Rule, RuleSet};
use super::whitespace::check_whitespace;
use crate::parser::{parse_lines, split_lines};

/// Ordered messages produced for one changelog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: ValidationMessage) {
        self.messages.push(message);
    }

    /// A changelog is valid only when nothing at all was reported
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationMessage> {
        self.messages.iter()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity() == severity)
            .count()
    }
}

impl Extend<ValidationMessage> for ValidationResult {
    fn extend<T: IntoIterator<Item = ValidationMessage>>(&mut self, iter: T) {
        self.messages.extend(iter);
    }
}

impl IntoIterator for ValidationResult {
    type Item = ValidationMessage;
    type IntoIter = std::vec::IntoIter<ValidationMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ValidationMessage;
    type IntoIter = std::slice::Iter<'a, ValidationMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Validate changelog lines (without terminators) with every rule enabled
pub fn validate<S: AsRef<str>>(lines: &[S]) -> ValidationResult {
    validate_with(lines, &RuleSet::default())
}

/// Validate changelog lines with a selection of rules
pub fn validate_with<S: AsRef<str>>(lines: &[S], rules: &RuleSet) -> ValidationResult {
    let lines = parse_lines(lines);
    let mut result = ValidationResult::new();

    for rule in rules.enabled() {
        let messages = match rule {
            Rule::DuplicateVersions => check_duplicate_versions(&lines),
            Rule::GitConflicts => check_conflict_markers(&lines),
            Rule::Whitespace => check_whitespace(&lines),
        };
        log::trace!("{} produced {} message(s)", rule, messages.len());
        result.extend(messages);
    }

    log::debug!(
        "validated {} line(s): {} message(s)",
        lines.len(),
        result.len()
    );
    result
}

/// Validate the full text of a changelog
pub fn validate_document(content: &str) -> ValidationResult {
    validate_document_with(content, &RuleSet::default())
}

pub fn validate_document_with(content: &str, rules: &RuleSet) -> ValidationResult {
    validate_with(&split_lines(content), rules)
}

/// Validate a changelog on disk
///
/// A file that cannot be read yields a single "File does not exist" message
/// and no other checks run.
pub fn validate_file(path: impl AsRef<Path>) -> ValidationResult {
    validate_file_with(path, &RuleSet::default())
}

pub fn validate_file_with(path: impl AsRef<Path>, rules: &RuleSet) -> ValidationResult {
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::debug!("Failed to read {}: {}", path.display(), e);
            let mut result = ValidationResult::new();
            result.push(ValidationMessage::new(Violation::FileNotFound {
                path: path.to_path_buf(),
            }));
            return result;
        }
    };

    // Malformed UTF-8 is not an error; such lines simply match no rule
    let content = String::from_utf8_lossy(&bytes);
    validate_document_with(&content, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.push(Violation::UnexpectedWhitespace { line: 3 }.into());
        assert!(!result.is_valid()); // Warnings also fail a changelog
        assert_eq!(result.count_by_severity(Severity::Warning), 1);
        assert_eq!(result.count_by_severity(Severity::Error), 0);
    }

    #[test]
    fn test_empty_input() {
        let lines: [&str; 0] = [];
        assert!(validate(&lines).is_empty());
        assert!(validate_document("").is_empty());
    }

    #[test]
    fn test_passes_are_concatenated_in_order() {
        let result = validate(&[
            "# Changelog",
            "",
            "## [1.0.0] - 2017-06-20",
            "### Added",
            "- a",
            "=======",
            "- b",
            "",
            "",
            "## [1.0.0] - 2017-06-20",
        ]);
        let messages: Vec<String> = result.iter().map(|m| m.message()).collect();
        assert_eq!(
            messages,
            vec![
                "Version 1.0.0 appeared multiple lines @ line 3, 10",
                "Found git merge leftover at line 6: '======='",
                "Unexpected whitespace @ line 9",
            ]
        );
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let lines = ["## [1.0.0] - 2017-06-20", "<<<<<<< HEAD", "- a", "", "- b"];

        let mut rules = RuleSet::default();
        rules.disable(Rule::GitConflicts);
        let result = validate_with(&lines, &rules);

        assert_eq!(result.len(), 1);
        assert_eq!(result.messages[0].rule(), Some(Rule::Whitespace));
    }

    #[test]
    fn test_document_with_crlf_line_endings() {
        let result = validate_document("## [1.0.0] - 2017-06-20\r\n### Added\r\n- a\r\n\r\n- b\r\n");
        assert_eq!(result.len(), 1);
        assert_eq!(result.messages[0].message(), "Unexpected whitespace @ line 4");
    }

    #[test]
    fn test_missing_file() {
        let result = validate_file("does/not/exist/CHANGELOG.md");
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.messages[0].message(),
            "File does not exist: does/not/exist/CHANGELOG.md"
        );
    }
}
