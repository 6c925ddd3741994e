//! Rule Selection
//!
//! Each rule pass can be switched off from the command line or the
//! configuration file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The independent rule passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    DuplicateVersions,
    GitConflicts,
    Whitespace,
}

impl Rule {
    pub const ALL: [Rule; 3] = [Rule::DuplicateVersions, Rule::GitConflicts, Rule::Whitespace];

    pub fn name(self) -> &'static str {
        match self {
            Rule::DuplicateVersions => "duplicate-versions",
            Rule::GitConflicts => "git-conflicts",
            Rule::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which rule passes run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleSet {
    pub duplicate_versions: bool,
    pub git_conflicts: bool,
    pub whitespace: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            duplicate_versions: true,
            git_conflicts: true,
            whitespace: true,
        }
    }
}

impl RuleSet {
    pub fn is_enabled(&self, rule: Rule) -> bool {
        match rule {
            Rule::DuplicateVersions => self.duplicate_versions,
            Rule::GitConflicts => self.git_conflicts,
            Rule::Whitespace => self.whitespace,
        }
    }

    pub fn disable(&mut self, rule: Rule) {
        match rule {
            Rule::DuplicateVersions => self.duplicate_versions = false,
            Rule::GitConflicts => self.git_conflicts = false,
            Rule::Whitespace => self.whitespace = false,
        }
    }

    /// Rules that will run, in output order
    pub fn enabled(&self) -> Vec<Rule> {
        Rule::ALL
            .into_iter()
            .filter(|rule| self.is_enabled(*rule))
            .collect()
    }
}
