//! Report Rendering
//!
//! Formats validation results for one or more changelogs as plain text or
//! JSON.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::validation::{Rule, Severity, ValidationResult};

/// Output format of the command-line linter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Validation result of a single file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: ValidationResult,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, result: ValidationResult) -> Self {
        Self {
            path: path.into(),
            result,
        }
    }
}

/// True when none of the files produced a message
pub fn all_valid(reports: &[FileReport]) -> bool {
    reports.iter().all(|r| r.result.is_valid())
}

/// One reported problem, as serialized to JSON
#[derive(Debug, Serialize)]
struct JsonMessage<'a> {
    file: &'a Path,
    line: Option<usize>,
    severity: Severity,
    rule: Option<Rule>,
    message: String,
}

pub fn render(reports: &[FileReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(reports)),
        OutputFormat::Json => render_json(reports),
    }
}

/// `path:line: severity: message` per problem, then a summary line
pub fn render_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    let mut total = 0;

    for report in reports {
        for message in &report.result {
            total += 1;
            match message.line() {
                Some(line) => out.push_str(&format!(
                    "{}:{}: {}: {}\n",
                    report.path.display(),
                    line,
                    message.severity(),
                    message
                )),
                None => out.push_str(&format!(
                    "{}: {}: {}\n",
                    report.path.display(),
                    message.severity(),
                    message
                )),
            }
        }
    }

    out.push_str(&format!(
        "{} problem(s) in {} file(s)\n",
        total,
        reports.len()
    ));
    out
}

pub fn render_json(reports: &[FileReport]) -> Result<String> {
    let messages: Vec<JsonMessage<'_>> = reports
        .iter()
        .flat_map(|report| {
            report.result.iter().map(move |message| JsonMessage {
                file: &report.path,
                line: message.line(),
                severity: message.severity(),
                rule: message.rule(),
                message: message.message(),
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&messages)?)
}
