//! Changelog Lint
//!
//! A linter and language server for "Keep a Changelog" style Markdown files.
//!
//! This library provides:
//! - Line classification of changelog text
//! - Validation rules: duplicate versions, git merge leftovers, whitespace
//! - Text and JSON reporting
//! - LSP protocol implementation
//! - Configuration management

pub mod config;
pub mod lsp;
pub mod parser;
pub mod report;
pub mod validation;
pub mod watch;

// Re-exports for clean public API
pub use config::Config;
pub use parser::{classify, parse_line, ChangelogLine, LineKind};
pub use validation::{
    validate, validate_document, validate_file, ValidationMessage, ValidationResult,
};
