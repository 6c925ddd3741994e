//! Validation Engine
//!
//! Rule passes over classified changelog lines, kept apart from file
//! handling, reporting and LSP concerns.

pub mod conflicts;
pub mod duplicates;
pub mod engine;
pub mod message;
pub mod rule;
pub mod whitespace;

pub use engine::{
    validate, validate_document, validate_document_with, validate_file, validate_file_with,
    validate_with, ValidationResult,
};
pub use message::{Severity, ValidationMessage, Violation};
pub use rule::{Rule, RuleSet};
