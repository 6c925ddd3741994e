//! LSP Protocol Implementation
//!
//! Publishes validation messages as editor diagnostics and exposes the
//! version/section outline of a changelog.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
