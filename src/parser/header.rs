//! Version Header Parsing
//!
//! Extracts the version identifier and release date from lines such as
//! `## [1.0.0] - 2017-06-20`. Headers without a date (e.g. `## [Unreleased]`)
//! do not parse.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##(?-u:\s)+\[(?P<version>.*)\](?-u:\s)+-(?-u:\s)+(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2})$")
        .expect("valid version header pattern")
});

/// A released version header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionHeader<'a> {
    /// Text between the square brackets
    pub version: &'a str,
    /// Release date, `YYYY-MM-DD`, not checked for calendar validity
    pub date: &'a str,
}

/// Parse a full version header line
pub fn parse_version_header(line: &str) -> Option<VersionHeader<'_>> {
    let captures = VERSION_HEADER.captures(line)?;
    Some(VersionHeader {
        version: captures.name("version")?.as_str(),
        date: captures.name("date")?.as_str(),
    })
}
