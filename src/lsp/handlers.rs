use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::lsp::backend::Backend;
use crate::parser::{parse_lines, parse_version_header, split_lines, ChangelogLine, LineKind};
use crate::validation::{validate_document_with, Severity, ValidationMessage};

/// Name reported as the source of every diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "changelog-lint";

/// Trait for handling document symbols
#[tower_lsp::async_trait]
pub trait HandleDocumentSymbol {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Validate a stored document and publish the result
    async fn publish_diagnostics(&self, uri: Url) {
        let (diagnostics, version) = {
            let docs = self.documents.lock().await;
            let Some(doc_state) = docs.get(&uri) else {
                return;
            };

            let result = validate_document_with(&doc_state.content, &self.config.rules);
            let lines = split_lines(&doc_state.content);
            let diagnostics: Vec<Diagnostic> = result
                .iter()
                .map(|message| create_lsp_diagnostic(message, &lines))
                .collect();
            (diagnostics, doc_state.version)
        };

        log::debug!("Publishing {} diagnostic(s) for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }
}

#[tower_lsp::async_trait]
impl HandleDocumentSymbol for Backend {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        Ok(Some(DocumentSymbolResponse::Nested(document_outline(
            &doc_state.content,
        ))))
    }
}

/// Convert a validation message into a whole-line LSP diagnostic
///
/// Messages without a line (unreadable file) are pinned to the first line.
pub fn create_lsp_diagnostic(message: &ValidationMessage, lines: &[&str]) -> Diagnostic {
    let line_idx = message.line().map(|l| l.saturating_sub(1)).unwrap_or(0);
    let end = lines.get(line_idx).map(|text| utf16_len(text)).unwrap_or(0);

    let severity = match message.severity() {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic::new(
        Range::new(
            Position::new(line_idx as u32, 0),
            Position::new(line_idx as u32, end),
        ),
        Some(severity),
        message
            .rule()
            .map(|rule| NumberOrString::String(rule.name().to_string())),
        Some(DIAGNOSTIC_SOURCE.to_string()),
        message.message(),
        None,
        None,
    )
}

/// Version headers with their section headers as children
pub fn document_outline(content: &str) -> Vec<DocumentSymbol> {
    let lines = split_lines(content);
    let parsed = parse_lines(&lines);
    let last = parsed.len().saturating_sub(1);

    let versions: Vec<usize> = header_indices(&parsed, 0..parsed.len(), LineKind::VersionHeader);

    versions
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = versions.get(n + 1).map(|next| next - 1).unwrap_or(last);
            let sections = header_indices(&parsed, start + 1..end + 1, LineKind::SectionHeader);

            let children: Vec<DocumentSymbol> = sections
                .iter()
                .enumerate()
                .map(|(m, &section)| {
                    let section_end = sections.get(m + 1).map(|next| next - 1).unwrap_or(end);
                    let name = header_title(parsed[section].text, "###");
                    create_symbol(name, None, SymbolKind::STRING, section, section_end, &lines)
                })
                .collect();

            let line = parsed[start].text;
            let (name, detail) = match parse_version_header(line) {
                Some(header) => (header.version.to_string(), Some(header.date.to_string())),
                None => (header_title(line, "##"), None),
            };

            let mut symbol = create_symbol(name, detail, SymbolKind::NAMESPACE, start, end, &lines);
            symbol.children = Some(children);
            symbol
        })
        .collect()
}

fn header_indices(
    parsed: &[ChangelogLine<'_>],
    range: std::ops::Range<usize>,
    kind: LineKind,
) -> Vec<usize> {
    range.filter(|&idx| parsed[idx].kind == kind).collect()
}

/// Header text without its hashes; falls back to the raw line if nothing is left
fn header_title(line: &str, hashes: &str) -> String {
    let title = line.trim_start_matches(hashes).trim();
    if title.is_empty() {
        line.trim().to_string()
    } else {
        title.to_string()
    }
}

fn create_symbol(
    name: String,
    detail: Option<String>,
    kind: SymbolKind,
    start: usize,
    end: usize,
    lines: &[&str],
) -> DocumentSymbol {
    let range = Range::new(
        Position::new(start as u32, 0),
        Position::new(end as u32, utf16_len(lines[end])),
    );
    let selection_range = Range::new(
        Position::new(start as u32, 0),
        Position::new(start as u32, utf16_len(lines[start])),
    );

    DocumentSymbol {
        name,
        detail,
        kind,
        tags: None,
        #[allow(deprecated)]
        deprecated: None, // Required by tower-lsp 0.20, use tags instead in future versions
        range,
        selection_range,
        children: None,
    }
}

/// Length of a line in UTF-16 code units, as LSP positions count them
fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}
