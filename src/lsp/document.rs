/// State for each open changelog
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    pub content: String,
    /// Version number sent by the client, echoed back with diagnostics
    pub version: i32,
}
