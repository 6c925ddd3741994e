use anyhow::Result;
use changelog_lint::lsp::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    serve().await
}
