use anyhow::Result;
use std::thread;
use std::time::Duration;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::Config;

/// Start the LSP server on stdin/stdout
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;
    config.init_logging();

    log::info!(
        "Starting changelog-ls with rules: {:?}",
        config.rules.enabled()
    );

    // Under the integration test, exit after a short delay so the test can read stdout to EOF
    if std::env::var("CHANGELOG_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(2));
            std::process::exit(0);
        });
    }

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config.clone())).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
