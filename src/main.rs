use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;

use changelog_lint::config::Config;
use changelog_lint::report::{self, FileReport};
use changelog_lint::validation::validate_file_with;
use changelog_lint::watch::ChangelogWatcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("changelog-lint: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every file passed the first check
async fn run() -> Result<bool> {
    // Parse configuration from command line and config files
    let config = Config::from_args_and_env()?;
    config.init_logging();

    let reports = lint(&config, &config.files);
    print!("{}", report::render(&reports, config.format)?);
    let valid = report::all_valid(&reports);

    if config.watch {
        watch(&config).await?;
    }

    Ok(valid)
}

fn lint(config: &Config, files: &[PathBuf]) -> Vec<FileReport> {
    files
        .iter()
        .map(|path| FileReport::new(path.clone(), validate_file_with(path, &config.rules)))
        .collect()
}

/// Re-check changed files until interrupted
async fn watch(config: &Config) -> Result<()> {
    let mut watcher = ChangelogWatcher::new(&config.files)?;
    log::info!("Watching {} file(s) for changes", watcher.files().len());

    loop {
        tokio::select! {
            changed = watcher.changed() => {
                let Some(changed) = changed else {
                    break;
                };
                let files: Vec<PathBuf> = changed.into_iter().collect();
                let reports = lint(config, &files);
                print!("{}", report::render(&reports, config.format)?);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
