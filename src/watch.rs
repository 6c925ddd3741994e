//! File Watching
//!
//! Re-checks changelogs when they change on disk. Parent directories are
//! watched rather than the files themselves so that editors replacing a file
//! on save are still picked up.

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// Quiet period used to coalesce the bursts of events a single save produces
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Events forwarded from the notify callback
#[derive(Debug)]
pub enum WatchEvent {
    Changed(PathBuf),
    Error(notify::Error),
}

/// Watches a fixed set of changelog files
pub struct ChangelogWatcher {
    files: Vec<PathBuf>,
    rx: mpsc::UnboundedReceiver<WatchEvent>,
    _watcher: RecommendedWatcher,
}

impl ChangelogWatcher {
    pub fn new(files: &[PathBuf]) -> Result<Self> {
        let files: Vec<PathBuf> = files.iter().map(|f| normalize(f)).collect();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                        for path in event.paths {
                            let _ = tx.send(WatchEvent::Changed(path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e));
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        let dirs: BTreeSet<&Path> = files.iter().filter_map(|f| f.parent()).collect();
        for dir in dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", dir.display()))?;
        }

        Ok(Self {
            files,
            rx,
            _watcher: watcher,
        })
    }

    /// Files being watched, as absolute paths
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_watched(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.files.iter().any(|f| *f == path)
    }

    /// Wait for the next batch of changes to watched files
    ///
    /// Returns `None` once the watcher has shut down.
    pub async fn changed(&mut self) -> Option<BTreeSet<PathBuf>> {
        let mut changed = BTreeSet::new();

        while changed.is_empty() {
            let event = self.rx.recv().await?;
            self.record(event, &mut changed);
        }

        // Coalesce the rest of the burst
        while let Ok(Some(event)) = tokio::time::timeout(DEBOUNCE, self.rx.recv()).await {
            self.record(event, &mut changed);
        }

        Some(changed)
    }

    fn record(&self, event: WatchEvent, changed: &mut BTreeSet<PathBuf>) {
        match event {
            WatchEvent::Changed(path) => {
                if self.is_watched(&path) {
                    log::debug!("Changelog changed: {}", path.display());
                    changed.insert(normalize(&path));
                }
            }
            WatchEvent::Error(e) => log::warn!("File watcher error: {}", e),
        }
    }
}

/// Absolute, symlink-resolved path when possible
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    // The file may not exist yet; resolve its directory instead
    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = parent.canonicalize() {
            return parent.join(name);
        }
    }
    absolute
}
