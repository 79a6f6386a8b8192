//! File watching for rebuilds.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `paths` recursively, dropping events for anything under `ignore`.
    ///
    /// Returns the watcher and a channel receiving each changed path. Paths
    /// that do not exist are skipped.
    pub fn new(
        paths: &[PathBuf],
        ignore: &[PathBuf],
    ) -> Result<(Self, mpsc::Receiver<PathBuf>), std::io::Error> {
        let (raw_tx, raw_rx) = mpsc::channel();
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = raw_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(&absolute(path), RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        let ignore: Vec<PathBuf> = ignore.iter().map(|p| absolute(p)).collect();

        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;
            let debounce_duration = Duration::from_millis(100);

            while let Ok(event) = raw_rx.recv() {
                if !is_change(&event.kind) {
                    continue;
                }

                let paths: Vec<_> = event
                    .paths
                    .iter()
                    .filter(|path| !is_ignored(path, &ignore))
                    .collect();
                if paths.is_empty() {
                    continue;
                }

                // Debounce rapid events
                let now = Instant::now();
                if last_event_time.is_some_and(|last| now.duration_since(last) < debounce_duration) {
                    continue;
                }
                last_event_time = Some(now);

                for path in paths {
                    if tx.send(path.clone()).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, rx))
    }
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_ignored(path: &Path, ignore: &[PathBuf]) -> bool {
    ignore.iter().any(|dir| path.starts_with(dir))
}

/// Content changes only; access events come from the rebuild's own reads.
fn is_change(kind: &notify::EventKind) -> bool {
    use notify::EventKind;

    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}
