//! Watch command: rebuild on change.

use std::time::Duration;

use anyhow::{Context, Result};
use precode_static::{BuildConfig, FileWatcher, StaticBuilder};

use super::build::log_result;

/// Run the watch command.
pub fn run(config: BuildConfig) -> Result<()> {
    rebuild(&config);

    let paths = vec![
        config.docs_dir.clone(),
        config.catalog_path.clone(),
        config.project_root.clone(),
        config.registry_root.clone(),
    ];
    let (_watcher, events) = FileWatcher::new(&paths, &[config.output_dir.clone()])
        .context("Failed to start file watcher")?;

    tracing::info!("Watching for changes (Ctrl+C to stop)");

    while let Ok(path) = events.recv() {
        tracing::debug!("Change detected: {}", path.display());

        // Coalesce a burst of events into one rebuild
        while events.recv_timeout(Duration::from_millis(200)).is_ok() {}

        rebuild(&config);
    }

    Ok(())
}

/// Full rebuild. The catalog is reloaded every time; failures are logged.
fn rebuild(config: &BuildConfig) {
    let result = StaticBuilder::new(config.clone()).and_then(|builder| builder.build());

    match result {
        Ok(result) => log_result(&result),
        Err(e) => tracing::error!("Rebuild failed: {}", e),
    }
}
