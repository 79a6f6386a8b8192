//! Build command.

use anyhow::{Context, Result};
use precode_static::{BuildConfig, BuildResult, StaticBuilder};

/// Run the build command.
pub fn run(config: BuildConfig) -> Result<()> {
    tracing::info!("Building documentation ({})...", config.format);

    let builder = StaticBuilder::new(config).context("Failed to set up build")?;
    let result = builder.build().context("Build failed")?;

    log_result(&result);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

/// Summarize a finished build.
pub fn log_result(result: &BuildResult) {
    tracing::info!(
        "Processed {} pages: {} previews rewritten, {} skipped, {} code blocks in {}ms",
        result.pages,
        result.rewritten,
        result.skipped,
        result.code_blocks,
        result.duration_ms
    );

    for failure in &result.failed {
        tracing::error!("Skipped {}", failure);
    }

    if !result.diagnostics.is_empty() {
        tracing::warn!(
            "{} previews could not be fully resolved",
            result.diagnostics.len()
        );
    }
}
