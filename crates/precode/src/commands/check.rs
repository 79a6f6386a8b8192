//! Check command: resolve every preview without writing output.

use anyhow::{bail, Context, Result};
use precode_pipeline::PreviewError;
use precode_static::{BuildConfig, StaticBuilder};

/// Run the check command.
pub fn run(config: BuildConfig, strict: bool) -> Result<()> {
    let builder = StaticBuilder::new(BuildConfig {
        write: false,
        ..config
    })
    .context("Failed to set up check")?;
    let result = builder.build().context("Check failed")?;

    for failure in &result.failed {
        println!("{failure}");
    }
    for entry in &result.diagnostics {
        println!("{entry}");
    }

    let misses = result
        .diagnostics
        .iter()
        .filter(|d| matches!(d.diagnostic.error, PreviewError::CatalogLookupMiss { .. }))
        .count();

    println!(
        "{} pages ({} unreadable), {} previews resolved, {} skipped ({} unknown components), {} diagnostics",
        result.pages,
        result.failed.len(),
        result.rewritten,
        result.skipped,
        misses,
        result.diagnostics.len()
    );

    if strict && (!result.diagnostics.is_empty() || !result.failed.is_empty()) {
        bail!(
            "{} diagnostics and {} unreadable pages in strict mode",
            result.diagnostics.len(),
            result.failed.len()
        );
    }

    Ok(())
}
