//! Documentation builder for code previews.
//!
//! Discovers MDX pages, runs the preview pipeline over each page in parallel,
//! and writes the rewritten pages as MDX or as rendered HTML.

pub mod builder;
pub mod render;
pub mod templates;
pub mod watcher;

pub use builder::{
    BuildConfig, BuildError, BuildResult, OutputFormat, PageDiagnostic, PageFailure, StaticBuilder,
};
pub use watcher::FileWatcher;
