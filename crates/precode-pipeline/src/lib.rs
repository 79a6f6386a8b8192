//! Code-preview pipeline.
//!
//! Rewrites preview placeholders in a parsed document into code blocks that
//! embed the source files registered for a component:
//!
//! ```text
//! Document → Tag matcher (finds placeholders, pre-order)
//!          → Catalog lookup (name → record)
//!          → File resolver (record paths → file text)
//!          → Node rewriter (placeholder children → code blocks)
//! ```
//!
//! Failures never escape a document pass. Each one becomes a [`Diagnostic`]
//! and the placeholder (or the single file) is skipped.

pub mod diagnostics;
pub mod matcher;
pub mod pipeline;
pub mod resolver;
pub mod rewriter;

pub use diagnostics::{Diagnostic, Diagnostics, PreviewError};
pub use matcher::{for_each_placeholder, PlaceholderMatch};
pub use pipeline::{DocumentReport, Pipeline, PlaceholderReport};
#[cfg(any(test, feature = "mock"))]
pub use resolver::MemoryResolver;
pub use resolver::{FileResolver, FsResolver, ReadError};
pub use rewriter::Resolution;
