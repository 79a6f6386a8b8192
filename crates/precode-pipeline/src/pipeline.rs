//! Per-document driver.

use std::sync::Arc;

use precode_catalog::Catalog;
use precode_mdx::{Document, PreviewKind};

use crate::diagnostics::{Diagnostic, Diagnostics, PreviewError};
use crate::matcher::for_each_placeholder;
use crate::resolver::FileResolver;
use crate::rewriter::{rewrite, Resolution, Sources};

/// Outcome of one named placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderReport {
    pub kind: PreviewKind,
    pub name: String,
    pub resolution: Resolution,
}

/// Result of processing a document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Named placeholders in traversal order
    pub placeholders: Vec<PlaceholderReport>,

    /// Every failure recorded during the pass
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentReport {
    /// Placeholders whose children were replaced.
    pub fn rewritten(&self) -> usize {
        self.placeholders
            .iter()
            .filter(|p| matches!(p.resolution, Resolution::Rewritten { .. }))
            .count()
    }

    /// Placeholders left unchanged, including unnamed ones.
    pub fn skipped(&self) -> usize {
        let unnamed = self
            .diagnostics
            .iter()
            .filter(|d| matches!(d.error, PreviewError::MissingNameAttribute { .. }))
            .count();
        self.placeholders.len() - self.rewritten() + unnamed
    }

    /// Code blocks produced across all placeholders.
    pub fn code_blocks(&self) -> usize {
        self.placeholders
            .iter()
            .map(|p| match p.resolution {
                Resolution::Rewritten { blocks } => blocks,
                Resolution::Skipped => 0,
            })
            .sum()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Rewrites preview placeholders using a shared catalog and two file roots.
///
/// Multi-file previews resolve against the project resolver, single-file
/// previews against the registry resolver. The pipeline holds no mutable
/// state, so one instance can process many documents from many threads.
pub struct Pipeline {
    catalog: Arc<Catalog>,
    project: Box<dyn FileResolver>,
    registry: Box<dyn FileResolver>,
    code_tag: String,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(
        catalog: Arc<Catalog>,
        project: impl FileResolver + 'static,
        registry: impl FileResolver + 'static,
    ) -> Self {
        Self {
            catalog,
            project: Box::new(project),
            registry: Box::new(registry),
            code_tag: "PreCode".to_string(),
        }
    }

    /// Set the element name given to produced code blocks.
    #[must_use]
    pub fn with_code_tag(mut self, code_tag: impl Into<String>) -> Self {
        self.code_tag = code_tag.into();
        self
    }

    /// Rewrite every placeholder in `doc`.
    ///
    /// Never fails: a placeholder that cannot be resolved is left as it was and
    /// the reason is recorded in the report.
    pub fn process(&self, doc: &mut Document) -> DocumentReport {
        let sources = Sources {
            catalog: &self.catalog,
            project: self.project.as_ref(),
            registry: self.registry.as_ref(),
            code_tag: &self.code_tag,
        };

        let mut diagnostics = Diagnostics::new();
        let mut placeholders = Vec::new();

        for_each_placeholder(doc, &mut diagnostics, |m, diagnostics| {
            let kind = m.kind;
            let name = m.name.clone();
            tracing::debug!("Resolving {} preview {}", kind, name);

            let resolution = rewrite(&sources, m, diagnostics);
            placeholders.push(PlaceholderReport {
                kind,
                name,
                resolution,
            });
        });

        DocumentReport {
            placeholders,
            diagnostics: diagnostics.into_vec(),
        }
    }
}
