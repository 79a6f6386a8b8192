//! Non-fatal pipeline failures.

use std::fmt;

use precode_mdx::PreviewKind;

/// Why a placeholder, or one of its files, was not rewritten.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    #[error("<{tag}> has no name attribute")]
    MissingNameAttribute { tag: String },

    #[error("Component not found: {name}")]
    CatalogLookupMiss { name: String },

    #[error("Failed to read {path} for component {name}: {reason}")]
    FileReadFailure {
        name: String,
        path: String,
        reason: String,
    },

    #[error("Malformed catalog entry {name}: {reason}")]
    MalformedCatalogEntry { name: String, reason: String },
}

/// A recorded failure, tagged with the placeholder kind it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: PreviewKind,
    pub error: PreviewError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} preview: {}", self.kind, self.error)
    }
}

/// Diagnostics collected during one document pass.
///
/// Every entry is also logged at `warn` level when recorded, so callers that
/// only read the log see failures in the order they happened.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and store a failure.
    pub fn record(&mut self, kind: PreviewKind, error: PreviewError) {
        match &error {
            PreviewError::MissingNameAttribute { tag } => {
                tracing::warn!(%kind, tag = %tag, "No name found for {}", tag)
            }
            PreviewError::CatalogLookupMiss { name } => {
                tracing::warn!(%kind, name = %name, "Component not found: {}", name)
            }
            PreviewError::FileReadFailure { name, path, reason } => tracing::warn!(
                %kind,
                name = %name,
                path = %path,
                "Error processing component {}: {}",
                name,
                reason
            ),
            PreviewError::MalformedCatalogEntry { name, reason } => {
                tracing::warn!(%kind, name = %name, "Malformed catalog entry {}: {}", name, reason)
            }
        }

        self.entries.push(Diagnostic { kind, error });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
