//! Loading source files referenced by the catalog.

use std::fs;
use std::path::PathBuf;

/// A source file that could not be read.
#[derive(Debug, thiserror::Error)]
#[error("Failed to read {}: {cause}", .path.display())]
pub struct ReadError {
    /// Path as resolved against the resolver root
    pub path: PathBuf,

    #[source]
    pub cause: std::io::Error,
}

/// Synchronous read access to a content store.
///
/// Paths are relative to a root fixed when the resolver is created.
/// Implementations do not cache.
pub trait FileResolver: Send + Sync {
    /// Read a file as text.
    fn read_file(&self, path: &str) -> Result<String, ReadError>;
}

/// Resolves paths against a directory on disk.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileResolver for FsResolver {
    fn read_file(&self, path: &str) -> Result<String, ReadError> {
        let full_path = self.root.join(path);
        tracing::debug!("Reading {}", full_path.display());

        fs::read_to_string(&full_path).map_err(|cause| ReadError {
            path: full_path,
            cause,
        })
    }
}

/// In-memory resolver for tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default, Clone)]
pub struct MemoryResolver {
    files: std::collections::HashMap<String, String>,
}

#[cfg(any(test, feature = "mock"))]
impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

#[cfg(any(test, feature = "mock"))]
impl FileResolver for MemoryResolver {
    fn read_file(&self, path: &str) -> Result<String, ReadError> {
        self.files.get(path).cloned().ok_or_else(|| ReadError {
            path: PathBuf::from(path),
            cause: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }
}
