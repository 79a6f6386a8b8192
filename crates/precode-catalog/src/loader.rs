//! Loading catalogs from artifacts on disk.

use std::fs;
use std::path::Path;

use crate::catalog::{Catalog, CatalogError, CatalogFile};

/// Serialization format of a catalog artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl Catalog {
    /// Load and validate a catalog artifact.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let format = CatalogFormat::from_path(path)?;

        let source = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::parse(&source, format, path)?;

        tracing::info!(
            "Loaded {} components in {} sections from {}",
            catalog.len(),
            catalog.sections().len(),
            path.display()
        );

        Ok(catalog)
    }

    /// Parse catalog text. `origin` is only used in error messages.
    pub fn parse(source: &str, format: CatalogFormat, origin: &Path) -> Result<Self, CatalogError> {
        let parse_error = |message: String| CatalogError::Parse {
            path: origin.to_path_buf(),
            message,
        };

        let file: CatalogFile = match format {
            CatalogFormat::Json => {
                serde_json::from_str(source).map_err(|e| parse_error(e.to_string()))?
            }
            CatalogFormat::Yaml => {
                serde_yaml::from_str(source).map_err(|e| parse_error(e.to_string()))?
            }
        };

        Self::from_sections(file.sections)
    }
}
