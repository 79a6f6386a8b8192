//! `precode.toml` configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use precode_mdx::ParseOptions;
use precode_static::{BuildConfig, OutputFormat};
use serde::Deserialize;

/// Configuration file structure (precode.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Catalog artifact, JSON or YAML
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PathsConfig {
    /// Root for multi-file preview sources
    #[serde(default = "default_project_root")]
    pub project_root: String,
    /// Root for single-file preview sources
    #[serde(default = "default_registry_root")]
    pub registry_root: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            registry_root: default_registry_root(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_multi_file_tag")]
    pub multi_file_tag: String,
    #[serde(default = "default_single_file_tag")]
    pub single_file_tag: String,
    #[serde(default = "default_code_tag")]
    pub code_tag: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            multi_file_tag: default_multi_file_tag(),
            single_file_tag: default_single_file_tag(),
            code_tag: default_code_tag(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct BuildSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_catalog_path() -> String {
    "configs/docs.json".to_string()
}
fn default_project_root() -> String {
    ".".to_string()
}
fn default_registry_root() -> String {
    "registry".to_string()
}
fn default_multi_file_tag() -> String {
    "TabCodePreview".to_string()
}
fn default_single_file_tag() -> String {
    "DrawerCodePreview".to_string()
}
fn default_code_tag() -> String {
    "PreCode".to_string()
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Build settings, with CLI overrides for output directory and format.
    pub fn build_config(&self, output: Option<PathBuf>, format: Option<OutputFormat>) -> BuildConfig {
        BuildConfig {
            docs_dir: PathBuf::from(&self.docs.dir),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.docs.output)),
            catalog_path: PathBuf::from(&self.catalog.path),
            project_root: PathBuf::from(&self.paths.project_root),
            registry_root: PathBuf::from(&self.paths.registry_root),
            parse_options: ParseOptions {
                multi_file_tag: self.preview.multi_file_tag.clone(),
                single_file_tag: self.preview.single_file_tag.clone(),
                code_tag: self.preview.code_tag.clone(),
            },
            format: format.unwrap_or(self.build.format),
            base_url: self.docs.base_url.clone(),
            title: self.docs.title.clone(),
            write: true,
        }
    }
}
