//! Documentation builder.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Deserialize;
use walkdir::WalkDir;

use precode_catalog::{Catalog, CatalogError};
use precode_mdx::{parse_mdx_with, to_mdx, Document, Frontmatter, ParseOptions};
use precode_pipeline::{Diagnostic, DocumentReport, FsResolver, Pipeline};

use crate::render::render_html;
use crate::templates::{Context, TemplateEngine};

/// What the builder writes for each page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered HTML pages
    #[default]
    Html,
    /// Rewritten MDX, mirroring the docs tree
    Mdx,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "mdx" => Ok(Self::Mdx),
            other => Err(format!("unknown output format '{other}' (expected html or mdx)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Mdx => f.write_str("mdx"),
        }
    }
}

/// Configuration for a build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Catalog artifact (`docs.json` or YAML)
    pub catalog_path: PathBuf,

    /// Root for multi-file preview sources
    pub project_root: PathBuf,

    /// Root for single-file preview sources
    pub registry_root: PathBuf,

    /// Placeholder and code block tag names
    pub parse_options: ParseOptions,

    pub format: OutputFormat,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Write pages to `output_dir`. When false the build only reports.
    pub write: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            catalog_path: PathBuf::from("configs/docs.json"),
            project_root: PathBuf::from("."),
            registry_root: PathBuf::from("registry"),
            parse_options: ParseOptions::default(),
            format: OutputFormat::Html,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            write: true,
        }
    }
}

/// A diagnostic together with the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDiagnostic {
    /// Page path relative to the docs directory
    pub page: PathBuf,
    pub diagnostic: Diagnostic,
}

impl fmt::Display for PageDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.page.display(), self.diagnostic)
    }
}

/// A page that could not be read or parsed. It is left out of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Page path relative to the docs directory
    pub page: PathBuf,
    pub message: String,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.page.display(), self.message)
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages processed
    pub pages: usize,

    /// Placeholders whose children were replaced
    pub rewritten: usize,

    /// Placeholders left unchanged
    pub skipped: usize,

    /// Code blocks produced
    pub code_blocks: usize,

    /// Diagnostics from every page, in page order
    pub diagnostics: Vec<PageDiagnostic>,

    /// Pages skipped because they could not be read or parsed
    pub failed: Vec<PageFailure>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that abort a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Relative path from docs dir
    relative_path: PathBuf,

    /// Parsed document, rewritten in place
    doc: Document,
}

/// Builds a docs directory through the preview pipeline.
pub struct StaticBuilder {
    config: BuildConfig,
    pipeline: Pipeline,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a builder. Loads the catalog, which is the only fatal input.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let catalog = Catalog::load(&config.catalog_path)?;

        let pipeline = Pipeline::new(
            Arc::new(catalog),
            FsResolver::new(&config.project_root),
            FsResolver::new(&config.registry_root),
        )
        .with_code_tag(config.parse_options.code_tag.clone());

        Ok(Self {
            config,
            pipeline,
            templates: TemplateEngine::new(),
        })
    }

    /// Process every page and, unless disabled, write the output.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let (mut pages, failed) = self.discover_pages()?;
        tracing::info!("Processing {} pages", pages.len());

        if self.config.write {
            fs::create_dir_all(&self.config.output_dir)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        let reports: Vec<Result<DocumentReport, BuildError>> = pages
            .par_iter_mut()
            .map(|page| self.build_page(page))
            .collect();

        let mut result = BuildResult {
            pages: 0,
            rewritten: 0,
            skipped: 0,
            code_blocks: 0,
            diagnostics: Vec::new(),
            failed,
            duration_ms: 0,
            output_dir: self.config.output_dir.clone(),
        };

        for (page, report) in pages.iter().zip(reports) {
            let report = report?;
            result.pages += 1;
            result.rewritten += report.rewritten();
            result.skipped += report.skipped();
            result.code_blocks += report.code_blocks();
            result
                .diagnostics
                .extend(report.diagnostics.into_iter().map(|diagnostic| PageDiagnostic {
                    page: page.relative_path.clone(),
                    diagnostic,
                }));
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// Discover and parse all MDX pages, sorted by path.
    ///
    /// A page that fails to read or parse is reported and skipped so the rest
    /// of the site still builds.
    fn discover_pages(&self) -> Result<(Vec<PageInfo>, Vec<PageFailure>), BuildError> {
        let mut pages = Vec::new();
        let mut failed = Vec::new();

        if !self.config.docs_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                self.config.docs_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.docs_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let relative_path = path
                .strip_prefix(&self.config.docs_dir)
                .unwrap_or(path)
                .to_path_buf();

            let parsed = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read: {e}"))
                .and_then(|content| {
                    parse_mdx_with(&content, &self.config.parse_options)
                        .map_err(|e| format!("Failed to parse MDX: {e}"))
                });

            match parsed {
                Ok(doc) => pages.push(PageInfo { relative_path, doc }),
                Err(message) => {
                    tracing::warn!(page = %relative_path.display(), "{}", message);
                    failed.push(PageFailure {
                        page: relative_path,
                        message,
                    });
                }
            }
        }

        Ok((pages, failed))
    }

    /// Rewrite one page and write its output.
    fn build_page(&self, page: &mut PageInfo) -> Result<DocumentReport, BuildError> {
        let path = page.relative_path.display().to_string();
        let _span = tracing::info_span!("page", path = %path).entered();

        let report = self.pipeline.process(&mut page.doc);
        tracing::debug!(
            rewritten = report.rewritten(),
            skipped = report.skipped(),
            "Processed page"
        );

        if !self.config.write {
            return Ok(report);
        }

        let (output_path, contents) = match self.config.format {
            OutputFormat::Mdx => (
                self.config.output_dir.join(&page.relative_path),
                to_mdx(&page.doc),
            ),
            OutputFormat::Html => (
                self.calculate_output_path(&page.relative_path, &page.doc.frontmatter),
                self.render_page(page)?,
            ),
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&output_path, contents).map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(report)
    }

    fn render_page(&self, page: &PageInfo) -> Result<String, BuildError> {
        let content = render_html(&page.doc, &self.templates)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let title = page.doc.title().map(str::to_string).unwrap_or_else(|| {
            page.relative_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let context = Context {
            title,
            site_title: self.config.title.clone(),
            description: page
                .doc
                .frontmatter
                .as_ref()
                .and_then(|f| f.description.clone()),
            content,
            base_url: self.config.base_url.clone(),
        };

        self.templates
            .render_page("doc.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))
    }

    /// Calculate the HTML output path for a page.
    fn calculate_output_path(&self, relative: &Path, frontmatter: &Option<Frontmatter>) -> PathBuf {
        if let Some(slug) = frontmatter.as_ref().and_then(|fm| fm.slug.as_ref()) {
            return self.config.output_dir.join(slug).join("index.html");
        }

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let parent = relative.parent().unwrap_or(Path::new(""));

        if stem == "index" {
            // docs/index.mdx -> dist/index.html
            self.config.output_dir.join(parent).join("index.html")
        } else {
            // docs/currency.mdx -> dist/currency/index.html
            self.config
                .output_dir
                .join(parent)
                .join(stem)
                .join("index.html")
        }
    }
}
