//! Catalog index and lookup.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// A named source file of a multi-file component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRef {
    /// File name shown above the code block
    #[serde(rename = "name")]
    pub display_name: String,

    /// Path relative to the project root
    #[serde(rename = "filesrc")]
    pub source_path: String,
}

impl FileRef {
    pub fn new(display_name: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            source_path: source_path.into(),
        }
    }
}

/// A documented component.
///
/// A record carries a file list (multi-file form), a registry path
/// (single-file form), or both. Each placeholder kind reads its own field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentRecord {
    /// Unique lookup key
    #[serde(rename = "componentName")]
    pub name: String,

    #[serde(rename = "filesArray", default)]
    files: Option<Vec<FileRef>>,

    #[serde(rename = "filesrc", default)]
    source_path: Option<String>,
}

impl ComponentRecord {
    /// Create a multi-file record.
    pub fn with_files(name: impl Into<String>, files: Vec<FileRef>) -> Self {
        Self {
            name: name.into(),
            files: Some(files),
            source_path: None,
        }
    }

    /// Create a single-file record.
    pub fn with_source(name: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: None,
            source_path: Some(source_path.into()),
        }
    }

    /// Files of the multi-file form, in declared order.
    pub fn files(&self) -> Option<&[FileRef]> {
        self.files.as_deref()
    }

    /// Registry-relative path of the single-file form.
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }
}

/// A group of component records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(rename = "componentArray", default)]
    pub components: Vec<ComponentRecord>,
}

impl Section {
    pub fn new(title: impl Into<String>, components: Vec<ComponentRecord>) -> Self {
        Self {
            title: Some(title.into()),
            components,
        }
    }

    fn label(&self, index: usize) -> String {
        match &self.title {
            Some(title) => format!("\"{}\"", title),
            None => format!("#{}", index + 1),
        }
    }
}

/// Returned when no record has the requested name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Component not found in catalog: {name}")]
pub struct LookupMiss {
    pub name: String,
}

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported catalog format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("Component {name:?} is declared in section {first} and again in section {second}")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    #[error("Component with an empty name in section {section}")]
    EmptyName { section: String },
}

/// The shape of a catalog artifact.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogFile {
    #[serde(rename = "dataArray", default)]
    pub sections: Vec<Section>,
}

/// A validated, read-only catalog of components.
#[derive(Debug, Default)]
pub struct Catalog {
    sections: Vec<Section>,

    /// Component name -> (section index, component index)
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Build a catalog, rejecting empty and duplicate component names.
    pub fn from_sections(sections: Vec<Section>) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, (usize, usize)> = HashMap::new();

        for (s, section) in sections.iter().enumerate() {
            for (c, record) in section.components.iter().enumerate() {
                if record.name.trim().is_empty() {
                    return Err(CatalogError::EmptyName {
                        section: section.label(s),
                    });
                }

                if let Some(&(first, _)) = index.get(&record.name) {
                    return Err(CatalogError::DuplicateName {
                        name: record.name.clone(),
                        first: sections[first].label(first),
                        second: section.label(s),
                    });
                }

                index.insert(record.name.clone(), (s, c));
            }
        }

        Ok(Self { sections, index })
    }

    /// Look up a component by exact name.
    pub fn lookup(&self, name: &str) -> Result<&ComponentRecord, LookupMiss> {
        self.index
            .get(name)
            .map(|&(s, c)| &self.sections[s].components[c])
            .ok_or_else(|| LookupMiss {
                name: name.to_string(),
            })
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All records in catalog order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.sections.iter().flat_map(|s| s.components.iter())
    }

    /// Component names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components().map(|c| c.name.as_str())
    }

    /// Number of components across all sections.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Section> {
        vec![
            Section::new(
                "Web3",
                vec![
                    ComponentRecord::with_files(
                        "currency",
                        vec![FileRef::new("currency.tsx", "components/currency.tsx")],
                    ),
                    ComponentRecord::with_source("qr-code", "components/qr-code/qr-code.tsx"),
                ],
            ),
            Section::new(
                "Lists",
                vec![ComponentRecord::with_files(
                    "token-list",
                    vec![
                        FileRef::new("token-list.tsx", "components/token-list.tsx"),
                        FileRef::new("utils.ts", "lib/utils.ts"),
                    ],
                )],
            ),
        ]
    }

    #[test]
    fn looks_up_across_sections() {
        let catalog = Catalog::from_sections(sample()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec!["currency", "qr-code", "token-list"]
        );

        let record = catalog.lookup("token-list").unwrap();
        let names: Vec<_> = record
            .files()
            .unwrap()
            .iter()
            .map(|f| f.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["token-list.tsx", "utils.ts"]);

        assert_eq!(
            catalog.lookup("qr-code").unwrap().source_path(),
            Some("components/qr-code/qr-code.tsx")
        );
    }

    #[test]
    fn lookup_is_case_sensitive_and_reports_misses() {
        let catalog = Catalog::from_sections(sample()).unwrap();

        assert_eq!(
            catalog.lookup("Currency"),
            Err(LookupMiss {
                name: "Currency".to_string()
            })
        );
        assert!(!catalog.contains("nonexistent"));
    }

    #[test]
    fn rejects_duplicate_names_across_sections() {
        let mut sections = sample();
        sections[1]
            .components
            .push(ComponentRecord::with_source("currency", "components/other.tsx"));

        let err = Catalog::from_sections(sections).unwrap_err();

        match err {
            CatalogError::DuplicateName {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "currency");
                assert_eq!(first, "\"Web3\"");
                assert_eq!(second, "\"Lists\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn keeps_records_without_sources() {
        let sections = vec![Section::new(
            "Docs",
            vec![
                ComponentRecord {
                    name: "intro".to_string(),
                    files: None,
                    source_path: None,
                },
                ComponentRecord::with_source("qr-code", "components/qr-code/qr-code.tsx"),
            ],
        )];

        let catalog = Catalog::from_sections(sections).unwrap();

        let intro = catalog.lookup("intro").unwrap();
        assert_eq!(intro.files(), None);
        assert_eq!(intro.source_path(), None);
        assert!(catalog.contains("qr-code"));
    }

    #[test]
    fn rejects_empty_names() {
        let sections = vec![Section {
            title: None,
            components: vec![ComponentRecord::with_source(" ", "x.tsx")],
        }];

        assert!(matches!(
            Catalog::from_sections(sections),
            Err(CatalogError::EmptyName { section }) if section == "#1"
        ));
    }
}
