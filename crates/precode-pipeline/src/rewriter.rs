//! Replacing placeholder children with code blocks.

use std::path::Path;

use precode_catalog::{Catalog, ComponentRecord};
use precode_mdx::{CodeBlock, Node, PreviewKind};

use crate::diagnostics::{Diagnostics, PreviewError};
use crate::matcher::PlaceholderMatch;
use crate::resolver::FileResolver;

/// What happened to a single placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Children were replaced with this many code blocks
    Rewritten { blocks: usize },
    /// The placeholder was left untouched
    Skipped,
}

/// Read-only inputs shared by every rewrite in a pass.
pub(crate) struct Sources<'a> {
    pub catalog: &'a Catalog,
    pub project: &'a dyn FileResolver,
    pub registry: &'a dyn FileResolver,
    pub code_tag: &'a str,
}

/// Rewrite one placeholder according to its kind.
pub(crate) fn rewrite(
    sources: &Sources<'_>,
    m: PlaceholderMatch<'_>,
    diagnostics: &mut Diagnostics,
) -> Resolution {
    match m.kind {
        PreviewKind::MultiFile => rewrite_with(sources, m, diagnostics, multi_file_blocks),
        PreviewKind::SingleFile => rewrite_with(sources, m, diagnostics, single_file_blocks),
    }
}

/// Look up the placeholder's component, build its code blocks with `build`,
/// and install them as the placeholder's children.
///
/// `build` returns `None` to leave the placeholder unchanged.
fn rewrite_with<F>(
    sources: &Sources<'_>,
    m: PlaceholderMatch<'_>,
    diagnostics: &mut Diagnostics,
    build: F,
) -> Resolution
where
    F: FnOnce(&Sources<'_>, &ComponentRecord, &mut Diagnostics) -> Option<Vec<CodeBlock>>,
{
    let record = match sources.catalog.lookup(&m.name) {
        Ok(record) => record,
        Err(miss) => {
            diagnostics.record(m.kind, PreviewError::CatalogLookupMiss { name: miss.name });
            return Resolution::Skipped;
        }
    };

    match build(sources, record, diagnostics) {
        Some(blocks) => {
            let count = blocks.len();
            m.placeholder.children = blocks.into_iter().map(Node::CodeBlock).collect();
            Resolution::Rewritten { blocks: count }
        }
        None => Resolution::Skipped,
    }
}

/// One block per listed file, read from the project root. Unreadable files are
/// skipped without affecting their siblings.
fn multi_file_blocks(
    sources: &Sources<'_>,
    record: &ComponentRecord,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<CodeBlock>> {
    let files = match record.files() {
        Some(files) if !files.is_empty() => files,
        Some(_) => {
            diagnostics.record(
                PreviewKind::MultiFile,
                malformed(record, "filesArray is empty"),
            );
            return Some(Vec::new());
        }
        None => {
            diagnostics.record(
                PreviewKind::MultiFile,
                malformed(record, "no filesArray for a multi-file preview"),
            );
            return Some(Vec::new());
        }
    };

    let blocks = files
        .iter()
        .filter_map(|file| match sources.project.read_file(&file.source_path) {
            Ok(content) => Some(CodeBlock {
                tag_name: sources.code_tag.to_string(),
                content,
                file_name: file.display_name.clone(),
                component_name: record.name.clone(),
                source_path: file.source_path.clone(),
            }),
            Err(err) => {
                diagnostics.record(
                    PreviewKind::MultiFile,
                    PreviewError::FileReadFailure {
                        name: record.name.clone(),
                        path: file.source_path.clone(),
                        reason: err.to_string(),
                    },
                );
                None
            }
        })
        .collect();

    Some(blocks)
}

/// Exactly one block, read from the registry root.
fn single_file_blocks(
    sources: &Sources<'_>,
    record: &ComponentRecord,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<CodeBlock>> {
    let Some(source_path) = record.source_path() else {
        diagnostics.record(
            PreviewKind::SingleFile,
            malformed(record, "no filesrc for a single-file preview"),
        );
        return None;
    };

    match sources.registry.read_file(source_path) {
        Ok(content) => Some(vec![CodeBlock {
            tag_name: sources.code_tag.to_string(),
            content,
            file_name: display_name(source_path),
            component_name: record.name.clone(),
            source_path: source_path.to_string(),
        }]),
        Err(err) => {
            diagnostics.record(
                PreviewKind::SingleFile,
                PreviewError::FileReadFailure {
                    name: record.name.clone(),
                    path: source_path.to_string(),
                    reason: err.to_string(),
                },
            );
            None
        }
    }
}

fn malformed(record: &ComponentRecord, reason: &str) -> PreviewError {
    PreviewError::MalformedCatalogEntry {
        name: record.name.clone(),
        reason: reason.to_string(),
    }
}

/// Last path component of a registry path.
fn display_name(source_path: &str) -> String {
    Path::new(source_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MemoryResolver;
    use precode_catalog::{FileRef, Section};
    use precode_mdx::Placeholder;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::from_sections(vec![Section::new(
            "Components",
            vec![
                ComponentRecord::with_files(
                    "token-list",
                    vec![
                        FileRef::new("token-list.tsx", "components/token-list.tsx"),
                        FileRef::new("tokens.ts", "components/tokens.ts"),
                        FileRef::new("utils.ts", "lib/utils.ts"),
                    ],
                ),
                ComponentRecord::with_files("empty", vec![]),
                ComponentRecord::with_source("qr-code", "components/qr-code/qr-code.tsx"),
            ],
        )])
        .unwrap()
    }

    fn run(
        kind: PreviewKind,
        name: &str,
        project: &MemoryResolver,
        registry: &MemoryResolver,
    ) -> (Resolution, Placeholder, Diagnostics) {
        let catalog = catalog();
        let sources = Sources {
            catalog: &catalog,
            project,
            registry,
            code_tag: "PreCode",
        };
        let mut placeholder = Placeholder::named("Preview", name);
        placeholder.children = vec![Node::Other("loading".to_string())];
        let mut diagnostics = Diagnostics::new();

        let resolution = rewrite(
            &sources,
            PlaceholderMatch {
                kind,
                name: name.to_string(),
                placeholder: &mut placeholder,
            },
            &mut diagnostics,
        );

        (resolution, placeholder, diagnostics)
    }

    #[test]
    fn skips_only_the_unreadable_file() {
        let project = MemoryResolver::new()
            .with_file("components/token-list.tsx", "list")
            .with_file("lib/utils.ts", "utils");

        let (resolution, placeholder, diagnostics) = run(
            PreviewKind::MultiFile,
            "token-list",
            &project,
            &MemoryResolver::new(),
        );

        assert_eq!(resolution, Resolution::Rewritten { blocks: 2 });
        let names: Vec<_> = placeholder
            .children
            .iter()
            .map(|node| match node {
                Node::CodeBlock(block) => block.file_name.as_str(),
                other => panic!("unexpected child {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["token-list.tsx", "utils.ts"]);

        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics.entries()[0].error,
            PreviewError::FileReadFailure { path, .. } if path == "components/tokens.ts"
        ));
    }

    #[test]
    fn empty_file_list_produces_no_blocks() {
        let (resolution, placeholder, diagnostics) = run(
            PreviewKind::MultiFile,
            "empty",
            &MemoryResolver::new(),
            &MemoryResolver::new(),
        );

        assert_eq!(resolution, Resolution::Rewritten { blocks: 0 });
        assert!(placeholder.children.is_empty());
        assert!(matches!(
            diagnostics.entries()[0].error,
            PreviewError::MalformedCatalogEntry { .. }
        ));
    }

    #[test]
    fn single_file_reads_from_registry_root() {
        let project =
            MemoryResolver::new().with_file("components/qr-code/qr-code.tsx", "wrong root");
        let registry = MemoryResolver::new().with_file("components/qr-code/qr-code.tsx", "qr");

        let (resolution, placeholder, diagnostics) =
            run(PreviewKind::SingleFile, "qr-code", &project, &registry);

        assert_eq!(resolution, Resolution::Rewritten { blocks: 1 });
        assert!(diagnostics.is_empty());
        assert_eq!(
            placeholder.children,
            vec![Node::CodeBlock(CodeBlock {
                tag_name: "PreCode".to_string(),
                content: "qr".to_string(),
                file_name: "qr-code.tsx".to_string(),
                component_name: "qr-code".to_string(),
                source_path: "components/qr-code/qr-code.tsx".to_string(),
            })]
        );
    }

    #[test]
    fn single_file_read_failure_leaves_children() {
        let (resolution, placeholder, diagnostics) = run(
            PreviewKind::SingleFile,
            "qr-code",
            &MemoryResolver::new(),
            &MemoryResolver::new(),
        );

        assert_eq!(resolution, Resolution::Skipped);
        assert_eq!(placeholder.children, vec![Node::Other("loading".to_string())]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn kind_mismatch_is_malformed() {
        let (resolution, _, diagnostics) = run(
            PreviewKind::SingleFile,
            "token-list",
            &MemoryResolver::new(),
            &MemoryResolver::new(),
        );

        assert_eq!(resolution, Resolution::Skipped);
        assert!(matches!(
            &diagnostics.entries()[0].error,
            PreviewError::MalformedCatalogEntry { name, .. } if name == "token-list"
        ));
    }

    #[test]
    fn lookup_miss_leaves_children() {
        let (resolution, placeholder, diagnostics) = run(
            PreviewKind::MultiFile,
            "nonexistent",
            &MemoryResolver::new(),
            &MemoryResolver::new(),
        );

        assert_eq!(resolution, Resolution::Skipped);
        assert_eq!(placeholder.children.len(), 1);
        assert_eq!(
            diagnostics.entries()[0].error,
            PreviewError::CatalogLookupMiss {
                name: "nonexistent".to_string()
            }
        );
    }
}
