//! Finding preview placeholders in a document tree.

use precode_mdx::{Document, Node, Placeholder, PreviewKind};

use crate::diagnostics::{Diagnostics, PreviewError};

/// A placeholder with a usable `name`, ready to be rewritten.
#[derive(Debug)]
pub struct PlaceholderMatch<'a> {
    pub kind: PreviewKind,
    pub name: String,
    pub placeholder: &'a mut Placeholder,
}

/// Visit every preview placeholder in depth-first pre-order.
///
/// A placeholder is visited before its children. Placeholders without a
/// `name` are not visited; a [`PreviewError::MissingNameAttribute`] is
/// recorded instead. Code blocks are never matched, so children produced by
/// `visit` are not treated as placeholders.
pub fn for_each_placeholder<F>(doc: &mut Document, diagnostics: &mut Diagnostics, mut visit: F)
where
    F: FnMut(PlaceholderMatch<'_>, &mut Diagnostics),
{
    walk(&mut doc.children, diagnostics, &mut visit);
}

fn walk<F>(nodes: &mut [Node], diagnostics: &mut Diagnostics, visit: &mut F)
where
    F: FnMut(PlaceholderMatch<'_>, &mut Diagnostics),
{
    for node in nodes {
        match node {
            Node::MultiFilePreview(placeholder) => {
                visit_placeholder(PreviewKind::MultiFile, placeholder, diagnostics, visit)
            }
            Node::SingleFilePreview(placeholder) => {
                visit_placeholder(PreviewKind::SingleFile, placeholder, diagnostics, visit)
            }
            Node::Element(element) => walk(&mut element.children, diagnostics, visit),
            Node::CodeBlock(_) | Node::Other(_) => {}
        }
    }
}

fn visit_placeholder<F>(
    kind: PreviewKind,
    placeholder: &mut Placeholder,
    diagnostics: &mut Diagnostics,
    visit: &mut F,
) where
    F: FnMut(PlaceholderMatch<'_>, &mut Diagnostics),
{
    match placeholder.name().map(str::to_string) {
        Some(name) => visit(
            PlaceholderMatch {
                kind,
                name,
                placeholder: &mut *placeholder,
            },
            diagnostics,
        ),
        None => diagnostics.record(
            kind,
            PreviewError::MissingNameAttribute {
                tag: placeholder.tag.clone(),
            },
        ),
    }

    walk(&mut placeholder.children, diagnostics, visit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use precode_mdx::{parse_mdx, CodeBlock};
    use pretty_assertions::assert_eq;

    fn visited(doc: &mut Document) -> (Vec<(PreviewKind, String)>, Diagnostics) {
        let mut seen = Vec::new();
        let mut diagnostics = Diagnostics::new();
        for_each_placeholder(doc, &mut diagnostics, |m, _| seen.push((m.kind, m.name)));
        (seen, diagnostics)
    }

    #[test]
    fn visits_in_document_order() {
        let mut doc = parse_mdx(
            r#"<TabCodePreview name="currency" />

<Tabs>
<DrawerCodePreview name="qr-code" />
<Tab>
<TabCodePreview name="token-list" />
</Tab>
</Tabs>

<DrawerCodePreview name="transaction-processing" />
"#,
        )
        .unwrap();

        let (seen, diagnostics) = visited(&mut doc);

        assert_eq!(
            seen,
            vec![
                (PreviewKind::MultiFile, "currency".to_string()),
                (PreviewKind::SingleFile, "qr-code".to_string()),
                (PreviewKind::MultiFile, "token-list".to_string()),
                (PreviewKind::SingleFile, "transaction-processing".to_string()),
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn visits_parent_before_nested_placeholders() {
        let mut doc = parse_mdx(
            "<TabCodePreview name=\"outer\">\n<DrawerCodePreview name=\"inner\" />\n</TabCodePreview>",
        )
        .unwrap();

        let (seen, _) = visited(&mut doc);

        assert_eq!(seen[0].1, "outer");
        assert_eq!(seen[1].1, "inner");
    }

    #[test]
    fn skips_unnamed_placeholders_with_a_diagnostic() {
        let mut doc = parse_mdx("<TabCodePreview />\n\n<DrawerCodePreview name=\"\" />\n").unwrap();

        let (seen, diagnostics) = visited(&mut doc);

        assert!(seen.is_empty());
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.entries()[0].error,
            PreviewError::MissingNameAttribute {
                tag: "TabCodePreview".to_string()
            }
        );
    }

    #[test]
    fn does_not_revisit_inserted_children() {
        let mut doc = parse_mdx("<TabCodePreview name=\"currency\" />").unwrap();
        let mut diagnostics = Diagnostics::new();
        let mut visits = 0;

        for_each_placeholder(&mut doc, &mut diagnostics, |m, _| {
            visits += 1;
            m.placeholder.children = vec![Node::CodeBlock(CodeBlock {
                tag_name: "PreCode".to_string(),
                content: String::new(),
                file_name: "currency.tsx".to_string(),
                component_name: m.name.clone(),
                source_path: "components/currency.tsx".to_string(),
            })];
        });

        assert_eq!(visits, 1);
        assert_eq!(doc.code_blocks().len(), 1);
    }
}
