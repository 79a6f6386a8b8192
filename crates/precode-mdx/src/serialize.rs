//! Write a document tree back to MDX.

use crate::ast::{AttrValue, Attribute, CodeBlock, Document, Node, PreviewKind};

/// Serialize a document to MDX.
///
/// Code blocks are written as self-closing elements whose `codeblock`
/// attribute is a JSON string literal, so the output parses back into the
/// same tree. Blocks under a single-file preview carry `comName` and
/// `filesrc`; all others carry `filename`, `componentname` and `filesrc`.
pub fn to_mdx(doc: &Document) -> String {
    let mut out = String::new();

    if let Some(block) = &doc.frontmatter_block {
        out.push_str(block);
        out.push_str("\n\n");
    }

    write_nodes(&mut out, &doc.children, None);

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

/// `parent` is the kind of the nearest enclosing preview.
fn write_nodes(out: &mut String, nodes: &[Node], parent: Option<PreviewKind>) {
    for node in nodes {
        match node {
            Node::Other(text) => out.push_str(text),
            Node::Element(element) => write_element(
                out,
                &element.name,
                &element.attributes,
                &element.children,
                parent,
            ),
            Node::MultiFilePreview(p) => write_element(
                out,
                &p.tag,
                &p.attributes,
                &p.children,
                Some(PreviewKind::MultiFile),
            ),
            Node::SingleFilePreview(p) => write_element(
                out,
                &p.tag,
                &p.attributes,
                &p.children,
                Some(PreviewKind::SingleFile),
            ),
            Node::CodeBlock(block) => write_code_block(out, block, parent),
        }
        out.push_str("\n\n");
    }
}

fn write_element(
    out: &mut String,
    name: &str,
    attributes: &[Attribute],
    children: &[Node],
    parent: Option<PreviewKind>,
) {
    out.push('<');
    out.push_str(name);
    for attr in attributes {
        write_attribute(out, &attr.name, &attr.value);
    }

    if children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push_str(">\n\n");
    write_nodes(out, children, parent);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_code_block(out: &mut String, block: &CodeBlock, parent: Option<PreviewKind>) {
    let component_name = AttrValue::String(block.component_name.clone());

    out.push('<');
    out.push_str(&block.tag_name);
    write_attribute(out, "codeblock", &AttrValue::Expression(block.content_literal()));
    if parent == Some(PreviewKind::SingleFile) {
        write_attribute(out, "comName", &component_name);
    } else {
        write_attribute(out, "filename", &AttrValue::String(block.file_name.clone()));
        write_attribute(out, "componentname", &component_name);
    }
    write_attribute(out, "filesrc", &AttrValue::String(block.source_path.clone()));
    out.push_str(" />");
}

fn write_attribute(out: &mut String, name: &str, value: &AttrValue) {
    match value {
        AttrValue::Boolean(false) => {}
        AttrValue::Boolean(true) => {
            out.push(' ');
            out.push_str(name);
        }
        // JSX string literals have no escapes; fall back to an expression.
        AttrValue::String(s) if s.contains('"') => {
            let literal = serde_json::Value::String(s.clone()).to_string();
            out.push_str(&format!(" {name}={{{literal}}}"));
        }
        AttrValue::String(s) => out.push_str(&format!(" {name}=\"{s}\"")),
        AttrValue::Expression(expr) => out.push_str(&format!(" {name}={{{expr}}}")),
    }
}
