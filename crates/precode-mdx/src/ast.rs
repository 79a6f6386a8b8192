//! Typed document tree.

use std::fmt;

use crate::frontmatter::Frontmatter;

/// Which kind of code preview a placeholder requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    /// Every file listed for a catalog entry, resolved against the project root.
    MultiFile,
    /// The single registry file of a catalog entry.
    SingleFile,
}

impl PreviewKind {
    /// Short human-readable label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MultiFile => "multi-file",
            Self::SingleFile => "single-file",
        }
    }
}

impl fmt::Display for PreviewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A JSX attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// String literal: name="currency"
    String(String),
    /// Boolean (presence): open
    Boolean(bool),
    /// Expression: codeblock={"..."}
    Expression(String),
}

impl AttrValue {
    /// Get as string if it's a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A named attribute, kept in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

impl Attribute {
    /// Create a string-literal attribute.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AttrValue::String(value.into()),
        }
    }
}

fn find_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a AttrValue> {
    attributes
        .iter()
        .find(|attr| attr.name == name)
        .map(|attr| &attr.value)
}

/// Any flow-level JSX element that is not a preview placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        find_attribute(&self.attributes, name)
    }
}

/// A preview placeholder awaiting rewriting.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Tag name as written in the document
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Placeholder {
    /// Create a placeholder with a `name` attribute and no children.
    pub fn named(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: vec![Attribute::string("name", name)],
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        find_attribute(&self.attributes, name)
    }

    /// The catalog entry this placeholder references.
    ///
    /// Only a non-empty string literal counts; expressions are not evaluated.
    /// The value is used exactly as written.
    pub fn name(&self) -> Option<&str> {
        self.attribute("name")
            .and_then(AttrValue::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Embedded source code produced by rewriting a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Element name used when the block is written back to markup
    pub tag_name: String,

    /// Exact text of the source file
    pub content: String,

    /// Display file name
    pub file_name: String,

    /// Catalog component that owns the file
    pub component_name: String,

    /// Source path as declared in the catalog
    pub source_path: String,
}

impl CodeBlock {
    /// The content as a JSON string literal, safe to embed in a JSX expression.
    pub fn content_literal(&self) -> String {
        serde_json::Value::String(self.content.clone()).to_string()
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    MultiFilePreview(Placeholder),
    SingleFilePreview(Placeholder),
    CodeBlock(CodeBlock),
    /// Raw markdown between tags
    Other(String),
}

impl Node {
    /// The placeholder carried by this node, with its kind.
    pub fn placeholder(&self) -> Option<(PreviewKind, &Placeholder)> {
        match self {
            Node::MultiFilePreview(p) => Some((PreviewKind::MultiFile, p)),
            Node::SingleFilePreview(p) => Some((PreviewKind::SingleFile, p)),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::MultiFilePreview(p) | Node::SingleFilePreview(p) => &p.children,
            Node::CodeBlock(_) | Node::Other(_) => &[],
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Node::subtree_len).sum::<usize>()
    }
}

/// A parsed MDX document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// The frontmatter block as written, including its `---` fences
    pub frontmatter_block: Option<String>,

    /// Top-level nodes
    pub children: Vec<Node>,
}

impl Document {
    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.children.iter().map(Node::subtree_len).sum()
    }

    /// All code blocks in document order.
    pub fn code_blocks(&self) -> Vec<&CodeBlock> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a CodeBlock>) {
            for node in nodes {
                if let Node::CodeBlock(block) = node {
                    out.push(block);
                }
                collect(node.children(), out);
            }
        }

        let mut blocks = Vec::new();
        collect(&self.children, &mut blocks);
        blocks
    }

    /// Page title from frontmatter, if set.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .map(|fm| fm.title.as_str())
            .filter(|title| !title.is_empty())
    }
}
