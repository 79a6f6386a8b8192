//! MDX document tree for code-preview rewriting.
//!
//! This crate parses MDX files into a typed tree where flow-level JSX tags are
//! elements, the two preview placeholder tags get their own variants, and
//! already-rendered code blocks are recognized so a rewritten document can be
//! parsed again without being treated as new placeholders.

pub mod ast;
pub mod frontmatter;
mod jsx;
pub mod parser;
pub mod serialize;

pub use ast::{AttrValue, Attribute, CodeBlock, Document, Element, Node, Placeholder, PreviewKind};
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use parser::{parse_mdx, parse_mdx_with, ParseError, ParseOptions};
pub use serialize::to_mdx;
