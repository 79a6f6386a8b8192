//! MDX document parser.

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use regex::Regex;

use crate::ast::{AttrValue, Attribute, CodeBlock, Document, Element, Node, Placeholder};
use crate::frontmatter::{extract_frontmatter, FrontmatterError};
use crate::jsx::{lex_tag, starts_component_tag, TagKind};

/// Tag names that drive placeholder classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Placeholder resolved to every file of a catalog entry
    pub multi_file_tag: String,

    /// Placeholder resolved to a single registry file
    pub single_file_tag: String,

    /// Element name of rendered code blocks
    pub code_tag: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            multi_file_tag: "TabCodePreview".to_string(),
            single_file_tag: "DrawerCodePreview".to_string(),
            code_tag: "PreCode".to_string(),
        }
    }
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Unexpected closing tag </{name}> at line {line}")]
    UnexpectedClose { name: String, line: usize },

    #[error("Unclosed <{name}> opened at line {line}")]
    Unclosed { name: String, line: usize },
}

/// Parse an MDX document with the default tag names.
pub fn parse_mdx(source: &str) -> Result<Document, ParseError> {
    parse_mdx_with(source, &ParseOptions::default())
}

/// Parse an MDX document.
///
/// Component tags (capitalized JSX) that start a line become tree nodes; all
/// other text, including anything inside fenced code, stays as raw
/// markdown in [`Node::Other`].
pub fn parse_mdx_with(source: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    let frontmatter_len = source.len() - content.len();
    let frontmatter_block = frontmatter
        .as_ref()
        .map(|_| source[..frontmatter_len].trim().to_string());
    let line_offset = source[..frontmatter_len].lines().count();

    let code_ranges = code_block_ranges(content);
    let mut builder = TreeBuilder::new(options);
    let mut cursor = 0;

    static TAG_START: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^[ \t]*(</?[A-Z])").expect("Invalid tag start regex")
    });

    for caps in TAG_START.captures_iter(content) {
        let Some(m) = caps.get(1) else { continue };
        let mut pos = m.start();

        if pos < cursor || code_ranges.iter().any(|r| r.contains(&pos)) {
            continue;
        }

        // Consume this tag and every later tag on the same line, so
        // `<Trigger value="code">Code</Trigger>` closes where it opened.
        while let Some((tag, len)) = lex_tag(&content[pos..]) {
            builder.text(&content[cursor..pos]);
            let line = line_offset + content[..pos].matches('\n').count() + 1;
            builder.tag(tag.name, tag.attributes, tag.kind, line)?;

            cursor = pos + len;

            match next_tag_on_line(content, cursor) {
                Some(next) => pos = next,
                None => break,
            }
        }
    }

    builder.text(&content[cursor..]);

    Ok(Document {
        frontmatter,
        frontmatter_block,
        children: builder.finish()?,
    })
}

/// Start of the next component tag between `from` and the end of its line,
/// skipping tags inside inline code spans.
fn next_tag_on_line(content: &str, from: usize) -> Option<usize> {
    let rest = &content[from..];
    let line = &rest[..rest.find('\n').unwrap_or(rest.len())];

    let mut in_code = false;
    for (i, c) in line.char_indices() {
        match c {
            '`' => in_code = !in_code,
            '<' if !in_code && starts_component_tag(&line[i..]) => return Some(from + i),
            _ => {}
        }
    }
    None
}

/// Byte ranges of fenced code blocks.
///
/// Indented code is not recognized, matching MDX, so placeholders nested in an
/// indented element body are still found.
fn code_block_ranges(content: &str) -> Vec<Range<usize>> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    Parser::new_ext(content, options)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => Some(range),
            _ => None,
        })
        .collect()
}

struct Frame {
    name: String,
    attributes: Vec<Attribute>,
    line: usize,
    children: Vec<Node>,
}

/// Assembles nodes into a tree as tags open and close.
struct TreeBuilder<'a> {
    options: &'a ParseOptions,
    root: Vec<Node>,
    stack: Vec<Frame>,
}

impl<'a> TreeBuilder<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }

    fn text(&mut self, text: &str) {
        let text = text.trim_end().trim_start_matches(['\n', '\r']);
        if !text.is_empty() {
            self.current().push(Node::Other(text.to_string()));
        }
    }

    fn tag(
        &mut self,
        name: String,
        attributes: Vec<Attribute>,
        kind: TagKind,
        line: usize,
    ) -> Result<(), ParseError> {
        match kind {
            TagKind::Open => self.stack.push(Frame {
                name,
                attributes,
                line,
                children: Vec::new(),
            }),
            TagKind::SelfClosing => {
                let node = classify(self.options, name, attributes, Vec::new());
                self.current().push(node);
            }
            TagKind::Close => {
                let matches_open = self.stack.last().is_some_and(|frame| frame.name == name);
                let Some(frame) = self.stack.pop().filter(|_| matches_open) else {
                    return Err(ParseError::UnexpectedClose { name, line });
                };
                let node = classify(self.options, frame.name, frame.attributes, frame.children);
                self.current().push(node);
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        match self.stack.pop() {
            Some(frame) => Err(ParseError::Unclosed {
                name: frame.name,
                line: frame.line,
            }),
            None => Ok(self.root),
        }
    }
}

/// Turn a closed tag into the matching node variant.
fn classify(
    options: &ParseOptions,
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
) -> Node {
    if name == options.multi_file_tag {
        return Node::MultiFilePreview(Placeholder {
            tag: name,
            attributes,
            children,
        });
    }

    if name == options.single_file_tag {
        return Node::SingleFilePreview(Placeholder {
            tag: name,
            attributes,
            children,
        });
    }

    if name == options.code_tag {
        if let Some(block) = code_block_from_attributes(&name, &attributes) {
            return Node::CodeBlock(block);
        }
    }

    Node::Element(Element {
        name,
        attributes,
        children,
    })
}

/// Rebuild a code block from a previously serialized `<PreCode ... />`.
///
/// Accepts both attribute sets written by [`crate::to_mdx`]: `filename` and
/// `componentname` for multi-file previews, `comName` for single-file ones.
fn code_block_from_attributes(tag_name: &str, attributes: &[Attribute]) -> Option<CodeBlock> {
    let get = |key: &str| attributes.iter().find(|a| a.name == key).map(|a| &a.value);
    let text = |key: &str| match get(key) {
        Some(AttrValue::String(s)) => Some(s.clone()),
        Some(AttrValue::Expression(e)) => serde_json::from_str::<String>(e).ok(),
        _ => None,
    };

    let content = match get("codeblock")? {
        AttrValue::Expression(expr) => serde_json::from_str::<String>(expr).ok()?,
        _ => return None,
    };

    let source_path = text("filesrc").unwrap_or_default();
    let file_name = text("filename").unwrap_or_else(|| {
        Path::new(&source_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    Some(CodeBlock {
        tag_name: tag_name.to_string(),
        content,
        file_name,
        component_name: text("componentname")
            .or_else(|| text("comName"))
            .unwrap_or_default(),
        source_path,
    })
}
