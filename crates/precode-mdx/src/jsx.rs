//! Flow-level JSX tag lexer.
//!
//! Lexes one tag at a time, e.g. `<TabCodePreview name="currency" />`,
//! `<Tabs>` or `</Tabs>`. Attribute values may be quoted strings or braced
//! expressions; braces inside string literals in an expression are skipped
//! so `codeblock={"fn() {}"}` lexes as a single value.

use crate::ast::{AttrValue, Attribute};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Open,
    SelfClosing,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub kind: TagKind,
}

/// Check whether `source` starts with something that looks like a component tag.
pub(crate) fn starts_component_tag(source: &str) -> bool {
    let rest = source
        .strip_prefix("</")
        .or_else(|| source.strip_prefix('<'));
    matches!(rest.and_then(|r| r.chars().next()), Some(c) if c.is_ascii_uppercase())
}

/// Lex a tag at the start of `source`.
///
/// Returns the tag and the number of bytes it spans, or `None` when the text
/// is not a well-formed tag (it is then left as markdown).
pub(crate) fn lex_tag(source: &str) -> Option<(RawTag, usize)> {
    let mut cursor = Cursor::new(source);

    if !cursor.eat(b'<') {
        return None;
    }
    let closing = cursor.eat(b'/');

    let name = cursor.take_while(is_tag_name_byte);
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return None;
    }
    let name = name.to_string();

    if closing {
        cursor.skip_whitespace();
        if !cursor.eat(b'>') {
            return None;
        }
        let tag = RawTag {
            name,
            attributes: Vec::new(),
            kind: TagKind::Close,
        };
        return Some((tag, cursor.pos));
    }

    let mut attributes = Vec::new();

    loop {
        cursor.skip_whitespace();
        match cursor.peek()? {
            b'/' => {
                cursor.bump();
                if !cursor.eat(b'>') {
                    return None;
                }
                let tag = RawTag {
                    name,
                    attributes,
                    kind: TagKind::SelfClosing,
                };
                return Some((tag, cursor.pos));
            }
            b'>' => {
                cursor.bump();
                let tag = RawTag {
                    name,
                    attributes,
                    kind: TagKind::Open,
                };
                return Some((tag, cursor.pos));
            }
            b if b.is_ascii_alphabetic() || b == b'_' => {
                attributes.push(lex_attribute(&mut cursor)?);
            }
            _ => return None,
        }
    }
}

fn lex_attribute(cursor: &mut Cursor<'_>) -> Option<Attribute> {
    let name = cursor.take_while(is_attr_name_byte).to_string();
    cursor.skip_whitespace();

    if !cursor.eat(b'=') {
        return Some(Attribute {
            name,
            value: AttrValue::Boolean(true),
        });
    }

    cursor.skip_whitespace();
    let value = match cursor.peek()? {
        quote @ (b'"' | b'\'') => {
            cursor.bump();
            let start = cursor.pos;
            let len = cursor.rest().bytes().position(|b| b == quote)?;
            cursor.pos += len + 1;
            AttrValue::String(cursor.src[start..start + len].to_string())
        }
        b'{' => AttrValue::Expression(lex_expression(cursor)?),
        _ => return None,
    };

    Some(Attribute { name, value })
}

/// Lex a braced expression, returning its trimmed inner text.
fn lex_expression(cursor: &mut Cursor<'_>) -> Option<String> {
    let start = cursor.pos;
    let bytes = cursor.src.as_bytes();
    let mut depth = 0usize;
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    cursor.pos = i + 1;
                    return Some(cursor.src[start + 1..i].trim().to_string());
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-' | b':')
}

fn is_attr_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':')
}

/// Byte cursor. Every position it stops at is an ASCII delimiter, so slicing is
/// always on a char boundary.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_self_closing_placeholder() {
        let (tag, len) = lex_tag(r#"<TabCodePreview name="currency" /> trailing"#).unwrap();

        assert_eq!(tag.name, "TabCodePreview");
        assert_eq!(tag.kind, TagKind::SelfClosing);
        assert_eq!(tag.attributes, vec![Attribute::string("name", "currency")]);
        assert_eq!(len, r#"<TabCodePreview name="currency" />"#.len());
    }

    #[test]
    fn lexes_open_and_close_tags() {
        let (open, _) = lex_tag("<Tabs defaultValue='preview'>").unwrap();
        assert_eq!(open.kind, TagKind::Open);
        assert_eq!(
            open.attributes,
            vec![Attribute::string("defaultValue", "preview")]
        );

        let (close, len) = lex_tag("</Tabs >").unwrap();
        assert_eq!(close.kind, TagKind::Close);
        assert_eq!(close.name, "Tabs");
        assert_eq!(len, 8);
    }

    #[test]
    fn lexes_boolean_and_expression_attributes() {
        let (tag, _) =
            lex_tag("<PreCode\n  open\n  codeblock={\"fn() { return '}'; }\"}\n/>").unwrap();

        assert_eq!(tag.attributes[0].value, AttrValue::Boolean(true));
        assert_eq!(
            tag.attributes[1].value,
            AttrValue::Expression("\"fn() { return '}'; }\"".to_string())
        );
    }

    #[test]
    fn rejects_lowercase_and_unterminated_tags() {
        assert!(lex_tag("<div>").is_none());
        assert!(lex_tag("<Tabs name=\"x\"").is_none());
        assert!(lex_tag("<Tabs name={unbalanced>").is_none());
    }

    #[test]
    fn detects_component_tag_starts() {
        assert!(starts_component_tag("<Tabs>"));
        assert!(starts_component_tag("</Tabs>"));
        assert!(!starts_component_tag("<div>"));
        assert!(!starts_component_tag("a < B"));
    }
}
