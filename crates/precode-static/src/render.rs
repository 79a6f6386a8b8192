//! Render a rewritten document tree to HTML.

use std::collections::HashMap;
use std::path::Path;

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use precode_mdx::{AttrValue, Attribute, CodeBlock, Document, Node, Placeholder, PreviewKind};

use crate::templates::{CodeBlockContext, TemplateEngine};

/// Render the document body to HTML.
///
/// Markdown is rendered with pulldown-cmark, preview placeholders become
/// `div.code-preview` wrappers around their code blocks, and any other
/// component element becomes a `div` carrying its name and string attributes.
/// Headings get an `id` slug that is unique within the page.
pub fn render_html(doc: &Document, templates: &TemplateEngine) -> Result<String, minijinja::Error> {
    let mut out = String::new();
    let mut slugs = Slugger::default();
    render_nodes(&mut out, &doc.children, templates, &mut slugs)?;
    Ok(out)
}

fn render_nodes(
    out: &mut String,
    nodes: &[Node],
    templates: &TemplateEngine,
    slugs: &mut Slugger,
) -> Result<(), minijinja::Error> {
    for node in nodes {
        match node {
            Node::Other(markdown) => render_markdown(out, markdown, slugs),
            Node::Element(element) => {
                out.push_str(&format!(
                    "<div data-component=\"{}\"",
                    html_escape(&element.name)
                ));
                push_data_attributes(out, &element.attributes);
                out.push_str(">\n");
                render_nodes(out, &element.children, templates, slugs)?;
                out.push_str("</div>\n");
            }
            Node::MultiFilePreview(placeholder) => {
                render_preview(out, PreviewKind::MultiFile, placeholder, templates, slugs)?
            }
            Node::SingleFilePreview(placeholder) => {
                render_preview(out, PreviewKind::SingleFile, placeholder, templates, slugs)?
            }
            Node::CodeBlock(block) => {
                out.push_str(&render_code_block(block, templates)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

fn render_preview(
    out: &mut String,
    kind: PreviewKind,
    placeholder: &Placeholder,
    templates: &TemplateEngine,
    slugs: &mut Slugger,
) -> Result<(), minijinja::Error> {
    out.push_str(&format!(
        "<div class=\"code-preview\" data-preview=\"{}\" data-name=\"{}\">\n",
        kind,
        html_escape(placeholder.name().unwrap_or_default())
    ));
    render_nodes(out, &placeholder.children, templates, slugs)?;
    out.push_str("</div>\n");
    Ok(())
}

fn render_markdown(out: &mut String, markdown: &str, slugs: &mut Slugger) {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;

    let mut events: Vec<Event> = Parser::new_ext(markdown, options).collect();

    // Fill in ids for headings that did not set one with `{#id}`
    let mut i = 0;
    while i < events.len() {
        if let Event::Start(Tag::Heading { id: None, .. }) = &events[i] {
            let mut text = String::new();
            for event in &events[i + 1..] {
                match event {
                    Event::End(TagEnd::Heading(_)) => break,
                    Event::Text(t) | Event::Code(t) => text.push_str(t),
                    _ => {}
                }
            }
            let slug = slugs.slug(&text);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(slug));
            }
        }
        i += 1;
    }

    html::push_html(out, events.into_iter());
}

/// GitHub-style heading slugs, deduplicated with a numeric suffix.
#[derive(Default)]
struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    fn slug(&mut self, text: &str) -> String {
        let base: String = text
            .trim()
            .to_lowercase()
            .chars()
            .filter_map(|c| match c {
                ' ' => Some('-'),
                c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
                _ => None,
            })
            .collect();

        let mut slug = base.clone();
        while let Some(count) = self.seen.get_mut(&slug) {
            *count += 1;
            slug = format!("{base}-{count}");
        }
        self.seen.insert(slug.clone(), 0);
        slug
    }
}

fn render_code_block(block: &CodeBlock, templates: &TemplateEngine) -> Result<String, minijinja::Error> {
    templates.render_code_block(&CodeBlockContext {
        file_name: &block.file_name,
        component_name: &block.component_name,
        source_path: &block.source_path,
        language: language_for(&block.file_name),
        content: &block.content,
    })
}

fn push_data_attributes(out: &mut String, attributes: &[Attribute]) {
    for attr in attributes {
        if let AttrValue::String(value) = &attr.value {
            out.push_str(&format!(
                " data-{}=\"{}\"",
                attr.name.to_lowercase(),
                html_escape(value)
            ));
        }
    }
}

/// Highlighting language from a file name.
fn language_for(file_name: &str) -> &'static str {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some("tsx") => "tsx",
        Some("ts") => "typescript",
        Some("jsx") => "jsx",
        Some("js" | "mjs" | "cjs") => "javascript",
        Some("css") => "css",
        Some("json") => "json",
        Some("md" | "mdx") => "markdown",
        _ => "text",
    }
}

/// Escape HTML special characters including single quotes for XSS prevention.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use precode_mdx::{parse_mdx, Element};

    #[test]
    fn renders_markdown_and_code_blocks() {
        let mut placeholder = Placeholder::named("TabCodePreview", "currency");
        placeholder.children = vec![Node::CodeBlock(CodeBlock {
            tag_name: "PreCode".to_string(),
            content: "const a = 1 < 2;".to_string(),
            file_name: "currency.tsx".to_string(),
            component_name: "currency".to_string(),
            source_path: "components/currency.tsx".to_string(),
        })];
        let doc = Document {
            children: vec![
                Node::Other("# Currency".to_string()),
                Node::MultiFilePreview(placeholder),
            ],
            ..Default::default()
        };

        let html = render_html(&doc, &TemplateEngine::new()).unwrap();

        assert!(html.contains(r#"<h1 id="currency">Currency</h1>"#));
        assert!(html.contains(r#"data-preview="multi-file" data-name="currency""#));
        assert!(html.contains("const a = 1 &lt; 2;"));
        assert!(html.contains(r#"class="language-tsx""#));
    }

    #[test]
    fn renders_unresolved_placeholders_as_empty_wrappers() {
        let doc = parse_mdx("<DrawerCodePreview name=\"qr-code\" />").unwrap();

        let html = render_html(&doc, &TemplateEngine::new()).unwrap();

        assert_eq!(
            html,
            "<div class=\"code-preview\" data-preview=\"single-file\" data-name=\"qr-code\">\n</div>\n"
        );
    }

    #[test]
    fn renders_elements_with_escaped_attributes() {
        let doc = Document {
            children: vec![Node::Element(Element {
                name: "Callout".to_string(),
                attributes: vec![Attribute::string("title", "<b>\"note\"</b>")],
                children: vec![Node::Other("Body".to_string())],
            })],
            ..Default::default()
        };

        let html = render_html(&doc, &TemplateEngine::new()).unwrap();

        assert!(html.starts_with(
            "<div data-component=\"Callout\" data-title=\"&lt;b&gt;&quot;note&quot;&lt;/b&gt;\">"
        ));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn gives_headings_unique_ids() {
        let doc = parse_mdx(
            "## Getting Started\n\n<Note>\n\n### Usage\n\n</Note>\n\n### Usage\n\n## `Tabs` API!\n\n## Custom {#custom-id}\n",
        )
        .unwrap();

        let html = render_html(&doc, &TemplateEngine::new()).unwrap();

        assert!(html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
        assert!(html.contains(r#"<h3 id="usage">Usage</h3>"#));
        assert!(html.contains(r#"<h3 id="usage-1">Usage</h3>"#));
        assert!(html.contains(r#"<h2 id="tabs-api"><code>Tabs</code> API!</h2>"#));
        assert!(html.contains(r#"<h2 id="custom-id">Custom</h2>"#));
    }

    #[test]
    fn picks_language_from_extension() {
        assert_eq!(language_for("token-list.tsx"), "tsx");
        assert_eq!(language_for("utils.ts"), "typescript");
        assert_eq!(language_for("Makefile"), "text");
    }
}
