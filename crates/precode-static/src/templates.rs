//! Template engine for rendering documentation pages.

use minijinja::{context, Environment};
use serde::Serialize;

/// Context for rendering a page template.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Page description for the meta tag
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    /// Base URL
    pub base_url: String,
}

/// Context for rendering one embedded source file.
#[derive(Debug, Clone, Serialize)]
pub struct CodeBlockContext<'a> {
    pub file_name: &'a str,
    pub component_name: &'a str,
    pub source_path: &'a str,
    pub language: &'a str,
    pub content: &'a str,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)
            .expect("Failed to add base template");
        env.add_template("doc.html", DOC_TEMPLATE)
            .expect("Failed to add doc template");
        env.add_template("code_block.html", CODE_BLOCK_TEMPLATE)
            .expect("Failed to add code block template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            description => &context.description,
            content => &context.content,
            base_url => &context.base_url,
        })
    }

    /// Render an embedded source file. Content is HTML-escaped by the template.
    pub fn render_code_block(
        &self,
        block: &CodeBlockContext<'_>,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("code_block.html")?.render(block)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}<style>
    .code-preview { margin: 1.5rem 0; }
    .precode { border: 1px solid #e4e4e7; border-radius: 0.5rem; margin: 0.75rem 0; overflow: hidden; }
    .precode-header { display: flex; justify-content: space-between; padding: 0.5rem 1rem; background: #f4f4f5; font: 0.8rem ui-monospace, monospace; }
    .precode pre { margin: 0; padding: 1rem; overflow-x: auto; }
  </style>
</head>
<body>
  <main class="main">
    <div class="nav-header">
      <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
    </div>
    {% block content %}{% endblock %}
  </main>
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <div class="content">
    {{ content | safe }}
  </div>
</article>
{% endblock %}"##;

const CODE_BLOCK_TEMPLATE: &str = r##"<figure class="precode" data-component="{{ component_name }}" data-filesrc="{{ source_path }}">
  <figcaption class="precode-header"><span class="precode-filename">{{ file_name }}</span><span class="precode-component">{{ component_name }}</span></figcaption>
  <pre><code class="language-{{ language }}">{{ content }}</code></pre>
</figure>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let context = Context {
            title: "Currency".to_string(),
            site_title: "Components".to_string(),
            description: Some("ETH converter".to_string()),
            content: "<p>Hello world</p>".to_string(),
            base_url: "/".to_string(),
        };

        let html = engine.render_page("doc.html", &context).unwrap();

        assert!(html.contains("<title>Currency - Components</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains(r#"content="ETH converter""#));
    }

    #[test]
    fn escapes_code_block_content() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_code_block(&CodeBlockContext {
                file_name: "qr-code.tsx",
                component_name: "qr-code",
                source_path: "components/qr-code/qr-code.tsx",
                language: "tsx",
                content: "<QRCode value=\"a&b\">",
            })
            .unwrap();

        assert!(html.contains("&lt;QRCode value=&quot;a&amp;b&quot;&gt;"));
        assert!(html.contains(r#"class="language-tsx""#));
        assert!(html.contains("qr-code.tsx"));
    }
}
