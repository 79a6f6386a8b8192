//! Scaffold a precode project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing precode...");

    write_file(config_path, DEFAULT_CONFIG, yes)?;
    write_file(Path::new("configs/docs.json"), DEFAULT_CATALOG, yes)?;
    write_file(Path::new("docs/index.mdx"), DEFAULT_INDEX, yes)?;
    write_file(Path::new("components/hello.tsx"), DEFAULT_COMPONENT, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'precode build' to generate the docs.");

    Ok(())
}

/// Write a scaffold file unless it exists and `overwrite` is false.
fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# precode configuration

[docs]
# Documents to process
dir = "docs"

# Build output directory
output = "dist"

# Site title
title = "Documentation"

# Base URL (for deployment)
base_url = "/"

[catalog]
# Component catalog (JSON or YAML)
path = "configs/docs.json"

[paths]
# Root for multi-file previews (TabCodePreview)
project_root = "."

# Root for single-file previews (DrawerCodePreview)
registry_root = "registry"

[preview]
multi_file_tag = "TabCodePreview"
single_file_tag = "DrawerCodePreview"
code_tag = "PreCode"

[build]
# "html" or "mdx"
format = "html"
"#;

const DEFAULT_CATALOG: &str = r#"{
  "dataArray": [
    {
      "title": "Components",
      "componentArray": [
        {
          "componentName": "hello",
          "filesArray": [
            { "name": "hello.tsx", "filesrc": "components/hello.tsx" }
          ]
        }
      ]
    }
  ]
}
"#;

const DEFAULT_INDEX: &str = r#"---
title: Hello
description: A sample component page
---

# Hello

The source below is read from `components/hello.tsx` at build time.

<TabCodePreview name="hello" />
"#;

const DEFAULT_COMPONENT: &str = r#"export function Hello({ name }: { name: string }) {
  return <p>Hello, {name}!</p>
}
"#;
