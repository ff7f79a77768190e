//! Initialize a site project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing site in {}...", root.display());

    let site_dir = root.join("site");
    if site_dir.exists() && !yes {
        tracing::warn!("site/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    for dir in ["site/templates", "site/assets/styles", "site/assets/img", "site/assets/js"] {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    write_file(root, "site.toml", DEFAULT_CONFIG, yes)?;
    write_file(root, "data.yaml", DEFAULT_DATA, yes)?;
    write_file(root, "site/templates/template.html", DEFAULT_TEMPLATE, yes)?;
    write_file(root, "site/assets/styles/main.scss", DEFAULT_STYLES, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'sitebuilder' to build the site.");

    Ok(())
}

/// Write `contents` to `root/relative` unless it exists and `overwrite` is off.
fn write_file(root: &Path, relative: &str, contents: &str, overwrite: bool) -> Result<()> {
    let path = root.join(relative);
    if path.exists() && !overwrite {
        return Ok(());
    }

    fs::write(&path, contents).with_context(|| format!("Failed to write {}", relative))?;
    tracing::info!("Created {}", relative);

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# sitebuilder configuration

[paths]
# Data file bound to the template as `data`
data = "data.yaml"

# Templates and assets
site = "site"

# Output directory
dist = "dist"

[render]
# Page template inside site/templates
template = "template.html"

# Fail on references to missing data
strict_undefined = false

# HTML-escape interpolated values
autoescape = false
"#;

const DEFAULT_DATA: &str = r#"title: My Site
tagline: Built with sitebuilder
links:
  - name: Source
    url: https://github.com/
"#;

const DEFAULT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ data.title }}</title>
  <link rel="stylesheet" href="assets/css/main.css">
</head>
<body>
  <header>
    <h1>{{ data.title }}</h1>
    <p>{{ data.tagline }}</p>
  </header>
  <ul>
  {% for link in data.links %}
    <li><a href="{{ link.url }}">{{ link.name }}</a></li>
  {% endfor %}
  </ul>
</body>
</html>
"##;

const DEFAULT_STYLES: &str = r#"$foreground: #1f2933;
$accent: #3b82f6;

body {
  font-family: system-ui, -apple-system, sans-serif;
  color: $foreground;
  max-width: 40rem;
  margin: 2rem auto;

  a {
    color: $accent;
  }
}
"#;
