//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sitebuilder_static::{BuildConfig, Layout, RenderOptions, SiteBuilder};

/// Configuration file structure (site.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    render: RenderConfig,
}

/// Path overrides, relative to the project root.
#[derive(Debug, Deserialize, Default)]
struct PathsConfig {
    data: Option<PathBuf>,
    site: Option<PathBuf>,
    dist: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct RenderConfig {
    template: Option<String>,
    strict_undefined: Option<bool>,
    autoescape: Option<bool>,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

/// Resolve the build configuration for a project rooted at `root`.
fn build_config(root: &Path, file: ConfigFile) -> BuildConfig {
    let mut layout = Layout::new(root);
    if let Some(data) = file.paths.data {
        layout = layout.with_data_file(data);
    }
    if let Some(site) = file.paths.site {
        layout = layout.with_site_dir(site);
    }
    if let Some(dist) = file.paths.dist {
        layout = layout.with_dist_dir(dist);
    }

    let defaults = RenderOptions::default();
    let render = RenderOptions {
        template: file.render.template.unwrap_or(defaults.template),
        strict_undefined: file
            .render
            .strict_undefined
            .unwrap_or(defaults.strict_undefined),
        autoescape: file.render.autoescape.unwrap_or(defaults.autoescape),
    };

    BuildConfig { layout, render }
}

/// Run the build command.
pub fn run(root: &Path, config: &Path) -> Result<()> {
    tracing::info!("Building site in {}...", root.display());

    let file_config = load_config(&root.join(config))?;
    let result = SiteBuilder::new(build_config(root, file_config)).build()?;

    tracing::info!(
        "Built site with {} stylesheets and {} assets in {}ms",
        result.stylesheets,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
