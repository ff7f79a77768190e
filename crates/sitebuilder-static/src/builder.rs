//! Static site builder.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sitebuilder_data::{load_data, DataError};

use crate::assets::{AssetCopier, AssetError};
use crate::layout::Layout;
use crate::styles::{StyleCompiler, StyleError};
use crate::templates::{RenderOptions, TemplateError, TemplateRenderer};

/// Configuration for building a site.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Input and output paths
    pub layout: Layout,

    /// Page template settings
    pub render: RenderOptions,
}

/// Progress of a build. Stages advance strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStage {
    Init,
    DataLoaded,
    StylesCompiled,
    TemplateRendered,
    AssetsCopied,
    Done,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildStage::Init => "init",
            BuildStage::DataLoaded => "data loaded",
            BuildStage::StylesCompiled => "styles compiled",
            BuildStage::TemplateRendered => "template rendered",
            BuildStage::AssetsCopied => "assets copied",
            BuildStage::Done => "done",
        })
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of CSS files written
    pub stylesheets: usize,

    /// Number of image and script files copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Failed to write output {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Single-page static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Build the site.
    ///
    /// Any failure aborts the build. Output already written stays on disk.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let mut stage = BuildStage::Init;

        match self.run(&mut stage) {
            Ok((stylesheets, assets)) => Ok(BuildResult {
                stylesheets,
                assets,
                duration_ms: start.elapsed().as_millis() as u64,
                output_dir: self.config.layout.dist_dir.clone(),
            }),
            Err(e) => {
                tracing::error!("Build aborted at stage '{}'", stage);
                Err(e)
            }
        }
    }

    fn run(&self, stage: &mut BuildStage) -> Result<(usize, usize), BuildError> {
        let layout = &self.config.layout;

        // Ensure output directories exist
        create_dir(&layout.dist_dir)?;
        create_dir(&layout.dist_styles_dir())?;

        let data = load_data(&layout.data_file)?;
        advance(stage, BuildStage::DataLoaded);

        let stylesheets =
            StyleCompiler::compile_dir(&layout.styles_dir(), &layout.dist_styles_dir())?;
        tracing::info!("Compiled {} stylesheets", stylesheets.len());
        advance(stage, BuildStage::StylesCompiled);

        let renderer = TemplateRenderer::new(&layout.templates_dir(), &self.config.render);
        let html = renderer.render(&self.config.render.template, &data)?;

        let index = layout.index_file();
        fs::write(&index, html).map_err(|source| BuildError::Write {
            path: index.clone(),
            source,
        })?;
        tracing::info!("Rendered {}", index.display());
        advance(stage, BuildStage::TemplateRendered);

        let images = AssetCopier::copy_tree(&layout.images_dir(), &layout.dist_images_dir())?;
        let scripts = AssetCopier::copy_tree(&layout.scripts_dir(), &layout.dist_scripts_dir())?;
        tracing::info!("Copied {} images and {} scripts", images, scripts);
        advance(stage, BuildStage::AssetsCopied);

        advance(stage, BuildStage::Done);

        Ok((stylesheets.len(), images + scripts))
    }
}

fn advance(stage: &mut BuildStage, next: BuildStage) {
    debug_assert!(next > *stage);
    tracing::debug!("Build stage: {} -> {}", stage, next);
    *stage = next;
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|source| BuildError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
