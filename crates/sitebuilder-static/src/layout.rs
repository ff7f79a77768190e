//! Directory layout of a site project.

use std::path::{Path, PathBuf};

/// Well-known input and output paths of a site project.
///
/// Only the data file, site root and distribution root are stored; every other
/// path is derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Project root, all relative paths are resolved against it
    pub root: PathBuf,

    /// Structured data file bound into the template
    pub data_file: PathBuf,

    /// Site sources (templates and assets)
    pub site_dir: PathBuf,

    /// Distribution output
    pub dist_dir: PathBuf,
}

impl Layout {
    /// Create the default layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_file: root.join("data.yaml"),
            site_dir: root.join("site"),
            dist_dir: root.join("dist"),
            root,
        }
    }

    /// Override the data file, relative to the root.
    pub fn with_data_file(mut self, path: impl AsRef<Path>) -> Self {
        self.data_file = self.root.join(path);
        self
    }

    /// Override the site directory, relative to the root.
    pub fn with_site_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.site_dir = self.root.join(path);
        self
    }

    /// Override the distribution directory, relative to the root.
    pub fn with_dist_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.dist_dir = self.root.join(path);
        self
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.site_dir.join("templates")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.site_dir.join("assets")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.assets_dir().join("img")
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.assets_dir().join("js")
    }

    pub fn styles_dir(&self) -> PathBuf {
        self.assets_dir().join("styles")
    }

    pub fn dist_assets_dir(&self) -> PathBuf {
        self.dist_dir.join("assets")
    }

    pub fn dist_images_dir(&self) -> PathBuf {
        self.dist_assets_dir().join("img")
    }

    pub fn dist_scripts_dir(&self) -> PathBuf {
        self.dist_assets_dir().join("js")
    }

    pub fn dist_styles_dir(&self) -> PathBuf {
        self.dist_assets_dir().join("css")
    }

    /// The rendered page.
    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(".")
    }
}
