//! Sass stylesheet compilation.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors that can occur while compiling stylesheets.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Failed to compile {}: {message}", .path.display())]
    Compile { path: PathBuf, message: String },

    #[error("Failed to read styles directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Compiles Sass sources to expanded CSS.
pub struct StyleCompiler;

impl StyleCompiler {
    /// Compile a single Sass file. Imports are also resolved against `load_path`.
    pub fn compile_file(path: &Path, load_path: &Path) -> Result<String, StyleError> {
        let options = grass::Options::default()
            .style(grass::OutputStyle::Expanded)
            .load_path(load_path);

        grass::from_path(path, &options).map_err(|e| StyleError::Compile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Compile every Sass source under `src` into a `.css` file at the same
    /// relative path under `dst`.
    ///
    /// Partials (names starting with `_`) are only compiled through imports.
    /// Nothing is written unless every source compiles. A missing `src` is a
    /// no-op. Returns the written CSS paths.
    pub fn compile_dir(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, StyleError> {
        if !src.exists() {
            tracing::debug!("Skipping missing styles directory {}", src.display());
            return Ok(Vec::new());
        }

        let mut outputs = Vec::new();

        for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_style_source(entry.path()) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(src) else {
                continue;
            };

            let css = Self::compile_file(entry.path(), src)?;
            tracing::debug!("Compiled {}", relative.display());
            outputs.push((dst.join(relative).with_extension("css"), css));
        }

        let mut written = Vec::with_capacity(outputs.len());

        for (path, css) in outputs {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| StyleError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, css).map_err(|source| StyleError::Write {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Whether `path` is a Sass entry point.
fn is_style_source(path: &Path) -> bool {
    let is_partial = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(true, |n| n.starts_with('_'));

    let is_sass = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("scss") | Some("sass")
    );

    is_sass && !is_partial
}
