//! Static asset mirroring.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors that can occur while copying assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to read asset directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Copies asset trees byte for byte.
pub struct AssetCopier;

impl AssetCopier {
    /// Mirror every file under `src` into `dst`, preserving relative paths.
    ///
    /// Existing destination files are overwritten. A missing `src` is a no-op.
    /// Symbolic links are followed and dangling ones skipped; a link cycle fails
    /// with [`AssetError::Walk`].
    /// Returns the number of files copied.
    pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, AssetError> {
        if !src.exists() {
            tracing::debug!("Skipping missing asset directory {}", src.display());
            return Ok(0);
        }

        let mut copied = 0;

        for entry in WalkDir::new(src).follow_links(true).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_dangling_link(&e) => {
                    if let Some(path) = e.path() {
                        tracing::warn!("Skipping dangling link {}", path.display());
                    }
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }

            // Every walked path lives under `src`.
            let Ok(relative) = entry.path().strip_prefix(src) else {
                continue;
            };
            let target = dst.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|source| AssetError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            fs::copy(entry.path(), &target).map_err(|source| AssetError::Copy {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source,
            })?;

            tracing::trace!("Copied {}", relative.display());
            copied += 1;
        }

        tracing::debug!(
            "Copied {} files from {} to {}",
            copied,
            src.display(),
            dst.display()
        );

        Ok(copied)
    }
}

/// Whether a walk error comes from a symbolic link whose target is missing.
fn is_dangling_link(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return false;
    }

    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound);
    let is_link = err
        .path()
        .and_then(|p| fs::symlink_metadata(p).ok())
        .is_some_and(|m| m.file_type().is_symlink());

    not_found && is_link
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn list_files(root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn mirrors_nested_tree() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("img");
        let dst = temp.path().join("dist/img");

        fs::create_dir_all(src.join("icons/small")).unwrap();
        fs::write(src.join("logo.png"), [0x89, b'P', b'N', b'G', 0, 1, 2]).unwrap();
        fs::write(src.join("icons/home.svg"), "<svg/>").unwrap();
        fs::write(src.join("icons/small/dot.svg"), "<svg></svg>").unwrap();

        let copied = AssetCopier::copy_tree(&src, &dst).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(list_files(&src), list_files(&dst));
        for file in list_files(&src) {
            assert_eq!(
                fs::read(src.join(&file)).unwrap(),
                fs::read(dst.join(&file)).unwrap()
            );
        }
    }

    #[test]
    fn missing_source_is_noop() {
        let temp = tempdir().unwrap();
        let dst = temp.path().join("dist/js");

        let copied = AssetCopier::copy_tree(&temp.path().join("js"), &dst).unwrap();

        assert_eq!(copied, 0);
        assert!(!dst.exists());
    }

    #[test]
    fn overwrites_existing_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("js");
        let dst = temp.path().join("dist/js");

        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("app.js"), "console.log('new');").unwrap();
        fs::write(dst.join("app.js"), "console.log('old and longer');").unwrap();

        AssetCopier::copy_tree(&src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("app.js")).unwrap(),
            "console.log('new');"
        );
    }

    #[test]
    fn skips_empty_directories() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("img");
        let dst = temp.path().join("dist/img");

        fs::create_dir_all(src.join("empty")).unwrap();

        let copied = AssetCopier::copy_tree(&src, &dst).unwrap();

        assert_eq!(copied, 0);
        assert!(!dst.join("empty").exists());
    }

    #[cfg(unix)]
    #[test]
    fn skips_dangling_links() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("img");
        let dst = temp.path().join("dist/img");

        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.png"), "a").unwrap();
        std::os::unix::fs::symlink(src.join("nope"), src.join("broken")).unwrap();

        let copied = AssetCopier::copy_tree(&src, &dst).unwrap();

        assert_eq!(copied, 1);
        assert_eq!(list_files(&dst), vec![PathBuf::from("a.png")]);
    }

    #[cfg(unix)]
    #[test]
    fn errors_on_symlink_cycle() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("img");
        let dst = temp.path().join("dist/img");

        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/a.png"), "a").unwrap();
        std::os::unix::fs::symlink(&src, src.join("nested/loop")).unwrap();

        let result = AssetCopier::copy_tree(&src, &dst);

        assert!(matches!(result, Err(AssetError::Walk(_))));
    }
}
