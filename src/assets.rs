//! Static files copied verbatim into the output.
//!
//! ```text
//! <assets>/{img,css,js,fonts}/   → <output>/{img,css,js,fonts}/   (skipped when absent)
//! <root>/favicon/<file>          → <output>/<file>                (warning when absent)
//! <root>/robots/<file>           → <output>/<file>                (warning when absent)
//! <root>/CNAME                   → <output>/CNAME                 (skipped when absent)
//! ```
//!
//! Existing files in the output are overwritten, so copying twice gives the
//! same tree.

use crate::config::AssetsConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Summary of a static copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetReport {
    /// Asset folders copied, by name.
    pub folders: Vec<String>,
    /// Individual files copied (favicon, robots, CNAME).
    pub files: Vec<String>,
    /// Expected files that were not found.
    pub missing: Vec<PathBuf>,
}

/// Recursively copy `src` into `dst`, creating directories as needed.
///
/// Entries are visited in filename order. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|source| AssetError::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy a single file if it exists. Returns whether it was copied.
pub fn copy_file(src: &Path, dst: &Path) -> Result<bool, AssetError> {
    if !src.is_file() {
        return Ok(false);
    }
    fs::copy(src, dst)?;
    Ok(true)
}

/// Copy every configured static input from the project `root` into `output`.
pub fn copy_static(
    root: &Path,
    assets_dir: &Path,
    output: &Path,
    config: &AssetsConfig,
) -> Result<AssetReport, AssetError> {
    let mut report = AssetReport::default();

    for folder in &config.folders {
        let src = assets_dir.join(folder);
        if src.is_dir() {
            copy_tree(&src, &output.join(folder))?;
            report.folders.push(folder.clone());
        }
    }

    let singles = config
        .favicon_files
        .iter()
        .map(|f| (root.join(&config.favicon_dir).join(f), f))
        .chain(
            config
                .robots_files
                .iter()
                .map(|f| (root.join(&config.robots_dir).join(f), f)),
        );
    for (src, name) in singles {
        if copy_file(&src, &output.join(name))? {
            report.files.push(name.clone());
        } else {
            report.missing.push(src);
        }
    }

    if !config.cname.is_empty()
        && copy_file(&root.join(&config.cname), &output.join(&config.cname))?
    {
        report.files.push(config.cname.clone());
    }

    Ok(report)
}
