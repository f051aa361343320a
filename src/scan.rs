//! Content scanning.
//!
//! Every directory directly under the content root is a page:
//!
//! ```text
//! content/
//! ├── home/                 # → index.html
//! │   ├── large.html        # slot file
//! │   └── middle/           # folder-backed slot
//! │       ├── 01-intro.html
//! │       └── 02-gear.md
//! ├── songs/                # → songs.html
//! │   ├── top.md
//! │   └── popups/
//! │       └── lyrics.html
//! └── Studio_Facilities/    # → studio_facilities.html
//! ```
//!
//! Files at the root and hidden directories are ignored. Pages are sorted by
//! folder name so that every build sees them in the same order, and the list
//! of page names taken here is the snapshot used for navigation on every
//! page.

use crate::fragment::{self, FragmentError, FragmentSource};
use crate::naming;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content directory not found: {0}")]
    MissingContentDir(PathBuf),
    #[error("Folders {first} and {second} both map to page '{name}'")]
    DuplicatePage {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// One top-level content folder.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFolder {
    /// Lower-cased folder stem.
    pub name: String,
    pub path: PathBuf,
}

impl PageFolder {
    /// Resolve every slot of this page, in the order given.
    pub fn slot_sources(
        &self,
        slots: &[String],
    ) -> Result<Vec<(String, FragmentSource)>, FragmentError> {
        slots
            .iter()
            .map(|slot| Ok((slot.clone(), fragment::resolve(&self.path, slot)?)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTree {
    pub pages: Vec<PageFolder>,
}

impl ContentTree {
    pub fn page_names(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.name.clone()).collect()
    }
}

pub fn scan(content_dir: &Path) -> Result<ContentTree, ScanError> {
    if !content_dir.is_dir() {
        return Err(ScanError::MissingContentDir(content_dir.to_path_buf()));
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(content_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !is_hidden(p))
        .collect();
    dirs.sort();

    let mut pages: Vec<PageFolder> = Vec::with_capacity(dirs.len());
    for path in dirs {
        let name = naming::page_name(&path);
        if let Some(existing) = pages.iter().find(|p| p.name == name) {
            return Err(ScanError::DuplicatePage {
                name,
                first: existing.path.clone(),
                second: path,
            });
        }
        pages.push(PageFolder { name, path });
    }

    // Folder names may differ in case from page names; order by the latter.
    pages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(ContentTree { pages })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}
