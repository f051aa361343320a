//! Fragment resolution: which content fills a slot of a page.
//!
//! For a page folder and a slot name there are three outcomes:
//!
//! ```text
//! songs/top.html   → File      (also top.md, rendered from markdown)
//! songs/top/       → Folder    (every .html/.md file, sorted by filename)
//! neither          → Absent    (the slot is removed from the page)
//! ```
//!
//! A file wins over a folder of the same name. Folder entries are ordered by
//! filename so the display order is whatever the file names say, and is the
//! same on every machine.

use crate::dom::{self, DomError, Node};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] DomError),
}

/// Extensions accepted as fragment files, in precedence order.
const FRAGMENT_EXTENSIONS: &[&str] = &["html", "md"];

/// The content resolved for one slot of one page.
#[derive(Debug, Clone, PartialEq)]
pub enum FragmentSource {
    /// A single file replacing the slot content wholesale.
    File(PathBuf),
    /// An ordered folder of sub-fragments.
    Folder(Vec<FolderFragment>),
    /// Nothing provided for this slot.
    Absent,
}

/// One file of a folder-backed slot.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderFragment {
    /// Filename stem; used as the wrapper id and the sub-menu anchor.
    pub id: String,
    pub path: PathBuf,
}

/// Decide what fills `slot` for the page in `page_folder`.
pub fn resolve(page_folder: &Path, slot: &str) -> Result<FragmentSource, FragmentError> {
    for ext in FRAGMENT_EXTENSIONS {
        let file = page_folder.join(format!("{slot}.{ext}"));
        if file.is_file() {
            return Ok(FragmentSource::File(file));
        }
    }

    let folder = page_folder.join(slot);
    if folder.is_dir() {
        return Ok(FragmentSource::Folder(list_fragments(&folder)?));
    }

    Ok(FragmentSource::Absent)
}

/// Fragment files directly inside `folder`, sorted by filename.
///
/// Hidden files and files with other extensions are ignored.
pub fn list_fragments(folder: &Path) -> Result<Vec<FolderFragment>, FragmentError> {
    let read_err = |source| FragmentError::Read {
        path: folder.to_path_buf(),
        source,
    };
    let mut files: Vec<PathBuf> = fs::read_dir(folder)
        .map_err(read_err)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_fragment_file(p))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files
        .into_iter()
        .map(|path| FolderFragment {
            id: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
        })
        .collect())
}

fn is_fragment_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'));
    let known_ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| FRAGMENT_EXTENSIONS.contains(&e.as_str()));
    !hidden && known_ext
}

/// Read a fragment file and parse it into nodes ready for injection.
///
/// Markdown files are rendered to HTML first.
pub fn load(path: &Path) -> Result<Vec<Node>, FragmentError> {
    let text = fs::read_to_string(path).map_err(|source| FragmentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_markdown = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("md"));
    let html = if is_markdown {
        markdown_to_html(&text)
    } else {
        text
    };
    Ok(dom::parse_fragment(&html, &path.display().to_string())?)
}

/// Render markdown to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn page_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn absent_when_nothing_exists() {
        let tmp = page_dir();
        assert_eq!(resolve(tmp.path(), "top").unwrap(), FragmentSource::Absent);
    }

    #[test]
    fn file_resolved() {
        let tmp = page_dir();
        fs::write(tmp.path().join("top.html"), "<p>top</p>").unwrap();
        assert_eq!(
            resolve(tmp.path(), "top").unwrap(),
            FragmentSource::File(tmp.path().join("top.html"))
        );
    }

    #[test]
    fn markdown_file_resolved() {
        let tmp = page_dir();
        fs::write(tmp.path().join("top.md"), "# Top").unwrap();
        assert_eq!(
            resolve(tmp.path(), "top").unwrap(),
            FragmentSource::File(tmp.path().join("top.md"))
        );
    }

    #[test]
    fn html_file_beats_markdown_file() {
        let tmp = page_dir();
        fs::write(tmp.path().join("top.md"), "# Top").unwrap();
        fs::write(tmp.path().join("top.html"), "<p>top</p>").unwrap();
        assert_eq!(
            resolve(tmp.path(), "top").unwrap(),
            FragmentSource::File(tmp.path().join("top.html"))
        );
    }

    #[test]
    fn file_beats_folder() {
        let tmp = page_dir();
        fs::write(tmp.path().join("middle.html"), "<p>file</p>").unwrap();
        fs::create_dir(tmp.path().join("middle")).unwrap();
        fs::write(tmp.path().join("middle/a.html"), "<p>a</p>").unwrap();
        assert_eq!(
            resolve(tmp.path(), "middle").unwrap(),
            FragmentSource::File(tmp.path().join("middle.html"))
        );
    }

    #[test]
    fn folder_entries_sorted_by_filename() {
        let tmp = page_dir();
        let folder = tmp.path().join("middle");
        fs::create_dir(&folder).unwrap();
        for name in ["c.html", "a.html", "b.md"] {
            fs::write(folder.join(name), "<p>x</p>").unwrap();
        }
        let FragmentSource::Folder(entries) = resolve(tmp.path(), "middle").unwrap() else {
            panic!("expected folder");
        };
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn folder_skips_hidden_and_foreign_files() {
        let tmp = page_dir();
        let folder = tmp.path().join("middle");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join(".draft.html"), "x").unwrap();
        fs::write(folder.join("notes.txt"), "x").unwrap();
        fs::write(folder.join("one.html"), "x").unwrap();
        fs::create_dir(folder.join("nested.html")).unwrap();
        let FragmentSource::Folder(entries) = resolve(tmp.path(), "middle").unwrap() else {
            panic!("expected folder");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "one");
    }

    #[test]
    fn empty_folder_yields_no_entries() {
        let tmp = page_dir();
        fs::create_dir(tmp.path().join("middle")).unwrap();
        assert_eq!(
            resolve(tmp.path(), "middle").unwrap(),
            FragmentSource::Folder(vec![])
        );
    }

    #[test]
    fn load_renders_markdown() {
        let tmp = page_dir();
        let path = tmp.path().join("top.md");
        fs::write(&path, "Some **bold** text").unwrap();
        let nodes = load(&path).unwrap();
        let Some(Node::Element(p)) = nodes.first() else {
            panic!("expected element");
        };
        assert_eq!(p.to_html(), "<p>Some <strong>bold</strong> text</p>");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let tmp = page_dir();
        let result = load(&tmp.path().join("missing.html"));
        assert!(matches!(result, Err(FragmentError::Read { .. })));
    }
}
