//! Shared test utilities for the slotweave test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let out = tmp.path().join("html");
//! site::build(tmp.path(), &out, &SiteConfig::default(), None).unwrap();
//!
//! let songs = read_page(&out, "songs.html");
//! assert_eq!(nav_links(&songs)[0], "songs.html");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::dom::{self, Document, Element, Node};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Output lookups: panic with a clear message on miss
// =========================================================================

/// Read and parse a generated page. Panics if missing.
pub fn read_page(output: &Path, file: &str) -> Document {
    let path = output.join(file);
    let html = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    dom::parse_document(&html, file).unwrap()
}

/// Find an element by id. Panics if not found.
pub fn by_id<'a>(doc: &'a Document, id: &str) -> &'a Element {
    doc.element_by_id(id)
        .unwrap_or_else(|| panic!("element #{id} not found"))
}

/// Child elements of `el`, skipping text.
pub fn child_elements(el: &Element) -> Vec<&Element> {
    el.children
        .iter()
        .filter_map(|node| match node {
            Node::Element(child) => Some(child),
            Node::Text(_) => None,
        })
        .collect()
}

/// `href` of every navigation link, in order.
pub fn nav_links(doc: &Document) -> Vec<String> {
    child_elements(by_id(doc, "navItems"))
        .into_iter()
        .filter_map(|entry| {
            child_elements(entry)
                .into_iter()
                .find(|el| el.tag == "a")
                .and_then(|a| a.attr("href"))
                .map(String::from)
        })
        .collect()
}
