//! Slot injection.
//!
//! A slot named `top` is declared in the template by two ids:
//!
//! ```html
//! <section id="container_top" class="row">   <!-- layout wrapper -->
//!   <div id="content_top"></div>              <!-- receives the fragment -->
//! </section>
//! ```
//!
//! For each page the container gets the class
//! `container_top_<page>` and the content node `content_top_<page>`, then:
//!
//! | template / content             | result                              |
//! |--------------------------------|-------------------------------------|
//! | no `container_top`             | nothing happens                     |
//! | no `content_top`               | container removed                   |
//! | page has no `top` source       | container removed                   |
//! | `top.html` / `top.md`          | content children replaced           |
//! | `top/` folder                  | [`submenu::compose_folder`]         |

use crate::config::SiteConfig;
use crate::divider::Dividers;
use crate::dom::{self, Document};
use crate::fragment::{self, FragmentError, FragmentSource};
use crate::submenu::{self, content_id};

/// What happened to one slot of one page.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    /// The template does not declare this slot.
    Skipped,
    /// Container removed: the template has no content node, or the page
    /// provides nothing for this slot.
    Removed,
    /// Filled from a single file.
    File,
    /// Filled from a folder of fragments.
    Folder { fragments: usize, menu: bool },
}

pub fn container_id(slot: &str) -> String {
    format!("container_{slot}")
}

/// Apply `source` to `slot` in `doc` for page `page_name`.
pub fn inject(
    doc: &mut Document,
    slot: &str,
    page_name: &str,
    source: &FragmentSource,
    dividers: &Dividers,
    config: &SiteConfig,
) -> Result<SlotOutcome, FragmentError> {
    let container_id = container_id(slot);
    let content_id = content_id(slot);

    let Some(container) = doc.element_by_id_mut(&container_id) else {
        return Ok(SlotOutcome::Skipped);
    };
    container.add_class(&dom::escape(&format!("{container_id}_{page_name}")));

    let Some(content) = doc.element_by_id_mut(&content_id) else {
        doc.remove_by_id(&container_id);
        return Ok(SlotOutcome::Removed);
    };
    content.add_class(&dom::escape(&format!("{content_id}_{page_name}")));

    match source {
        FragmentSource::Absent => {
            doc.remove_by_id(&container_id);
            Ok(SlotOutcome::Removed)
        }
        FragmentSource::File(path) => {
            let nodes = fragment::load(path)?;
            if let Some(content) = doc.element_by_id_mut(&content_id) {
                content.clear_children();
                content.children.extend(nodes);
            }
            Ok(SlotOutcome::File)
        }
        FragmentSource::Folder(fragments) => {
            let menu = submenu::compose_folder(doc, slot, fragments, dividers, config)?;
            Ok(SlotOutcome::Folder {
                fragments: fragments.len(),
                menu,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::FolderFragment;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"<body><section id="container_top" class="row"><div id="content_top"><p>demo</p></div></section><footer>f</footer></body>"#;

    fn doc(source: &str) -> Document {
        dom::parse_document(source, "template").unwrap()
    }

    fn run(doc: &mut Document, slot: &str, source: &FragmentSource) -> SlotOutcome {
        inject(
            doc,
            slot,
            "songs",
            source,
            &Dividers::default(),
            &SiteConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn missing_container_is_noop() {
        let mut d = doc(TEMPLATE);
        let before = d.to_html();
        assert_eq!(run(&mut d, "large", &FragmentSource::Absent), SlotOutcome::Skipped);
        assert_eq!(d.to_html(), before);
    }

    #[test]
    fn missing_content_removes_container() {
        let mut d = doc(r#"<body><section id="container_top"><p>x</p></section></body>"#);
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("top.html");
        fs::write(&path, "<p>new</p>").unwrap();
        assert_eq!(
            run(&mut d, "top", &FragmentSource::File(path)),
            SlotOutcome::Removed
        );
        assert_eq!(d.to_html(), "<body></body>");
    }

    #[test]
    fn absent_source_removes_container() {
        let mut d = doc(TEMPLATE);
        assert_eq!(run(&mut d, "top", &FragmentSource::Absent), SlotOutcome::Removed);
        assert_eq!(d.to_html(), "<body><footer>f</footer></body>");
    }

    #[test]
    fn file_replaces_content_and_adds_classes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("top.html");
        fs::write(&path, "<h1>Songs</h1>").unwrap();

        let mut d = doc(TEMPLATE);
        assert_eq!(run(&mut d, "top", &FragmentSource::File(path)), SlotOutcome::File);
        assert_eq!(
            d.to_html(),
            r#"<body><section id="container_top" class="row container_top_songs"><div id="content_top" class="content_top_songs"><h1>Songs</h1></div></section><footer>f</footer></body>"#
        );
    }

    #[test]
    fn folder_delegates_to_submenu() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.html");
        fs::write(&path, "<p>a</p>").unwrap();
        let source = FragmentSource::Folder(vec![FolderFragment {
            id: "a".into(),
            path,
        }]);

        let mut d = doc(TEMPLATE);
        assert_eq!(
            run(&mut d, "top", &source),
            SlotOutcome::Folder {
                fragments: 1,
                menu: false
            }
        );
        assert!(d.to_html().contains(r#"<div id="a"><p>a</p></div>"#));
    }

    #[test]
    fn classes_accumulate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("top.html");
        fs::write(&path, "x").unwrap();
        let mut d = doc(r#"<div id="container_top" class="a b"><div id="content_top" class="c"></div></div>"#);
        run(&mut d, "top", &FragmentSource::File(path));
        let container = d.element_by_id("container_top").unwrap();
        assert_eq!(
            container.classes().collect::<Vec<_>>(),
            vec!["a", "b", "container_top_songs"]
        );
        let content = d.element_by_id("content_top").unwrap();
        assert_eq!(
            content.classes().collect::<Vec<_>>(),
            vec!["c", "content_top_songs"]
        );
    }
}
