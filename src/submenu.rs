//! Folder-backed slots: ordered sub-fragments plus an optional menu.
//!
//! A slot filled from a folder gets one `<div id="<stem>">` wrapper per file,
//! in filename order, inside `content_<slot>`. When the template also has a
//! `menu_<slot>` element, that element is rebuilt with one link per
//! fragment:
//!
//! ```html
//! <div class="submenu-item">
//!   <a href="#01-intro" data-target="01-intro">01 Intro</a>
//!   <img src="img/white_lines/line1.svg" alt="hand-drawn divider" class="hand-drawn-line-submenu">
//! </div>
//! ```
//!
//! (whitespace added for readability; the generated markup has none)

use crate::config::SiteConfig;
use crate::divider::Dividers;
use crate::dom::{self, Document, DomError, Element, Node};
use crate::fragment::{self, FolderFragment, FragmentError};
use crate::naming;
use maud::html;

pub fn content_id(slot: &str) -> String {
    format!("content_{slot}")
}

pub fn menu_id(slot: &str) -> String {
    format!("menu_{slot}")
}

/// Fill `content_<slot>` from `fragments` and rebuild `menu_<slot>` if present.
///
/// Returns whether a menu was built.
pub fn compose_folder(
    doc: &mut Document,
    slot: &str,
    fragments: &[FolderFragment],
    dividers: &Dividers,
    config: &SiteConfig,
) -> Result<bool, FragmentError> {
    let mut wrappers = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let mut wrapper = Element::new("div");
        wrapper.set_attr("id", dom::escape(&fragment.id));
        wrapper.children = fragment::load(&fragment.path)?;
        wrappers.push(Node::Element(wrapper));
    }

    if let Some(content) = doc.element_by_id_mut(&content_id(slot)) {
        content.children = wrappers;
    }

    let entries = menu_entries(fragments, dividers, config)?;
    match doc.element_by_id_mut(&menu_id(slot)) {
        Some(menu) => {
            menu.children = entries;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn menu_entries(
    fragments: &[FolderFragment],
    dividers: &Dividers,
    config: &SiteConfig,
) -> Result<Vec<Node>, DomError> {
    let count = fragments.len();
    let mut entries = Vec::with_capacity(count);
    for (i, fragment) in fragments.iter().enumerate() {
        let divider = dividers.after(i, count);
        let entry = dom::element_from_markup(html! {
            div class=(config.submenu.item_class) {
                a href={ "#" (fragment.id) } data-target=(fragment.id) {
                    (naming::make_title(&fragment.id))
                }
                @if let Some(src) = divider {
                    img src=(src) alt=(config.dividers.alt) class=(config.dividers.submenu_class);
                }
            }
        })?;
        entries.push(Node::Element(entry));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"<html><body><div id="container_middle"><nav id="menu_middle"><span>old</span></nav><div id="content_middle"><p>placeholder</p></div></div></body></html>"#;

    fn fragments(dir: &Path, names: &[&str]) -> Vec<FolderFragment> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(format!("{name}.html"));
                fs::write(&path, format!("<p>{name} body</p>")).unwrap();
                FolderFragment {
                    id: name.to_string(),
                    path,
                }
            })
            .collect()
    }

    fn dividers() -> Dividers {
        Dividers::new(vec!["img/d0.svg".into(), "img/d1.svg".into()])
    }

    fn menu_divider_srcs(doc: &Document) -> Vec<String> {
        let mut srcs = Vec::new();
        let menu = doc.element_by_id("menu_middle").unwrap();
        for node in &menu.children {
            if let Node::Element(entry) = node {
                for child in &entry.children {
                    if let Node::Element(img) = child
                        && img.tag == "img"
                    {
                        srcs.push(img.attr("src").unwrap().to_string());
                    }
                }
            }
        }
        srcs
    }

    #[test]
    fn wrappers_in_fragment_order() {
        let tmp = TempDir::new().unwrap();
        let frags = fragments(tmp.path(), &["a", "b", "c"]);
        let mut doc = dom::parse_document(TEMPLATE, "t").unwrap();
        compose_folder(&mut doc, "middle", &frags, &dividers(), &SiteConfig::default()).unwrap();

        let content = doc.element_by_id("content_middle").unwrap();
        assert_eq!(
            content.to_html(),
            r#"<div id="content_middle"><div id="a"><p>a body</p></div><div id="b"><p>b body</p></div><div id="c"><p>c body</p></div></div>"#
        );
    }

    #[test]
    fn menu_links_to_each_fragment() {
        let tmp = TempDir::new().unwrap();
        let frags = fragments(tmp.path(), &["01-intro", "02-studio_tour"]);
        let mut doc = dom::parse_document(TEMPLATE, "t").unwrap();
        let built =
            compose_folder(&mut doc, "middle", &frags, &dividers(), &SiteConfig::default())
                .unwrap();
        assert!(built);

        let html = doc.element_by_id("menu_middle").unwrap().to_html();
        assert!(html.contains(r##"<a href="#01-intro" data-target="01-intro">01 Intro</a>"##));
        assert!(html.contains(r#"data-target="02-studio_tour">02 Studio Tour</a>"#));
        assert!(!html.contains("old"));
    }

    #[test]
    fn dividers_cycle_between_entries_only() {
        let tmp = TempDir::new().unwrap();
        let frags = fragments(tmp.path(), &["a", "b", "c"]);
        let mut doc = dom::parse_document(TEMPLATE, "t").unwrap();
        compose_folder(&mut doc, "middle", &frags, &dividers(), &SiteConfig::default()).unwrap();
        assert_eq!(menu_divider_srcs(&doc), vec!["img/d0.svg", "img/d1.svg"]);
    }

    #[test]
    fn zero_fragments_empties_content_and_menu() {
        let mut doc = dom::parse_document(TEMPLATE, "t").unwrap();
        compose_folder(&mut doc, "middle", &[], &dividers(), &SiteConfig::default()).unwrap();
        assert!(doc.element_by_id("content_middle").unwrap().children.is_empty());
        assert!(doc.element_by_id("menu_middle").unwrap().children.is_empty());
    }

    #[test]
    fn no_menu_node_is_fine() {
        let tmp = TempDir::new().unwrap();
        let frags = fragments(tmp.path(), &["a"]);
        let mut doc = dom::parse_document(
            r#"<div id="container_middle"><div id="content_middle"></div></div>"#,
            "t",
        )
        .unwrap();
        let built =
            compose_folder(&mut doc, "middle", &frags, &dividers(), &SiteConfig::default())
                .unwrap();
        assert!(!built);
        assert!(doc.element_by_id("a").is_some());
    }
}
