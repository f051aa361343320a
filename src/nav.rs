//! Site navigation.
//!
//! Every page except `home` gets one entry in the navigation container
//! (`#navItems` by default). Entries follow the configured priority order;
//! pages missing from that list come after the listed ones, in name order.
//!
//! ```html
//! <div class="nav-item mb-2">
//!   <a href="songs.html" class="songs">Songs</a>
//!   <img src="img/white_lines/line1.svg" alt="hand-drawn divider" class="hand-drawn-line-menu">
//! </div>
//! ```
//!
//! The divider image sits inside every entry but the last.

use crate::config::SiteConfig;
use crate::divider::Dividers;
use crate::dom::{self, Document, DomError, Node};
use crate::naming;
use maud::html;

#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    /// Container rebuilt with these pages, in display order.
    Built { entries: Vec<String> },
    /// The template has no navigation container.
    Missing,
}

/// Pages shown in the navigation, in display order.
///
/// `page_names` is expected in name order; the sort is stable, so pages with
/// the same rank keep that order.
pub fn order_pages<'a>(page_names: &'a [String], priority: &[String]) -> Vec<&'a str> {
    let rank = |name: &str| {
        priority
            .iter()
            .position(|p| p == name)
            .unwrap_or(priority.len())
    };
    let mut pages: Vec<&str> = page_names
        .iter()
        .map(String::as_str)
        .filter(|name| !naming::is_home(name))
        .collect();
    pages.sort_by_key(|name| rank(name));
    pages
}

/// Rebuild the navigation container of `doc`.
pub fn build_nav(
    doc: &mut Document,
    page_names: &[String],
    dividers: &Dividers,
    config: &SiteConfig,
) -> Result<NavOutcome, DomError> {
    let Some(container) = doc.element_by_id_mut(&config.navigation.container_id) else {
        return Ok(NavOutcome::Missing);
    };

    let pages = order_pages(page_names, &config.navigation.order);
    let count = pages.len();
    let mut entries = Vec::with_capacity(count);
    for (i, page) in pages.iter().enumerate() {
        let divider = dividers.after(i, count);
        let entry = dom::element_from_markup(html! {
            div class=(config.navigation.item_class) {
                a href=(naming::page_url(page)) class=(naming::nav_class(page)) {
                    (naming::make_title(page))
                }
                @if let Some(src) = divider {
                    img src=(src) alt=(config.dividers.alt) class=(config.dividers.menu_class);
                }
            }
        })?;
        entries.push(Node::Element(entry));
    }
    container.children = entries;

    Ok(NavOutcome::Built {
        entries: pages.into_iter().map(String::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn priority_order_without_home() {
        let pages = names(&["about", "contact", "home", "songs"]);
        let order = names(&["songs", "contact", "about"]);
        assert_eq!(order_pages(&pages, &order), vec!["songs", "contact", "about"]);
    }

    #[test]
    fn unranked_pages_follow_in_input_order() {
        let pages = names(&["blog", "contact", "extras", "songs"]);
        let order = names(&["songs", "contact"]);
        assert_eq!(
            order_pages(&pages, &order),
            vec!["songs", "contact", "blog", "extras"]
        );
    }

    #[test]
    fn empty_priority_keeps_name_order() {
        let pages = names(&["b", "a"]);
        assert_eq!(order_pages(&pages, &[]), vec!["b", "a"]);
    }

    #[test]
    fn builds_entries_with_dividers() {
        let mut doc =
            dom::parse_document(r#"<nav><div id="navItems"><p>stale</p></div></nav>"#, "t")
                .unwrap();
        let dividers = Dividers::new(vec!["img/white_lines/line1.svg".into()]);
        let pages = names(&["home", "about", "studio_facilities"]);

        let outcome = build_nav(&mut doc, &pages, &dividers, &SiteConfig::default()).unwrap();
        assert_eq!(
            outcome,
            NavOutcome::Built {
                entries: names(&["studio_facilities", "about"])
            }
        );
        assert_eq!(
            doc.to_html(),
            concat!(
                r#"<nav><div id="navItems">"#,
                r#"<div class="nav-item mb-2"><a href="studio_facilities.html" class="studio-facilities">Studio Facilities</a>"#,
                r#"<img src="img/white_lines/line1.svg" alt="hand-drawn divider" class="hand-drawn-line-menu"></div>"#,
                r#"<div class="nav-item mb-2"><a href="about.html" class="about">About</a></div>"#,
                r#"</div></nav>"#,
            )
        );
    }

    #[test]
    fn no_dividers_when_set_is_empty() {
        let mut doc = dom::parse_document(r#"<div id="navItems"></div>"#, "t").unwrap();
        build_nav(
            &mut doc,
            &names(&["a", "b"]),
            &Dividers::default(),
            &SiteConfig::default(),
        )
        .unwrap();
        assert!(!doc.to_html().contains("<img"));
    }

    #[test]
    fn missing_container_reported() {
        let mut doc = dom::parse_document("<nav></nav>", "t").unwrap();
        let outcome = build_nav(
            &mut doc,
            &names(&["songs"]),
            &Dividers::default(),
            &SiteConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome, NavOutcome::Missing);
        assert_eq!(doc.to_html(), "<nav></nav>");
    }
}
