//! Popup (modal) scaffolds.
//!
//! Every fragment in a page's `popups/` folder becomes a Bootstrap modal
//! appended to the end of `<body>`. For `popups/intro.html`:
//!
//! ```html
//! <div class="modal fade" id="introPopUp">
//!   <div class="modal-dialog">
//!     <div class="modal-content">
//!       <div class="modal-header">
//!         <a href="#" data-bs-dismiss="modal" aria-label="Close" class="modal-close">X</a>
//!       </div>
//!       <div class="modal-body"><!-- intro.html --></div>
//!     </div>
//!   </div>
//! </div>
//! ```

use crate::dom::{self, Document, Node};
use crate::fragment::{self, FragmentError};
use maud::html;
use std::path::Path;

const BODY_CLASS: &str = "modal-body";

pub fn popup_id(name: &str) -> String {
    format!("{name}PopUp")
}

/// Append one modal per fragment in `popup_folder` and return their ids.
///
/// A missing folder is not an error and leaves `doc` unchanged.
pub fn compose_popups(
    doc: &mut Document,
    popup_folder: &Path,
) -> Result<Vec<String>, FragmentError> {
    if !popup_folder.is_dir() {
        return Ok(Vec::new());
    }

    let mut ids = Vec::new();
    let mut modals = Vec::new();
    for popup in fragment::list_fragments(popup_folder)? {
        let id = popup_id(&popup.id);
        let mut modal = dom::element_from_markup(html! {
            div class="modal fade" id=(id) {
                div class="modal-dialog" {
                    div class="modal-content" {
                        div class="modal-header" {
                            a href="#" data-bs-dismiss="modal" aria-label="Close" class="modal-close" { "X" }
                        }
                        div class=(BODY_CLASS) {}
                    }
                }
            }
        })?;
        if let Some(body) = modal.descendant_with_class_mut(BODY_CLASS) {
            body.children = fragment::load(&popup.path)?;
        }
        modals.push(Node::Element(modal));
        ids.push(id);
    }

    match doc.first_by_tag_mut("body") {
        Some(body) => body.children.extend(modals),
        None => doc.children.extend(modals),
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn folder_with(files: &[(&str, &str)]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let popups = tmp.path().join("popups");
        fs::create_dir(&popups).unwrap();
        for (name, body) in files {
            fs::write(popups.join(name), body).unwrap();
        }
        tmp
    }

    #[test]
    fn scaffold_wraps_fragment() {
        let tmp = folder_with(&[("intro.html", "<p>Hello</p>")]);
        let mut doc = dom::parse_document("<body><main></main></body>", "t").unwrap();
        let ids = compose_popups(&mut doc, &tmp.path().join("popups")).unwrap();

        assert_eq!(ids, vec!["introPopUp"]);
        assert_eq!(
            doc.to_html(),
            concat!(
                r#"<body><main></main>"#,
                r#"<div class="modal fade" id="introPopUp"><div class="modal-dialog"><div class="modal-content">"#,
                r##"<div class="modal-header"><a href="#" data-bs-dismiss="modal" aria-label="Close" class="modal-close">X</a></div>"##,
                r#"<div class="modal-body"><p>Hello</p></div>"#,
                r#"</div></div></div></body>"#,
            )
        );
    }

    #[test]
    fn popups_sorted_by_filename() {
        let tmp = folder_with(&[("b.html", "b"), ("a.md", "*a*")]);
        let mut doc = dom::parse_document("<body></body>", "t").unwrap();
        let ids = compose_popups(&mut doc, &tmp.path().join("popups")).unwrap();
        assert_eq!(ids, vec!["aPopUp", "bPopUp"]);
        assert!(doc.to_html().contains("<em>a</em>"));
    }

    #[test]
    fn missing_folder_is_noop() {
        let tmp = TempDir::new().unwrap();
        let mut doc = dom::parse_document("<body></body>", "t").unwrap();
        let ids = compose_popups(&mut doc, &tmp.path().join("popups")).unwrap();
        assert!(ids.is_empty());
        assert_eq!(doc.to_html(), "<body></body>");
    }

    #[test]
    fn without_body_appends_to_root() {
        let tmp = folder_with(&[("x.html", "x")]);
        let mut doc = dom::parse_document("<div></div>", "t").unwrap();
        compose_popups(&mut doc, &tmp.path().join("popups")).unwrap();
        assert!(doc.element_by_id("xPopUp").is_some());
        assert_eq!(doc.children.len(), 2);
    }
}
