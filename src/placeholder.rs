//! Page placeholder substitution.
//!
//! The template can mention the page being built through a literal token
//! (default `{page}`). Three passes replace it, each switchable in
//! `[placeholder]`:
//!
//! | where                        | replaced with          | example               |
//! |------------------------------|------------------------|-----------------------|
//! | `<img>` `src` and `alt`      | page name              | `img/songs-banner.png`|
//! | `<body>` class tokens        | page name              | `page-songs`          |
//! | `<span>` with a single text  | page title             | `Studio Facilities`   |
//!
//! Nothing else in the document is touched: a token in a paragraph or in a
//! `<div>` class stays as written. The `<title>` element is handled by the
//! page emitter.

use crate::config::PlaceholderConfig;
use crate::dom::{self, Document};
use crate::naming;

/// Number of substitutions made by each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Substitutions {
    pub images: usize,
    pub body_classes: usize,
    pub spans: usize,
}

impl Substitutions {
    pub fn total(&self) -> usize {
        self.images + self.body_classes + self.spans
    }
}

pub fn substitute(
    doc: &mut Document,
    page_name: &str,
    config: &PlaceholderConfig,
) -> Substitutions {
    let token = config.token.as_str();
    let name = dom::escape(page_name).into_owned();
    let title = dom::escape(&naming::make_title(page_name)).into_owned();
    let mut counts = Substitutions::default();

    doc.visit_elements_mut(|el| match el.tag.as_str() {
        "img" if config.images => {
            for attr in ["src", "alt"] {
                if let Some(value) = el.attr(attr)
                    && value.contains(token)
                {
                    let replaced = value.replace(token, &name);
                    el.set_attr(attr, replaced);
                    counts.images += 1;
                }
            }
        }
        "body" if config.body_class => {
            if el.classes().any(|c| c.contains(token)) {
                counts.body_classes += el.classes().filter(|c| c.contains(token)).count();
                el.map_classes(|c| c.replace(token, &name));
            }
        }
        "span" if config.spans => {
            if let Some(text) = el.sole_text_mut()
                && text.contains(token)
            {
                *text = text.replace(token, &title);
                counts.spans += 1;
            }
        }
        _ => {}
    });

    counts
}
