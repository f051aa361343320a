//! # Slotweave
//!
//! A static site generator for sites where every page shares one hand-written
//! HTML template. Your filesystem is the data source: each folder under
//! `content/` becomes a page, and the files inside it fill the template
//! elements whose ids name a slot.
//!
//! # Architecture: One Pipeline Per Page
//!
//! ```text
//! 1. Snapshot   template.html, content/, dividers  →  read once per build
//! 2. Compose    fresh template copy per page       →  title, nav, {page}, slots, popups
//! 3. Emit       serialize                          →  index.html, <page>.html
//! 4. Assets     assets/, favicon/, robots/, CNAME  →  copied verbatim
//! ```
//!
//! Every page is composed from its own deep copy of the parsed template, so a
//! slot removed on one page is still there for the next. Pages are processed
//! one at a time in name order; the same input always gives byte-identical
//! output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Whole build: snapshot inputs, emit every page, copy assets, report progress |
//! | [`page`] | One page: template instance, title, the composition pipeline, output file |
//! | [`slot`] | Fill or remove one `container_<slot>` / `content_<slot>` pair |
//! | [`submenu`] | Folder-backed slots: one section per file plus a `menu_<slot>` |
//! | [`nav`] | Site navigation in configured priority order |
//! | [`popup`] | Modal scaffolds for the files in `popups/` |
//! | [`placeholder`] | `{page}` token in images, body classes, and spans |
//! | [`fragment`] | Which file or folder fills a slot; Markdown rendering |
//! | [`divider`] | Divider images placed between menu entries |
//! | [`scan`] | Page folders under the content root |
//! | [`assets`] | Static file copying |
//! | [`dom`] | Owned HTML tree: parse, query, mutate, serialize |
//! | [`naming`] | Page name, title, URL, and nav class conventions |
//! | [`config`] | `config.toml` loading, validation, and stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Ids Are the Template Language
//!
//! There are no template tags. A template is a plain HTML page that renders on
//! its own in a browser, with demo content in every slot. The generator only
//! looks for element ids (`container_top`, `content_top`, `menu_top`,
//! `navItems`) and one literal token. Designers edit the template with any
//! HTML tool; nothing breaks when they do.
//!
//! ## Owned Tree Over String Splicing
//!
//! Fragments are parsed and inserted as nodes rather than pasted as text, so
//! a stray unclosed tag in a content file cannot swallow the rest of the
//! template, and classes can be appended to the existing list instead of
//! rewritten. See [`dom`] for what the round trip keeps and drops.
//!
//! ## Maud for Generated Markup
//!
//! Navigation entries, sub-menus, and popup scaffolds are written with
//! [Maud](https://maud.lambda.xyz/) and parsed into the tree, so every
//! generated value is escaped by the macro.

pub mod assets;
pub mod config;
pub mod divider;
pub mod dom;
pub mod fragment;
pub mod naming;
pub mod nav;
pub mod output;
pub mod page;
pub mod placeholder;
pub mod popup;
pub mod scan;
pub mod site;
pub mod slot;
pub mod submenu;

#[cfg(test)]
pub(crate) mod test_helpers;
