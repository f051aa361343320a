//! Page emission: one content folder in, one HTML document out.
//!
//! Every page starts from a fresh deep copy of the parsed template and runs
//! the same fixed pipeline:
//!
//! ```text
//! title → navigation → placeholders → slots (configured order) → popups → serialize
//! ```
//!
//! The navigation runs before slot injection, so a fragment can never
//! provide the navigation container. Placeholders are substituted before
//! fragments arrive, so content files are inserted as written.
//!
//! Nothing here is shared between pages except read-only inputs
//! ([`PageContext`]); a page can only change its own copy of the template.

use crate::config::SiteConfig;
use crate::divider::Dividers;
use crate::dom::{self, Document, DomError, Element};
use crate::fragment::FragmentError;
use crate::nav::{self, NavOutcome};
use crate::naming;
use crate::placeholder::{self, Substitutions};
use crate::popup;
use crate::scan::PageFolder;
use crate::slot::{self, SlotOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Fragment(#[from] FragmentError),
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The parsed template. Parsed once per build, copied once per page.
#[derive(Debug, Clone)]
pub struct Template {
    baseline: Document,
}

impl Template {
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let source = fs::read_to_string(path).map_err(|source| PageError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&source, &path.display().to_string())?)
    }

    pub fn parse(source: &str, origin: &str) -> Result<Self, DomError> {
        Ok(Self {
            baseline: dom::parse_document(source, origin)?,
        })
    }

    /// A private copy of the template for one page.
    pub fn instantiate(&self) -> Document {
        self.baseline.clone()
    }
}

/// Read-only inputs shared by every page of a build.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub template: &'a Template,
    /// Every page name of the build, in name order.
    pub page_names: &'a [String],
    pub dividers: &'a Dividers,
    pub config: &'a SiteConfig,
}

/// What happened while composing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub name: String,
    /// Output filename, relative to the output directory.
    pub output: String,
    pub title: TitleOutcome,
    pub nav: NavOutcome,
    pub substitutions: Substitutions,
    /// One entry per configured slot, in injection order.
    pub slots: Vec<(String, SlotOutcome)>,
    pub popups: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub report: PageReport,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleOutcome {
    /// The template's `<title>` text was rewritten.
    Updated,
    /// The template had no `<title>`; one was added to `<head>`.
    Created,
    /// Neither `<title>` nor `<head>` exist.
    Skipped,
}

/// Set the document title for `page_name`.
///
/// The token in an existing `<title>` becomes the page title. For the home
/// page the token is dropped instead, along with a trailing `|` separator:
/// `"Studio | {page}"` becomes `"Studio | Songs"` and, for home, `"Studio"`.
pub fn set_title(doc: &mut Document, page_name: &str, token: &str) -> TitleOutcome {
    let title = naming::make_title(page_name);

    if let Some(el) = doc.first_by_tag_mut("title") {
        let current = el.text();
        let updated = if naming::is_home(page_name) {
            let stripped = current.replace(token, "");
            let stripped = stripped.trim();
            stripped.strip_suffix('|').unwrap_or(stripped).trim().to_string()
        } else {
            current.replace(token, &dom::escape(&title))
        };
        el.set_text(updated);
        return TitleOutcome::Updated;
    }

    match doc.first_by_tag_mut("head") {
        Some(head) => {
            let mut el = Element::new("title");
            el.set_text(dom::escape(&title).into_owned());
            head.append(dom::Node::Element(el));
            TitleOutcome::Created
        }
        None => TitleOutcome::Skipped,
    }
}

/// Compose `page` without writing it.
pub fn render(page: &PageFolder, ctx: &PageContext<'_>) -> Result<RenderedPage, PageError> {
    let config = ctx.config;
    let mut doc = ctx.template.instantiate();
    let mut warnings = Vec::new();

    let title = set_title(&mut doc, &page.name, &config.placeholder.token);
    if title == TitleOutcome::Skipped {
        warnings.push("Template has no <head>; title not set".to_string());
    }

    let nav = nav::build_nav(&mut doc, ctx.page_names, ctx.dividers, config)?;
    if nav == NavOutcome::Missing {
        warnings.push(format!(
            "Navigation container #{} not found in template",
            config.navigation.container_id
        ));
    }

    let substitutions = placeholder::substitute(&mut doc, &page.name, &config.placeholder);

    let mut slots = Vec::with_capacity(config.slots.names.len());
    for (slot, source) in page.slot_sources(&config.slots.names)? {
        let outcome = slot::inject(&mut doc, &slot, &page.name, &source, ctx.dividers, config)?;
        slots.push((slot, outcome));
    }

    let popups = popup::compose_popups(&mut doc, &page.path.join(&config.popups.folder))?;

    Ok(RenderedPage {
        report: PageReport {
            name: page.name.clone(),
            output: naming::page_url(&page.name),
            title,
            nav,
            substitutions,
            slots,
            popups,
            warnings,
        },
        html: doc.to_html(),
    })
}

/// Compose `page` and write it into `output_dir`.
pub fn emit(
    page: &PageFolder,
    ctx: &PageContext<'_>,
    output_dir: &Path,
) -> Result<PageReport, PageError> {
    let rendered = render(page, ctx)?;
    let path = output_dir.join(&rendered.report.output);
    fs::write(&path, rendered.html).map_err(|source| PageError::Write { path, source })?;
    Ok(rendered.report)
}
