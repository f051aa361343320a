//! Whole-site build.
//!
//! ```text
//! config ─┐
//!         ├─ scan content/ ─┐
//! template┘                 ├─ for each page (sorted): render → write
//! dividers ─────────────────┘
//! assets ─→ copy into output
//! ```
//!
//! The template, the divider list, and the page names are read once before
//! the first page and are never changed afterwards. Pages are composed and
//! written one at a time in name order. A failure stops the build and leaves
//! the pages already written in place; building again overwrites them.
//!
//! Progress is reported as [`BuildEvent`]s on an optional channel so the CLI
//! can print while the build runs and tests can ignore it.

use crate::assets::{self, AssetError};
use crate::config::SiteConfig;
use crate::divider::Dividers;
use crate::page::{self, PageContext, PageError, PageReport, Template};
use crate::scan::{self, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Page '{page}': {source}")]
    Page { page: String, source: PageError },
    #[error("Template error: {0}")]
    Template(#[source] PageError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Progress reported during [`build`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// The content tree was scanned.
    Scanned { pages: Vec<String> },
    /// Divider images discovered for menus.
    Dividers { count: usize },
    /// A page was composed and written.
    PageWritten(PageReport),
    /// Static files copied.
    AssetsCopied { folders: Vec<String>, files: usize },
    /// Something was skipped; the build continues.
    Warning(String),
}

/// Totals of a finished build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSummary {
    pub pages: usize,
    pub warnings: usize,
    pub output: PathBuf,
}

/// Inputs read once per build and shared by every page.
struct Snapshot {
    template: Template,
    tree: scan::ContentTree,
    page_names: Vec<String>,
    dividers: Dividers,
}

fn take_snapshot(
    root: &Path,
    config: &SiteConfig,
    warn: &mut dyn FnMut(String),
) -> Result<Snapshot, SiteError> {
    let template = Template::load(&root.join(&config.template)).map_err(SiteError::Template)?;
    let tree = scan::scan(&root.join(&config.content_dir))?;
    let page_names = tree.page_names();

    let assets_dir = root.join(&config.assets_dir);
    let dividers = match Dividers::discover(&assets_dir, &config.dividers)? {
        Some(dividers) => dividers,
        None => {
            warn(format!(
                "Divider folder {} not found; menus have no dividers",
                assets_dir
                    .join(&config.dividers.image_dir)
                    .join(&config.dividers.folder)
                    .display()
            ));
            Dividers::default()
        }
    };

    Ok(Snapshot {
        template,
        tree,
        page_names,
        dividers,
    })
}

/// Build the site at `root` into `output`.
pub fn build(
    root: &Path,
    output: &Path,
    config: &SiteConfig,
    progress: Option<Sender<BuildEvent>>,
) -> Result<BuildSummary, SiteError> {
    let send = |event: BuildEvent| {
        if let Some(tx) = &progress {
            tx.send(event).ok();
        }
    };
    let mut warnings = 0;
    let mut warn = |message: String| {
        warnings += 1;
        send(BuildEvent::Warning(message));
    };

    let snapshot = take_snapshot(root, config, &mut warn)?;
    send(BuildEvent::Scanned {
        pages: snapshot.page_names.clone(),
    });
    send(BuildEvent::Dividers {
        count: snapshot.dividers.urls().len(),
    });

    fs::create_dir_all(output)?;

    let ctx = PageContext {
        template: &snapshot.template,
        page_names: &snapshot.page_names,
        dividers: &snapshot.dividers,
        config,
    };
    for page_folder in &snapshot.tree.pages {
        let report = page::emit(page_folder, &ctx, output).map_err(|source| SiteError::Page {
            page: page_folder.name.clone(),
            source,
        })?;
        for message in &report.warnings {
            warn(format!("{}: {}", report.name, message));
        }
        send(BuildEvent::PageWritten(report));
    }

    let copied =
        assets::copy_static(root, &root.join(&config.assets_dir), output, &config.assets)?;
    for missing in &copied.missing {
        warn(format!("{} not found, skipping", missing.display()));
    }
    send(BuildEvent::AssetsCopied {
        folders: copied.folders,
        files: copied.files.len(),
    });

    Ok(BuildSummary {
        pages: snapshot.tree.pages.len(),
        warnings,
        output: output.to_path_buf(),
    })
}

/// Compose every page in memory and report what each slot resolved to.
///
/// Nothing is written.
pub fn check(root: &Path, config: &SiteConfig) -> Result<Vec<PageReport>, SiteError> {
    let mut ignored = |_: String| {};
    let snapshot = take_snapshot(root, config, &mut ignored)?;
    let ctx = PageContext {
        template: &snapshot.template,
        page_names: &snapshot.page_names,
        dividers: &snapshot.dividers,
        config,
    };
    snapshot
        .tree
        .pages
        .iter()
        .map(|page_folder| {
            page::render(page_folder, &ctx)
                .map(|rendered| rendered.report)
                .map_err(|source| SiteError::Page {
                    page: page_folder.name.clone(),
                    source,
                })
        })
        .collect()
}
