//! CLI output formatting.
//!
//! Output is page-centric: every page leads with its title and output file,
//! and the slots it filled follow as indented context lines.
//!
//! ## Build
//!
//! ```text
//! Pages: about, contact, home, songs, studio_facilities
//! Dividers: 2
//! About → about.html
//!     top: file
//! Home → index.html
//!     large: file
//!     middle: folder (3 fragments, menu)
//!     popups: welcomePopUp
//! Assets: img, css (1 file)
//! Built 5 pages into html (2 warnings)
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 About → about.html
//!     large: not in template
//!     top: file
//!     bottom: removed
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to the terminal. Warnings
//! go to stderr.

use crate::naming;
use crate::page::PageReport;
use crate::site::{BuildEvent, BuildSummary};
use crate::slot::SlotOutcome;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn page_header(report: &PageReport) -> String {
    format!(
        "{} \u{2192} {}",
        naming::make_title(&report.name),
        report.output
    )
}

/// Describe a slot outcome. `None` for slots the template does not have.
fn slot_detail(outcome: &SlotOutcome) -> Option<String> {
    match outcome {
        SlotOutcome::Skipped => None,
        SlotOutcome::Removed => Some("removed".to_string()),
        SlotOutcome::File => Some("file".to_string()),
        SlotOutcome::Folder { fragments, menu } => {
            let menu = if *menu { ", menu" } else { "" };
            Some(format!("folder ({}{})", plural(*fragments, "fragment"), menu))
        }
    }
}

/// Indented context lines for one page: filled slots and popups.
fn page_context(report: &PageReport, show_skipped: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for (slot, outcome) in &report.slots {
        match slot_detail(outcome) {
            Some(detail) if show_skipped || *outcome != SlotOutcome::Removed => {
                lines.push(format!("    {slot}: {detail}"));
            }
            None if show_skipped => lines.push(format!("    {slot}: not in template")),
            _ => {}
        }
    }
    if !report.popups.is_empty() {
        lines.push(format!("    popups: {}", report.popups.join(", ")));
    }
    lines
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::Scanned { pages } => vec![format!("Pages: {}", pages.join(", "))],
        BuildEvent::Dividers { count } => vec![format!("Dividers: {count}")],
        BuildEvent::PageWritten(report) => {
            let mut lines = vec![page_header(report)];
            lines.extend(page_context(report, false));
            lines
        }
        BuildEvent::AssetsCopied { folders, files } => {
            let folders = if folders.is_empty() {
                "no folders".to_string()
            } else {
                folders.join(", ")
            };
            vec![format!("Assets: {} ({})", folders, plural(*files, "file"))]
        }
        BuildEvent::Warning(message) => vec![format!("warning: {message}")],
    }
}

/// Print a build event. Warnings go to stderr.
pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        if matches!(event, BuildEvent::Warning(_)) {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

pub fn format_build_summary(summary: &BuildSummary) -> Vec<String> {
    let mut line = format!(
        "Built {} into {}",
        plural(summary.pages, "page"),
        summary.output.display()
    );
    if summary.warnings > 0 {
        line.push_str(&format!(" ({})", plural(summary.warnings, "warning")));
    }
    vec![line]
}

pub fn print_build_summary(summary: &BuildSummary) {
    for line in format_build_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the slot inventory of every page, including slots the template
/// does not declare.
pub fn format_check_output(reports: &[PageReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), page_header(report)));
        lines.extend(page_context(report, true));
        for warning in &report.warnings {
            lines.push(format!("    warning: {warning}"));
        }
    }
    lines
}

pub fn print_check_output(reports: &[PageReport]) {
    for line in format_check_output(reports) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavOutcome;
    use crate::page::TitleOutcome;
    use crate::placeholder::Substitutions;
    use std::path::PathBuf;

    fn report(name: &str, output: &str) -> PageReport {
        PageReport {
            name: name.to_string(),
            output: output.to_string(),
            title: TitleOutcome::Updated,
            nav: NavOutcome::Built { entries: vec![] },
            substitutions: Substitutions::default(),
            slots: vec![
                ("large".to_string(), SlotOutcome::Skipped),
                ("top".to_string(), SlotOutcome::File),
                (
                    "middle".to_string(),
                    SlotOutcome::Folder {
                        fragments: 3,
                        menu: true,
                    },
                ),
                ("bottom".to_string(), SlotOutcome::Removed),
            ],
            popups: vec![],
            warnings: vec![],
        }
    }

    #[test]
    fn page_written_lists_filled_slots() {
        let event = BuildEvent::PageWritten(report("studio_facilities", "studio_facilities.html"));
        assert_eq!(
            format_build_event(&event),
            vec![
                "Studio Facilities \u{2192} studio_facilities.html",
                "    top: file",
                "    middle: folder (3 fragments, menu)",
            ]
        );
    }

    #[test]
    fn page_written_with_popups() {
        let mut r = report("home", "index.html");
        r.slots.clear();
        r.popups = vec!["introPopUp".into(), "termsPopUp".into()];
        let lines = format_build_event(&BuildEvent::PageWritten(r));
        assert_eq!(lines[0], "Home \u{2192} index.html");
        assert_eq!(lines[1], "    popups: introPopUp, termsPopUp");
    }

    #[test]
    fn single_fragment_folder() {
        assert_eq!(
            slot_detail(&SlotOutcome::Folder {
                fragments: 1,
                menu: false
            }),
            Some("folder (1 fragment)".to_string())
        );
    }

    #[test]
    fn assets_line() {
        let event = BuildEvent::AssetsCopied {
            folders: vec!["img".into(), "css".into()],
            files: 1,
        };
        assert_eq!(format_build_event(&event), vec!["Assets: img, css (1 file)"]);
    }

    #[test]
    fn warning_line() {
        let event = BuildEvent::Warning("favicon/favicon.ico not found, skipping".into());
        assert_eq!(
            format_build_event(&event),
            vec!["warning: favicon/favicon.ico not found, skipping"]
        );
    }

    #[test]
    fn summary_with_and_without_warnings() {
        let mut summary = BuildSummary {
            pages: 1,
            warnings: 0,
            output: PathBuf::from("html"),
        };
        assert_eq!(format_build_summary(&summary), vec!["Built 1 page into html"]);
        summary.pages = 5;
        summary.warnings = 2;
        assert_eq!(
            format_build_summary(&summary),
            vec!["Built 5 pages into html (2 warnings)"]
        );
    }

    #[test]
    fn check_shows_every_slot() {
        let mut r = report("about", "about.html");
        r.warnings = vec!["Navigation container #navItems not found in template".into()];
        assert_eq!(
            format_check_output(&[r]),
            vec![
                "001 About \u{2192} about.html",
                "    large: not in template",
                "    top: file",
                "    middle: folder (3 fragments, menu)",
                "    bottom: removed",
                "    warning: Navigation container #navItems not found in template",
            ]
        );
    }
}
