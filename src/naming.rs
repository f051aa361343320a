//! Page naming conventions shared by every stage.
//!
//! A page is identified by the lower-cased stem of its content folder. The
//! same raw identifier feeds four derived forms:
//!
//! - `Studio_Facilities/` → page name `studio_facilities`
//! - display title: `Studio Facilities` (nav labels, `<title>`, sub-menus)
//! - output file / link target: `studio_facilities.html`
//! - nav CSS class: `studio-facilities`
//!
//! The reserved page `home` maps to the site root document `index.html`.

use std::path::Path;

/// Name of the page that becomes the site root.
pub const HOME_PAGE: &str = "home";

/// Output document for the home page.
pub const ROOT_DOCUMENT: &str = "index.html";

/// Derive a page name from its content folder: the lower-cased file stem.
pub fn page_name(folder: &Path) -> String {
    folder
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

pub fn is_home(page_name: &str) -> bool {
    page_name.eq_ignore_ascii_case(HOME_PAGE)
}

/// Human-readable title for a raw identifier.
///
/// `-` and `_` become spaces, and each space-separated word is capitalized
/// (first character upper-cased, the rest lower-cased):
/// - `"studio-facilities"` → `"Studio Facilities"`
/// - `"about_us"` → `"About Us"`
/// - `"FAQ"` → `"Faq"`
pub fn make_title(raw: &str) -> String {
    raw.replace(['-', '_'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Relative URL (and output filename) of a page.
pub fn page_url(page_name: &str) -> String {
    if is_home(page_name) {
        ROOT_DOCUMENT.to_string()
    } else {
        format!("{page_name}.html")
    }
}

/// CSS class attached to a page's nav link.
pub fn nav_class(page_name: &str) -> String {
    page_name.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_dashed_name() {
        assert_eq!(make_title("studio-facilities"), "Studio Facilities");
    }

    #[test]
    fn title_from_underscored_name() {
        assert_eq!(make_title("about_us"), "About Us");
    }

    #[test]
    fn title_lowercases_word_tails() {
        assert_eq!(make_title("FAQ"), "Faq");
        assert_eq!(make_title("mIxEd-case"), "Mixed Case");
    }

    #[test]
    fn title_single_word() {
        assert_eq!(make_title("songs"), "Songs");
    }

    #[test]
    fn title_empty() {
        assert_eq!(make_title(""), "");
    }

    #[test]
    fn title_keeps_consecutive_separators_as_spaces() {
        assert_eq!(make_title("a--b"), "A  B");
    }

    #[test]
    fn page_name_is_lowercased_stem() {
        assert_eq!(page_name(Path::new("content/Songs")), "songs");
        assert_eq!(page_name(Path::new("content/Studio_Facilities")), "studio_facilities");
    }

    #[test]
    fn home_maps_to_root_document() {
        assert_eq!(page_url("home"), "index.html");
    }

    #[test]
    fn other_pages_map_to_html_file() {
        assert_eq!(page_url("songs"), "songs.html");
        assert_eq!(page_url("studio_facilities"), "studio_facilities.html");
    }

    #[test]
    fn nav_class_uses_dashes() {
        assert_eq!(nav_class("studio_facilities"), "studio-facilities");
    }
}
