//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives at
//! the project root and is optional: stock defaults describe the standard
//! layout, and a user file only overrides the keys it names.
//!
//! ## Project Layout (defaults)
//!
//! ```text
//! site/
//! ├── config.toml                  # Optional overrides
//! ├── template.html                # Shared page template
//! ├── content/
//! │   ├── home/                    # → index.html
//! │   │   └── large.html
//! │   └── songs/                   # → songs.html
//! │       ├── top.md               # Single-file slot (markdown is rendered)
//! │       ├── middle/              # Folder slot, one sub-fragment per file
//! │       │   ├── 01-intro.html
//! │       │   └── 02-catalogue.html
//! │       └── popups/
//! │           └── lyrics.html      # → #lyricsPopUp modal
//! ├── assets/
//! │   ├── css/ js/ fonts/
//! │   └── img/white_lines/line1.svg
//! ├── favicon/
//! ├── robots/
//! └── CNAME
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! [navigation]
//! order = ["songs", "contact", "about"]
//!
//! [placeholder]
//! body_class = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the optional config file at the project root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Template file, relative to the project root.
    pub template: String,
    /// Directory holding one folder per page, relative to the project root.
    pub content_dir: String,
    /// Directory holding static assets, relative to the project root.
    pub assets_dir: String,
    pub slots: SlotsConfig,
    pub navigation: NavigationConfig,
    pub dividers: DividersConfig,
    pub submenu: SubmenuConfig,
    pub placeholder: PlaceholderConfig,
    pub popups: PopupsConfig,
    pub assets: AssetsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template: "template.html".to_string(),
            content_dir: "content".to_string(),
            assets_dir: "assets".to_string(),
            slots: SlotsConfig::default(),
            navigation: NavigationConfig::default(),
            dividers: DividersConfig::default(),
            submenu: SubmenuConfig::default(),
            placeholder: PlaceholderConfig::default(),
            popups: PopupsConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.names.is_empty() {
            return Err(ConfigError::Validation(
                "slots.names must not be empty".into(),
            ));
        }
        for (i, name) in self.slots.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "slots.names entries must not be blank".into(),
                ));
            }
            if self.slots.names[..i].contains(name) {
                return Err(ConfigError::Validation(format!(
                    "slots.names contains '{name}' more than once"
                )));
            }
        }
        if self.placeholder.token.is_empty() {
            return Err(ConfigError::Validation(
                "placeholder.token must not be empty".into(),
            ));
        }
        if self.dividers.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "dividers.prefix must not be empty".into(),
            ));
        }
        if self.popups.folder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "popups.folder must not be empty".into(),
            ));
        }
        if self.navigation.container_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "navigation.container_id must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Template slots, injected in the order listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotsConfig {
    pub names: Vec<String>,
}

impl Default for SlotsConfig {
    fn default() -> Self {
        Self {
            names: ["large", "split", "top", "middle", "bottom"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Site-wide navigation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Id of the element whose children are replaced by the nav entries.
    pub container_id: String,
    /// Class list of each entry wrapper.
    pub item_class: String,
    /// Canonical page order. Pages not listed follow, in name order.
    pub order: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            container_id: "navItems".to_string(),
            item_class: "nav-item mb-2".to_string(),
            order: [
                "commissions",
                "songs",
                "podcasts",
                "studio_facilities",
                "experiments",
                "contact",
                "about",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Divider graphics placed between nav and sub-menu entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DividersConfig {
    /// Image directory inside `assets_dir`; also the URL prefix.
    pub image_dir: String,
    /// Folder inside `image_dir` holding the divider SVGs.
    pub folder: String,
    /// Only `*.svg` files whose name starts with this prefix are dividers.
    pub prefix: String,
    pub alt: String,
    /// Class of dividers in the site navigation.
    pub menu_class: String,
    /// Class of dividers in slot sub-menus.
    pub submenu_class: String,
}

impl Default for DividersConfig {
    fn default() -> Self {
        Self {
            image_dir: "img".to_string(),
            folder: "white_lines".to_string(),
            prefix: "line".to_string(),
            alt: "hand-drawn divider".to_string(),
            menu_class: "hand-drawn-line-menu".to_string(),
            submenu_class: "hand-drawn-line-submenu".to_string(),
        }
    }
}

/// Menus generated for folder-backed slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmenuConfig {
    pub item_class: String,
}

impl Default for SubmenuConfig {
    fn default() -> Self {
        Self {
            item_class: "submenu-item".to_string(),
        }
    }
}

/// Page placeholder token and the passes that substitute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderConfig {
    pub token: String,
    /// Substitute in `<img>` `src` and `alt`.
    pub images: bool,
    /// Substitute the title form inside `<span>` text.
    pub spans: bool,
    /// Substitute inside `<body>` class tokens.
    pub body_class: bool,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            token: "{page}".to_string(),
            images: true,
            spans: true,
            body_class: true,
        }
    }
}

/// Popup (modal) fragments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopupsConfig {
    /// Folder inside each page folder.
    pub folder: String,
}

impl Default for PopupsConfig {
    fn default() -> Self {
        Self {
            folder: "popups".to_string(),
        }
    }
}

/// Static files copied verbatim into the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Folders inside `assets_dir` copied recursively, when present.
    pub folders: Vec<String>,
    pub favicon_dir: String,
    pub favicon_files: Vec<String>,
    pub robots_dir: String,
    pub robots_files: Vec<String>,
    /// Custom-domain file at the project root, copied when present.
    pub cname: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            folders: ["img", "css", "js", "fonts"].map(String::from).to_vec(),
            favicon_dir: "favicon".to_string(),
            favicon_files: [
                "favicon-16x16.png",
                "favicon-32x32.png",
                "favicon.ico",
                "favicon.svg",
                "apple-touch-icon.png",
                "site.webmanifest",
                "android-chrome-192x192.png",
                "android-chrome-512x512.png",
            ]
            .map(String::from)
            .to_vec(),
            robots_dir: "robots".to_string(),
            robots_files: ["robots.txt", "sitemap.xml"].map(String::from).to_vec(),
            cname: "CNAME".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the project root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Slotweave Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Shared page template (relative to the project root).
template = "template.html"

# One folder per page; folder name (lower-cased) is the page name.
# The folder named "home" becomes index.html.
content_dir = "content"

# Static assets root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Slots
# ---------------------------------------------------------------------------
[slots]
# For each name the template may declare container_<name>, content_<name>
# and menu_<name>. A page fills a slot with <name>.html / <name>.md, or with
# a <name>/ folder of fragments (files sorted by name). Slots are injected in
# this order.
names = ["large", "split", "top", "middle", "bottom"]

# ---------------------------------------------------------------------------
# Navigation
# ---------------------------------------------------------------------------
[navigation]
# Element whose children are replaced by the generated nav list.
container_id = "navItems"

# Class list of each nav entry wrapper.
item_class = "nav-item mb-2"

# Canonical order. Pages not listed here follow, in name order.
order = ["commissions", "songs", "podcasts", "studio_facilities", "experiments", "contact", "about"]

# ---------------------------------------------------------------------------
# Divider graphics
# ---------------------------------------------------------------------------
[dividers]
# Dividers are <assets_dir>/<image_dir>/<folder>/<prefix>*.svg, used in
# name order and cycled between consecutive menu entries.
image_dir = "img"
folder = "white_lines"
prefix = "line"
alt = "hand-drawn divider"
menu_class = "hand-drawn-line-menu"
submenu_class = "hand-drawn-line-submenu"

# ---------------------------------------------------------------------------
# Sub-menus for folder slots
# ---------------------------------------------------------------------------
[submenu]
item_class = "submenu-item"

# ---------------------------------------------------------------------------
# Page placeholder
# ---------------------------------------------------------------------------
[placeholder]
token = "{page}"
# <img> src/alt get the raw page name.
images = true
# <span> text gets the page title ("studio_facilities" -> "Studio Facilities").
spans = true
# <body> class tokens get the raw page name.
body_class = true

# ---------------------------------------------------------------------------
# Popups
# ---------------------------------------------------------------------------
[popups]
# Folder inside each page folder; every file becomes a <name>PopUp modal.
folder = "popups"

# ---------------------------------------------------------------------------
# Static files
# ---------------------------------------------------------------------------
[assets]
folders = ["img", "css", "js", "fonts"]
favicon_dir = "favicon"
favicon_files = [
    "favicon-16x16.png",
    "favicon-32x32.png",
    "favicon.ico",
    "favicon.svg",
    "apple-touch-icon.png",
    "site.webmanifest",
    "android-chrome-192x192.png",
    "android-chrome-512x512.png",
]
robots_dir = "robots"
robots_files = ["robots.txt", "sitemap.xml"]
cname = "CNAME"
"##
}
