//! Divider graphics between menu entries.
//!
//! Dividers are the SVG files in `<assets>/<image_dir>/<folder>/` whose names
//! start with the configured prefix. They are discovered once per build,
//! sorted by filename, and handed out cyclically: the gap after entry `i`
//! gets divider `i % len`. The last entry never gets one.

use crate::config::DividersConfig;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dividers {
    urls: Vec<String>,
}

impl Dividers {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    /// Discover dividers under `assets_dir`.
    ///
    /// Returns `Ok(None)` when the divider folder does not exist.
    pub fn discover(
        assets_dir: &Path,
        config: &DividersConfig,
    ) -> std::io::Result<Option<Self>> {
        let folder = assets_dir.join(&config.image_dir).join(&config.folder);
        if !folder.is_dir() {
            return Ok(None);
        }

        let mut names: Vec<String> = fs::read_dir(&folder)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| {
                name.starts_with(&config.prefix)
                    && Path::new(name)
                        .extension()
                        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
            })
            .collect();
        names.sort();

        Ok(Some(Self::new(
            names
                .into_iter()
                .map(|name| format!("{}/{}/{}", config.image_dir, config.folder, name))
                .collect(),
        )))
    }

    /// Divider for the gap after entry `index` in a list of `count` entries.
    pub fn after(&self, index: usize, count: usize) -> Option<&str> {
        if self.urls.is_empty() || index + 1 >= count {
            return None;
        }
        Some(&self.urls[index % self.urls.len()])
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
