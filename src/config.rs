//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a findmark.toml, and if present we load settings from there.
//! This provides the marker shape, the default matching mode and file extension preferences.

use crate::mark::DEFAULT_INDEX_KEY;
use facet::Facet;
use log::warn;
use std::fs;
use std::path::Path;

/// File looked for in the working directory.
pub const CONFIG_FILE: &str = "findmark.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from findmark.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "mark".to_string())]
    /// Tag of the element wrapped around each match.
    pub marker_tag: String,
    #[facet(default = DEFAULT_INDEX_KEY.to_string())]
    /// Attribute recording which match a marker belongs to.
    pub index_attribute: String,
    #[facet(default = false)]
    /// Ignore letter case unless asked otherwise.
    pub case_insensitive: bool,
    #[facet(default = false)]
    /// Match whole words only.
    pub whole_word: bool,
    #[facet(default = false)]
    /// Read search strings as regular expressions.
    pub regex: bool,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Config {
    #[must_use]
    /// Load configuration from findmark.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if it is missing or invalid.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
            warn!("ignoring {}: not a valid configuration", path.display());
        }
        facet_toml::from_str::<Self>("").unwrap()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
