//! Feed configuration management for `sitefeed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [feed], [feed.channel], [feed.filenames]
//! ├── types/         # ConfigError, ConfigDiagnostics
//! ├── locale.rs      # LocaleOptions (resolved, per locale)
//! ├── strategy.rs    # PageFilter / PageSorter
//! └── mod.rs         # FeedConfig (this file)
//! ```
//!
//! # Resolution
//!
//! The locales are `/` plus every `[site.locales]` key. Each one gets the
//! `[feed]` table deep-merged with its `[feed.locales."<path>"]` override,
//! then built-in defaults, producing a [`ResolvedFeedOptionsMap`].

pub mod locale;
pub mod section;
pub mod strategy;
pub mod types;
mod util;

pub use locale::{LocaleOptions, ResolvedFeedOptionsMap, resolve_locales};
pub use section::{
    ChannelOptions, ChannelSettings, FeedFilenames, FeedOptions, FilenameOptions, SiteLocale,
    SiteSection,
};
pub use strategy::{FilterPreset, PageFilter, PageSorter, SorterPreset};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use util::find_config_file;

use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "sitefeed.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitefeed.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Output directory feeds are written into.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Site settings
    #[serde(default)]
    pub site: SiteSection,

    /// Feed settings
    #[serde(default)]
    pub feed: FeedOptions,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            output: default_output(),
            site: SiteSection::default(),
            feed: FeedOptions::default(),
        }
    }
}

impl FeedConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, _) = Self::parse_with_ignored(content)?;
        Ok(config)
    }

    /// Load configuration from a file, warning about unknown fields.
    ///
    /// Relative paths inside the file (`output`, stylesheet templates) are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.set_root(&root);
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Anchor relative paths at `root`.
    pub fn set_root(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.output = root.join(&self.output);
        self.feed.filenames.normalize(root);
        for over in self.feed.locales.values_mut() {
            over.filenames.normalize(root);
        }
    }

    /// Apply CLI overrides.
    pub fn apply_overrides(&mut self, output: Option<&Path>, hostname: Option<&str>) {
        if let Some(output) = output {
            self.output = output.to_path_buf();
        }
        if let Some(hostname) = hostname {
            self.site.hostname = hostname.to_string();
        }
    }

    /// Validate the whole configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.site.validate(&mut diag);
        self.feed.validate(&self.site, &mut diag);
        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Resolve per-locale options.
    ///
    /// Logs a hint when no locale enables any format.
    pub fn resolve(&self) -> ResolvedFeedOptionsMap {
        if !self.feed.any_enabled(&self.site) {
            log!("hint"; "no feed format enabled, set atom, json or rss under [feed]");
        }
        resolve_locales(&self.site, &self.feed)
    }
}

// ============================================================================
// tests
// ============================================================================
