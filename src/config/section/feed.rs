//! `[feed]` configuration and its per-locale overrides.
//!
//! ```toml
//! [feed]
//! atom = true
//! rss = true
//! count = 50
//!
//! [feed.locales."/zh/"]
//! rss = false
//! count = 20
//! ```

use super::{ChannelOptions, FilenameOptions, SiteSection};
use crate::config::ConfigDiagnostics;
use crate::config::section::site::is_locale_key;
use crate::config::strategy::{FilterPreset, SorterPreset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default maximum number of items per feed.
pub const DEFAULT_COUNT: usize = 100;

/// Feed options as written in config. Unset fields inherit from `[feed]`
/// and finally from the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedOptions {
    /// Emit an Atom 1.0 feed.
    pub atom: Option<bool>,
    /// Emit a JSON Feed 1.1 document.
    pub json: Option<bool>,
    /// Emit an RSS 2.0 feed.
    pub rss: Option<bool>,
    /// Maximum number of items (default: 100).
    pub count: Option<usize>,
    /// Page selection preset (default: "default").
    pub filter: Option<FilterPreset>,
    /// Page ordering preset (default: "newest").
    pub sorter: Option<SorterPreset>,
    pub channel: ChannelOptions,
    pub filenames: FilenameOptions,
    /// Per-locale overrides. Only read on the top-level `[feed]` table.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub locales: BTreeMap<String, FeedOptions>,
}

impl FeedOptions {
    /// Field-wise merge, `over` wins. Locale overrides are not merged.
    pub fn merge(&self, over: &Self) -> Self {
        Self {
            atom: over.atom.or(self.atom),
            json: over.json.or(self.json),
            rss: over.rss.or(self.rss),
            count: over.count.or(self.count),
            filter: over.filter.or(self.filter),
            sorter: over.sorter.or(self.sorter),
            channel: self.channel.merge(&over.channel),
            filenames: self.filenames.merge(&over.filenames),
            locales: BTreeMap::new(),
        }
    }

    /// Effective options of one locale: `[feed]` merged with its override.
    pub fn for_locale(&self, locale_path: &str) -> Self {
        match self.locales.get(locale_path) {
            Some(over) => self.merge(over),
            None => self.merge(&Self::default()),
        }
    }

    /// Whether any locale would emit at least one format.
    pub fn any_enabled(&self, site: &SiteSection) -> bool {
        site.locale_paths().iter().any(|path| {
            let options = self.for_locale(path);
            options.atom.unwrap_or(false)
                || options.json.unwrap_or(false)
                || options.rss.unwrap_or(false)
        })
    }

    pub fn validate(&self, site: &SiteSection, diag: &mut ConfigDiagnostics) {
        self.validate_own("feed", diag);

        let known = site.locale_paths();
        for (key, over) in &self.locales {
            let field = format!("feed.locales.{key}");
            if !is_locale_key(key) {
                diag.error_with_hint(
                    field.clone(),
                    format!("locale path '{key}' must start and end with '/'"),
                    "use keys like \"/zh/\"",
                );
            } else if !known.contains(key) {
                diag.error_with_hint(
                    field.clone(),
                    format!("locale '{key}' is not declared in site.locales"),
                    format!("add [site.locales.\"{key}\"] or remove this override"),
                );
            }
            if !over.locales.is_empty() {
                diag.warn(format!("{field}.locales"), "nested locale overrides are ignored");
            }
            over.validate_own(&field, diag);
        }
    }

    fn validate_own(&self, field: &str, diag: &mut ConfigDiagnostics) {
        if self.count == Some(0) {
            diag.error_with_hint(
                format!("{field}.count"),
                "count must be at least 1",
                "disable formats with atom/json/rss = false instead",
            );
        }
        self.channel.validate(&format!("{field}.channel"), diag);
        for (name, template) in [
            ("atom_xsl_template", &self.filenames.atom_xsl_template),
            ("rss_xsl_template", &self.filenames.rss_xsl_template),
        ] {
            if let Some(path) = template
                && !path.is_file()
            {
                diag.error(
                    format!("{field}.filenames.{name}"),
                    format!("template '{}' does not exist", path.display()),
                );
            }
        }
    }
}
