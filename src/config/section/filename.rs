//! `[feed.filenames]` configuration: where each feed file lands.

use crate::utils::url::remove_leading_slash;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names as written in config. Relative to the locale directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameOptions {
    /// Atom feed output (default: "atom.xml").
    pub atom_output: Option<String>,
    /// JSON feed output (default: "feed.json").
    pub json_output: Option<String>,
    /// RSS feed output (default: "rss.xml").
    pub rss_output: Option<String>,
    /// Atom stylesheet output (default: "atom.xsl").
    pub atom_xsl: Option<String>,
    /// RSS stylesheet output (default: "rss.xsl").
    pub rss_xsl: Option<String>,
    /// Atom stylesheet source; the embedded one when unset.
    pub atom_xsl_template: Option<PathBuf>,
    /// RSS stylesheet source; the embedded one when unset.
    pub rss_xsl_template: Option<PathBuf>,
}

impl FilenameOptions {
    /// Field-wise merge, `over` wins.
    pub fn merge(&self, over: &Self) -> Self {
        Self {
            atom_output: over.atom_output.clone().or_else(|| self.atom_output.clone()),
            json_output: over.json_output.clone().or_else(|| self.json_output.clone()),
            rss_output: over.rss_output.clone().or_else(|| self.rss_output.clone()),
            atom_xsl: over.atom_xsl.clone().or_else(|| self.atom_xsl.clone()),
            rss_xsl: over.rss_xsl.clone().or_else(|| self.rss_xsl.clone()),
            atom_xsl_template: over
                .atom_xsl_template
                .clone()
                .or_else(|| self.atom_xsl_template.clone()),
            rss_xsl_template: over
                .rss_xsl_template
                .clone()
                .or_else(|| self.rss_xsl_template.clone()),
        }
    }

    /// Resolve template paths against the config file directory.
    pub fn normalize(&mut self, root: &Path) {
        for template in [&mut self.atom_xsl_template, &mut self.rss_xsl_template] {
            if let Some(path) = template.take() {
                *template = Some(root.join(path));
            }
        }
    }
}

/// File names of one locale, relative to the output root.
///
/// Every name carries the locale prefix: for `/zh/`, `atom.xml` becomes
/// `zh/atom.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedFilenames {
    pub atom_output: String,
    pub json_output: String,
    pub rss_output: String,
    pub atom_xsl: String,
    pub rss_xsl: String,
    pub atom_xsl_template: Option<PathBuf>,
    pub rss_xsl_template: Option<PathBuf>,
}

impl FeedFilenames {
    pub fn for_locale(options: &FilenameOptions, locale_path: &str) -> Self {
        let prefix = remove_leading_slash(locale_path);
        let name = |value: &Option<String>, default: &str| {
            format!(
                "{prefix}{}",
                remove_leading_slash(value.as_deref().unwrap_or(default))
            )
        };

        Self {
            atom_output: name(&options.atom_output, "atom.xml"),
            json_output: name(&options.json_output, "feed.json"),
            rss_output: name(&options.rss_output, "rss.xml"),
            atom_xsl: name(&options.atom_xsl, "atom.xsl"),
            rss_xsl: name(&options.rss_xsl, "rss.xsl"),
            atom_xsl_template: options.atom_xsl_template.clone(),
            rss_xsl_template: options.rss_xsl_template.clone(),
        }
    }
}

impl Default for FeedFilenames {
    fn default() -> Self {
        Self::for_locale(&FilenameOptions::default(), "/")
    }
}
