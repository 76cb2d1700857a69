//! Feed document generators.
//!
//! Each generator is a pure function of a [`FeedStore`] returning the
//! serialized document:
//!
//! - **Atom 1.0**: [`atom::render`]
//! - **JSON Feed 1.1**: [`json::render`]
//! - **RSS 2.0**: [`rss::render`]
//!
//! The envelope comes from [`FeedStore::channel`], entries from
//! [`FeedStore::items`] in insertion order.

pub mod atom;
pub mod json;
pub mod rss;

use crate::config::{FeedFilenames, LocaleOptions};
use crate::feed::FeedStore;
use std::fmt;
use thiserror::Error;

/// Name written into every document's generator field.
pub const GENERATOR: &str = "sitefeed";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("RSS validation failed: {0}")]
    Rss(#[from] ::rss::validation::ValidationError),

    #[error("failed to write RSS document")]
    RssWrite(#[from] ::rss::Error),

    #[error("failed to write Atom document")]
    Atom(#[from] atom_syndication::Error),

    #[error("JSON feed serialization failed")]
    Json(#[from] serde_json::Error),
}

/// Output formats, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedFormat {
    Atom,
    Json,
    Rss,
}

impl FeedFormat {
    pub const ALL: [Self; 3] = [Self::Atom, Self::Json, Self::Rss];

    /// Lowercase name, also used as the log module.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Atom => "atom",
            Self::Json => "json",
            Self::Rss => "rss",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Atom => "Atom",
            Self::Json => "JSON",
            Self::Rss => "RSS",
        }
    }

    pub fn is_enabled(self, options: &LocaleOptions) -> bool {
        match self {
            Self::Atom => options.atom,
            Self::Json => options.json,
            Self::Rss => options.rss,
        }
    }

    /// Output file of this format, relative to the destination directory.
    pub fn output_filename(self, names: &FeedFilenames) -> &str {
        match self {
            Self::Atom => &names.atom_output,
            Self::Json => &names.json_output,
            Self::Rss => &names.rss_output,
        }
    }

    pub fn render(self, store: &FeedStore) -> Result<String, GeneratorError> {
        match self {
            Self::Atom => atom::render(store),
            Self::Json => json::render(store),
            Self::Rss => rss::render(store),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Insert an `xml-stylesheet` processing instruction after the XML
/// declaration (or at the very start when there is none).
pub fn insert_stylesheet(xml: &str, href: &str) -> String {
    let href = href
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;");
    let instruction = format!(r#"<?xml-stylesheet type="text/xsl" href="{href}"?>"#);

    let split = xml
        .starts_with("<?xml ")
        .then(|| xml.find("?>"))
        .flatten()
        .map_or(0, |end| end + 2);
    let (decl, body) = xml.split_at(split);

    let mut out = String::with_capacity(xml.len() + instruction.len() + 1);
    out.push_str(decl);
    out.push_str(&instruction);
    if !body.starts_with('\n') {
        out.push('\n');
    }
    out.push_str(body);
    out
}
