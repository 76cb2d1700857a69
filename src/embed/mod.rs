//! Embedded static resources.
//!
//! The default XSL stylesheets that make `atom.xml` and `rss.xml` readable
//! in a browser. A locale copies them next to its feeds unless
//! `[feed.filenames]` points `atom_xsl_template` / `rss_xsl_template` at a
//! file of its own.

use crate::generator::FeedFormat;

/// Default Atom stylesheet.
pub const ATOM_XSL: &str = include_str!("xsl/atom.xsl");

/// Default RSS stylesheet.
pub const RSS_XSL: &str = include_str!("xsl/rss.xsl");

/// Built-in stylesheet of a format. JSON feeds have none.
pub const fn stylesheet(format: FeedFormat) -> Option<&'static str> {
    match format {
        FeedFormat::Atom => Some(ATOM_XSL),
        FeedFormat::Rss => Some(RSS_XSL),
        FeedFormat::Json => None,
    }
}
