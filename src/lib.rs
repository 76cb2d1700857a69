//! Sitefeed - locale-aware feed generation for static sites.
//!
//! Takes pages already built by a site generator and emits, per locale:
//!
//! - **Atom 1.0** (`atom.xml` + `atom.xsl`)
//! - **JSON Feed 1.1** (`feed.json`)
//! - **RSS 2.0** (`rss.xml` + `rss.xsl`)
//!
//! # Pipeline
//!
//! ```text
//! Page[] ──filter/sort──▶ FeedItem ──add──▶ FeedStore ──render──▶ atom/json/rss ──▶ dest/
//! ```
//!
//! Every locale is an independent task; see [`output::output_feeds`].

pub mod cli;
pub mod config;
pub mod embed;
pub mod feed;
pub mod generator;
pub mod logger;
pub mod output;
pub mod page;
pub mod utils;

pub use config::{FeedConfig, LocaleOptions, ResolvedFeedOptionsMap};
pub use feed::{FeedItem, FeedStore};
pub use output::{OutputError, OutputReport, output_feeds};
pub use page::Page;
