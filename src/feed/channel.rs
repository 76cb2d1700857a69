//! Document-level feed envelope.

use crate::config::LocaleOptions;
use crate::page::Author;
use chrono::{DateTime, Utc};

/// Absolute URLs of the documents generated for one locale.
///
/// A format that is disabled has no link, so feeds never advertise
/// siblings that were not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedLinks {
    pub atom: Option<String>,
    pub json: Option<String>,
    pub rss: Option<String>,
}

/// Everything a generator emits once per document.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedChannel {
    pub title: String,
    /// Home page of the locale.
    pub link: String,
    pub description: String,
    pub language: String,
    pub copyright: Option<String>,
    pub ttl: Option<u32>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub hub: Option<String>,
    pub author: Option<Author>,
    /// Build time, or the configured `last_updated`.
    pub last_updated: DateTime<Utc>,
    pub links: FeedLinks,
    /// URL path of the Atom stylesheet, e.g. `/zh/atom.xsl`.
    pub atom_stylesheet: String,
    /// URL path of the RSS stylesheet.
    pub rss_stylesheet: String,
}

impl FeedChannel {
    /// Build the envelope of a locale. `build_time` is used unless the
    /// channel pins `last_updated`.
    pub fn new(options: &LocaleOptions, build_time: DateTime<Utc>) -> Self {
        let channel = &options.channel;
        let names = &options.filenames;
        let link_if = |enabled: bool, filename: &str| enabled.then(|| options.url(filename));

        Self {
            title: channel.title.clone(),
            link: options.home_link(),
            description: channel.description.clone(),
            language: channel.language.clone(),
            copyright: channel.copyright.clone(),
            ttl: channel.ttl,
            image: channel.image.as_deref().map(|image| options.url(image)),
            icon: channel.icon.as_deref().map(|icon| options.url(icon)),
            hub: channel.hub.clone(),
            author: channel.author.clone(),
            last_updated: channel.last_updated.unwrap_or(build_time),
            links: FeedLinks {
                atom: link_if(options.atom, &names.atom_output),
                json: link_if(options.json, &names.json_output),
                rss: link_if(options.rss, &names.rss_output),
            },
            atom_stylesheet: options.url_path(&names.atom_xsl),
            rss_stylesheet: options.url_path(&names.rss_xsl),
        }
    }
}
