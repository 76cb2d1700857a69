//! Resolved per-locale feed options.

use super::section::{ChannelSettings, DEFAULT_COUNT, FeedFilenames, FeedOptions, SiteSection};
use super::strategy::{PageFilter, PageSorter};
use crate::utils::url::{get_url, normalize_base, normalize_hostname};
use std::collections::BTreeMap;

/// Locale path -> resolved options. Ordered so logs and reports are stable.
pub type ResolvedFeedOptionsMap = BTreeMap<String, LocaleOptions>;

/// Everything one locale's output task needs, with no optional fields left.
#[derive(Debug, Clone)]
pub struct LocaleOptions {
    /// Locale path (`/`, `/zh/`).
    pub locale_path: String,
    /// Normalized origin, e.g. `https://example.com`.
    pub hostname: String,
    /// Normalized base, `/` or `/sub/`.
    pub base: String,
    pub atom: bool,
    pub json: bool,
    pub rss: bool,
    /// Maximum number of feed items.
    pub count: usize,
    pub filter: PageFilter,
    pub sorter: PageSorter,
    pub filenames: FeedFilenames,
    pub channel: ChannelSettings,
}

impl LocaleOptions {
    /// Options with every format disabled and default strategies.
    pub fn new(locale_path: impl Into<String>, hostname: &str) -> Self {
        let locale_path = locale_path.into();
        let filenames = FeedFilenames::for_locale(&Default::default(), &locale_path);
        Self {
            locale_path,
            hostname: normalize_hostname(hostname),
            base: "/".into(),
            atom: false,
            json: false,
            rss: false,
            count: DEFAULT_COUNT,
            filter: PageFilter::default(),
            sorter: PageSorter::default(),
            filenames,
            channel: ChannelSettings::default(),
        }
    }

    /// Resolve one locale from config sections.
    pub fn resolve(site: &SiteSection, feed: &FeedOptions, locale_path: &str) -> Self {
        let options = feed.for_locale(locale_path);
        Self {
            locale_path: locale_path.to_string(),
            hostname: normalize_hostname(&site.hostname),
            base: normalize_base(&site.base),
            atom: options.atom.unwrap_or(false),
            json: options.json.unwrap_or(false),
            rss: options.rss.unwrap_or(false),
            count: options.count.unwrap_or(DEFAULT_COUNT),
            filter: options.filter.unwrap_or_default().into(),
            sorter: options.sorter.unwrap_or_default().into(),
            filenames: FeedFilenames::for_locale(&options.filenames, locale_path),
            channel: options.channel.resolve(site, locale_path),
        }
    }

    /// Whether any format is enabled.
    pub fn is_enabled(&self) -> bool {
        self.atom || self.json || self.rss
    }

    /// Absolute URL of a site path (`/guide/` -> `https://host/base/guide/`).
    pub fn url(&self, path: &str) -> String {
        get_url(&self.hostname, &self.base, path)
    }

    /// URL path of an output file, used for stylesheet references
    /// (`zh/atom.xsl` -> `/base/zh/atom.xsl`).
    pub fn url_path(&self, filename: &str) -> String {
        format!("{}{}", self.base, filename.trim_start_matches('/'))
    }

    /// Link of the locale's home page.
    pub fn home_link(&self) -> String {
        self.url(&self.locale_path)
    }
}

/// Resolve every locale of the site.
pub fn resolve_locales(site: &SiteSection, feed: &FeedOptions) -> ResolvedFeedOptionsMap {
    site.locale_paths()
        .into_iter()
        .map(|path| {
            let options = LocaleOptions::resolve(site, feed, &path);
            (path, options)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::section::SiteLocale;
    use crate::config::strategy::FilterPreset;

    fn site() -> SiteSection {
        let mut site = SiteSection {
            hostname: "example.com".into(),
            base: "docs".into(),
            title: "Docs".into(),
            ..SiteSection::default()
        };
        site.locales.insert(
            "/zh/".into(),
            SiteLocale {
                title: Some("文档".into()),
                ..SiteLocale::default()
            },
        );
        site
    }

    #[test]
    fn test_new_defaults() {
        let options = LocaleOptions::new("/", "example.com");
        assert!(!options.is_enabled());
        assert_eq!(options.count, 100);
        assert_eq!(options.hostname, "https://example.com");
        assert_eq!(options.filter.name(), "default");
        assert_eq!(options.sorter.name(), "newest");
    }

    #[test]
    fn test_resolve_locales() {
        let mut feed = FeedOptions {
            atom: Some(true),
            filter: Some(FilterPreset::All),
            ..FeedOptions::default()
        };
        feed.locales.insert(
            "/zh/".into(),
            FeedOptions {
                json: Some(true),
                count: Some(5),
                ..FeedOptions::default()
            },
        );

        let map = resolve_locales(&site(), &feed);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["/", "/zh/"]);

        let root = &map["/"];
        assert!(root.atom && !root.json && !root.rss);
        assert_eq!(root.count, 100);
        assert_eq!(root.base, "/docs/");
        assert_eq!(root.filter.name(), "all");
        assert_eq!(root.channel.title, "Docs");

        let zh = &map["/zh/"];
        assert!(zh.atom && zh.json);
        assert_eq!(zh.count, 5);
        assert_eq!(zh.filenames.json_output, "zh/feed.json");
        assert_eq!(zh.channel.title, "文档");
        assert_eq!(zh.home_link(), "https://example.com/docs/zh/");
    }

    #[test]
    fn test_url_helpers() {
        let mut options = LocaleOptions::new("/zh/", "https://example.com/");
        options.base = "/docs/".into();
        assert_eq!(options.url("/zh/a.html"), "https://example.com/docs/zh/a.html");
        assert_eq!(options.url_path("zh/atom.xsl"), "/docs/zh/atom.xsl");
    }
}
