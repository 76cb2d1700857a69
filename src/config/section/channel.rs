//! `[feed.channel]` configuration: the feed envelope.

use super::SiteSection;
use crate::config::ConfigDiagnostics;
use crate::page::Author;
use crate::utils::date::parse_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel fields as written in config; every field may be overridden per
/// locale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelOptions {
    /// Feed title (defaults to the locale's site title).
    pub title: Option<String>,
    /// Feed description (defaults to the locale's site description).
    pub description: Option<String>,
    /// Feed language (defaults to the locale's site lang).
    #[serde(alias = "lang")]
    pub language: Option<String>,
    /// Copyright notice (defaults to "Copyright by <author>").
    pub copyright: Option<String>,
    /// RSS time-to-live in minutes.
    pub ttl: Option<u32>,
    /// Feed logo image URL.
    pub image: Option<String>,
    /// Feed icon URL.
    pub icon: Option<String>,
    /// WebSub hub URL.
    pub hub: Option<String>,
    /// Feed author, also the fallback author of items without one.
    pub author: Option<Author>,
    /// Fixed build timestamp; the build time is used when unset.
    pub last_updated: Option<String>,
}

impl ChannelOptions {
    /// Field-wise merge, `over` wins.
    pub fn merge(&self, over: &Self) -> Self {
        Self {
            title: over.title.clone().or_else(|| self.title.clone()),
            description: over.description.clone().or_else(|| self.description.clone()),
            language: over.language.clone().or_else(|| self.language.clone()),
            copyright: over.copyright.clone().or_else(|| self.copyright.clone()),
            ttl: over.ttl.or(self.ttl),
            image: over.image.clone().or_else(|| self.image.clone()),
            icon: over.icon.clone().or_else(|| self.icon.clone()),
            hub: over.hub.clone().or_else(|| self.hub.clone()),
            author: over.author.clone().or_else(|| self.author.clone()),
            last_updated: over.last_updated.clone().or_else(|| self.last_updated.clone()),
        }
    }

    pub fn validate(&self, field: &str, diag: &mut ConfigDiagnostics) {
        if let Some(raw) = &self.last_updated
            && parse_date(raw).is_none()
        {
            diag.error_with_hint(
                format!("{field}.last_updated"),
                format!("cannot parse date '{raw}'"),
                "use a date like \"2024-06-15\" or \"2024-06-15T14:30:00Z\"",
            );
        }
        if self.ttl == Some(0) {
            diag.error_with_hint(
                format!("{field}.ttl"),
                "ttl must be at least 1 minute",
                "remove ttl to let readers pick their own refresh interval",
            );
        }
        if let Some(author) = &self.author
            && author.name.trim().is_empty()
        {
            diag.error(format!("{field}.author.name"), "author name must not be empty");
        }
    }

    /// Fill in site fallbacks for one locale.
    pub fn resolve(&self, site: &SiteSection, locale_path: &str) -> ChannelSettings {
        let locale = site.locale(locale_path);
        let title = self
            .title
            .clone()
            .or_else(|| locale.and_then(|l| l.title.clone()))
            .unwrap_or_else(|| site.title.clone());
        let description = self
            .description
            .clone()
            .or_else(|| locale.and_then(|l| l.description.clone()))
            .unwrap_or_else(|| site.description.clone());
        let language = self
            .language
            .clone()
            .or_else(|| locale.and_then(|l| l.lang.clone()))
            .unwrap_or_else(|| site.lang.clone());
        let copyright = self.copyright.clone().or_else(|| {
            self.author
                .as_ref()
                .map(|author| format!("Copyright by {}", author.name))
        });

        ChannelSettings {
            title,
            description,
            language,
            copyright,
            ttl: self.ttl,
            image: self.image.clone(),
            icon: self.icon.clone(),
            hub: self.hub.clone(),
            author: self.author.clone(),
            last_updated: self.last_updated.as_deref().and_then(parse_date),
        }
    }
}

/// Channel fields after site fallbacks were applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSettings {
    pub title: String,
    pub description: String,
    pub language: String,
    pub copyright: Option<String>,
    pub ttl: Option<u32>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub hub: Option<String>,
    pub author: Option<Author>,
    pub last_updated: Option<DateTime<Utc>>,
}
