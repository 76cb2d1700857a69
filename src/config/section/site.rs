//! `[site]` configuration.
//!
//! Site-wide data the feed envelope falls back to when `[feed.channel]`
//! leaves a field unset.

use crate::config::ConfigDiagnostics;
use crate::utils::url::normalize_hostname;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Site metadata for one locale (`[site.locales."/zh/"]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteLocale {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Deployed origin (e.g., "https://example.com"). Scheme defaults to https.
    pub hostname: String,
    /// Site base path (e.g., "/" or "/docs/").
    pub base: String,
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Language code of the root locale (e.g., "en-US").
    pub lang: String,
    /// Additional locales keyed by locale path.
    pub locales: BTreeMap<String, SiteLocale>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            base: "/".into(),
            title: String::new(),
            description: String::new(),
            lang: "en-US".into(),
            locales: BTreeMap::new(),
        }
    }
}

impl SiteSection {
    /// Locale paths served by the site: always `/`, plus every configured one.
    pub fn locale_paths(&self) -> Vec<String> {
        let mut paths = vec!["/".to_string()];
        paths.extend(self.locales.keys().filter(|k| k.as_str() != "/").cloned());
        paths
    }

    /// Site metadata of a locale (empty for the root unless configured).
    pub fn locale(&self, locale_path: &str) -> Option<&SiteLocale> {
        self.locales.get(locale_path)
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `hostname` is set and forms an http(s) URL with a host
    /// - every locale key starts and ends with `/`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.hostname.trim().is_empty() {
            diag.error_with_hint(
                "site.hostname",
                "hostname is required to build absolute feed links",
                "set site.hostname, e.g.: \"https://example.com\"",
            );
        } else {
            let origin = normalize_hostname(&self.hostname);
            match url::Url::parse(&origin) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            "site.hostname",
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none_or(str::is_empty) {
                        diag.error_with_hint(
                            "site.hostname",
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        "site.hostname",
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        for key in self.locales.keys() {
            if !is_locale_key(key) {
                diag.error_with_hint(
                    format!("site.locales.{key}"),
                    format!("locale path '{key}' must start and end with '/'"),
                    "use keys like \"/zh/\"",
                );
            }
        }
    }
}

/// Locale keys look like `/` or `/zh/`.
pub(crate) fn is_locale_key(key: &str) -> bool {
    key.starts_with('/') && key.ends_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(site: &SiteSection) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        site.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults() {
        let site = SiteSection::default();
        assert_eq!(site.base, "/");
        assert_eq!(site.lang, "en-US");
        assert_eq!(site.locale_paths(), vec!["/".to_string()]);
    }

    #[test]
    fn test_locale_paths_root_first() {
        let mut site = SiteSection::default();
        site.locales.insert("/zh/".into(), SiteLocale::default());
        site.locales.insert("/".into(), SiteLocale::default());
        site.locales.insert("/de/".into(), SiteLocale::default());
        assert_eq!(site.locale_paths(), vec!["/", "/de/", "/zh/"]);
    }

    #[test]
    fn test_validate_hostname() {
        let mut site = SiteSection::default();
        assert!(validate(&site).has_errors());

        site.hostname = "example.com".into();
        assert!(!validate(&site).has_errors());

        site.hostname = "ftp://example.com".into();
        assert!(validate(&site).has_errors());

        site.hostname = "https://exa mple.com".into();
        assert!(validate(&site).has_errors());
    }

    #[test]
    fn test_validate_locale_keys() {
        let mut site = SiteSection {
            hostname: "https://example.com".into(),
            ..SiteSection::default()
        };
        site.locales.insert("zh".into(), SiteLocale::default());
        let diag = validate(&site);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, "site.locales.zh");
    }
}
