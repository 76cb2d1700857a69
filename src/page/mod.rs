//! Pages handed over by the site build.
//!
//! The feed pipeline never renders or crawls anything: it consumes pages
//! that were already materialized by the host build, either in memory or
//! through a JSON manifest (see [`load_pages`]).

mod meta;

pub use meta::{
    Author, AuthorEntry, AuthorField, Enclosure, FeedMeta, FeedSetting, Frontmatter, StringList,
};

use crate::utils::date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Version-control metadata for a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitData {
    /// First commit time, epoch milliseconds.
    pub created_time: Option<i64>,
    /// Last commit time, epoch milliseconds.
    pub updated_time: Option<i64>,
    pub contributors: Vec<GitContributor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GitContributor {
    pub name: String,
    pub email: String,
    pub commits: u32,
}

/// A built page.
///
/// Field names follow the camelCase JSON the host build emits:
///
/// ```json
/// {
///   "path": "/zh/guide/intro.html",
///   "pathLocale": "/zh/",
///   "title": "Intro",
///   "filePathRelative": "zh/guide/intro.md",
///   "frontmatter": { "date": "2024-06-15" },
///   "excerpt": "<p>...</p>",
///   "content": "<h1>Intro</h1>...",
///   "git": { "createdTime": 1718461845000 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Route path, relative to the site base.
    pub path: String,
    /// Locale this page belongs to (`/`, `/zh/`, ...).
    #[serde(default = "default_locale")]
    pub path_locale: String,
    /// Title extracted by the site build (first heading or frontmatter).
    #[serde(default)]
    pub title: String,
    /// Source file, relative to the source directory. `None` for virtual pages.
    #[serde(default)]
    pub file_path_relative: Option<String>,
    #[serde(default, deserialize_with = "lenient_frontmatter")]
    pub frontmatter: Frontmatter,
    /// Rendered excerpt HTML (may be empty).
    #[serde(default)]
    pub excerpt: String,
    /// Rendered content HTML.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub git: Option<GitData>,
}

fn default_locale() -> String {
    "/".to_string()
}

/// Frontmatter that is not a table at all reads as empty.
fn lenient_frontmatter<'de, D>(deserializer: D) -> Result<Frontmatter, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Frontmatter::deserialize(&value).unwrap_or_else(|err| {
        crate::debug!("page"; "ignoring frontmatter {}: {}", value, err);
        Frontmatter::default()
    }))
}

impl Page {
    pub fn new(path: impl Into<String>, path_locale: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            path_locale: path_locale.into(),
            title: String::new(),
            file_path_relative: None,
            frontmatter: Frontmatter::default(),
            excerpt: String::new(),
            content: String::new(),
            git: None,
        }
    }

    /// Frontmatter `date`, parsed. Unparseable dates count as absent.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        let raw = self.frontmatter.date.as_deref()?;
        let parsed = date::parse_date(raw);
        if parsed.is_none() {
            crate::debug!("page"; "ignoring unparseable date `{}` on {}", raw, self.path);
        }
        parsed
    }

    /// Git creation time.
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.git
            .as_ref()
            .and_then(|git| git.created_time)
            .and_then(date::from_millis)
    }

    /// Git last-update time.
    pub fn updated_time(&self) -> Option<DateTime<Utc>> {
        self.git
            .as_ref()
            .and_then(|git| git.updated_time)
            .and_then(date::from_millis)
    }

    /// Date used for ordering: git creation time, then frontmatter date.
    pub fn sort_date(&self) -> Option<DateTime<Utc>> {
        self.created_time().or_else(|| self.date())
    }

    /// Title with fallbacks: frontmatter, build title, last path segment.
    pub fn display_title(&self) -> String {
        if let Some(title) = self.frontmatter.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        if !self.title.is_empty() {
            return self.title.clone();
        }
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .map(|seg| seg.trim_end_matches(".html"))
            .filter(|seg| !seg.is_empty())
            .map_or_else(|| self.path.clone(), str::to_string)
    }
}

// ============================================================================
// manifest loading
// ============================================================================

/// Errors while reading a page manifest.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid page manifest `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// `{ "pages": [...] }` manifest layout.
#[derive(Deserialize)]
struct WrappedManifest {
    pages: Vec<Page>,
}

/// Parse pages from manifest JSON text: a bare array or `{ "pages": [...] }`.
///
/// Errors carry the line and column of the offending page.
pub fn parse_pages(content: &str) -> Result<Vec<Page>, serde_json::Error> {
    if content.trim_start().starts_with('{') {
        serde_json::from_str::<WrappedManifest>(content).map(|manifest| manifest.pages)
    } else {
        serde_json::from_str(content)
    }
}

/// Load pages from a JSON manifest written by the site build.
pub fn load_pages(path: &Path) -> Result<Vec<Page>, PageError> {
    let content =
        std::fs::read_to_string(path).map_err(|err| PageError::Io(path.to_path_buf(), err))?;
    parse_pages(&content).map_err(|err| PageError::Json(path.to_path_buf(), err))
}
