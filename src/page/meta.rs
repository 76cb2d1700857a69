//! Page frontmatter as handed over by the site build.
//!
//! Frontmatter is written by humans, so most fields accept several shapes
//! (a string or a list, a name or a table). Unknown fields are kept in
//! `extra` and never cause a page to be rejected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::JsonMap;

/// Deserialize an optional string, treating any non-string value as absent.
///
/// YAML frontmatter dates may arrive as numbers or objects depending on the
/// host serializer; those degrade to `None` instead of failing the manifest.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Deserialize an optional field, dropping values of the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            crate::debug!("page"; "ignoring frontmatter value {}: {}", value, err);
            Ok(None)
        }
    }
}

/// `true` only for a JSON `true`; anything else reads as unset.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Option::<Value>::deserialize(deserializer)?, Some(Value::Bool(true))))
}

/// A person attached to a page or a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One author entry: either a bare name or a full table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorEntry {
    Name(String),
    Info(Author),
}

impl From<AuthorEntry> for Author {
    fn from(entry: AuthorEntry) -> Self {
        match entry {
            AuthorEntry::Name(name) => Author::named(name),
            AuthorEntry::Info(author) => author,
        }
    }
}

/// `author:` frontmatter field.
///
/// | Shape                         | Meaning                    |
/// |-------------------------------|----------------------------|
/// | `false`                       | explicitly no author       |
/// | `"Name"` / `{ name, email }`  | single author              |
/// | `[ ... ]`                     | several authors            |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    Toggle(bool),
    One(AuthorEntry),
    Many(Vec<AuthorEntry>),
}

impl AuthorField {
    /// Flatten into a list of authors. `false` and `true` both yield an
    /// empty list (`true` carries no name to show).
    pub fn to_authors(&self) -> Vec<Author> {
        match self {
            Self::Toggle(_) => Vec::new(),
            Self::One(entry) => vec![entry.clone().into()],
            Self::Many(entries) => entries
                .iter()
                .cloned()
                .map(Author::from)
                .filter(|a| !a.name.is_empty())
                .collect(),
        }
    }
}

/// A string or a list of strings (`tag: a` or `tag: [a, b]`).
///
/// Numbers are read as their text (`tag: [2024]`); other values are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fn scalar(value: Value) -> Option<String> {
            match value {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        }

        Ok(match Value::deserialize(deserializer)? {
            Value::Array(values) => Self::Many(values.into_iter().filter_map(scalar).collect()),
            value => scalar(value).map_or_else(|| Self::Many(Vec::new()), Self::One),
        })
    }
}

impl StringList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(s) if s.is_empty() => Vec::new(),
            Self::One(s) => vec![s.clone()],
            Self::Many(v) => v.iter().filter(|s| !s.is_empty()).cloned().collect(),
        }
    }
}

/// Media attached to a feed entry (podcast audio, downloads).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes. RSS needs it, so RSS leaves out enclosures without one.
    #[serde(default, deserialize_with = "lenient")]
    pub length: Option<u64>,
}

/// Per-page feed overrides under `feed:`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedMeta {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub guid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub author: Option<AuthorField>,
    #[serde(deserialize_with = "lenient")]
    pub contributor: Option<AuthorField>,
    #[serde(deserialize_with = "lenient")]
    pub category: Option<StringList>,
    #[serde(deserialize_with = "lenient")]
    pub enclosure: Option<Enclosure>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
}

/// `feed:` frontmatter field: `true` / `false` or an override table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedSetting {
    Toggle(bool),
    Options(FeedMeta),
}

impl FeedSetting {
    /// Whether the page opts in (a table counts as opting in).
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Toggle(enabled) => *enabled,
            Self::Options(_) => true,
        }
    }

    pub fn options(&self) -> Option<&FeedMeta> {
        match self {
            Self::Toggle(_) => None,
            Self::Options(meta) => Some(meta),
        }
    }
}

/// Page frontmatter
///
/// A field of the wrong shape reads as unset rather than rejecting the page.
///
/// # Standard Fields
///
/// | Field         | Type            | Description                         |
/// |---------------|-----------------|-------------------------------------|
/// | `title`       | `String`        | Page title                          |
/// | `description` | `String`        | Summary used as feed description    |
/// | `date`        | `String`        | Publication date                    |
/// | `author`      | `AuthorField`   | Author(s), or `false`               |
/// | `category`    | `StringList`    | Categories (alias `categories`)     |
/// | `tag`         | `StringList`    | Tags (alias `tags`)                 |
/// | `cover`       | `String`        | Cover image (also `banner`/`image`) |
/// | `home`        | `bool`          | Home page marker                    |
/// | `feed`        | `FeedSetting`   | Inclusion toggle or item overrides  |
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub author: Option<AuthorField>,
    #[serde(alias = "categories", deserialize_with = "lenient")]
    pub category: Option<StringList>,
    #[serde(alias = "tags", deserialize_with = "lenient")]
    pub tag: Option<StringList>,
    #[serde(deserialize_with = "lenient")]
    pub cover: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub banner: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub home: bool,
    #[serde(deserialize_with = "lenient")]
    pub feed: Option<FeedSetting>,
    /// Additional user-defined fields.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Frontmatter {
    /// Per-page feed overrides, if `feed:` is a table.
    pub fn feed_meta(&self) -> Option<&FeedMeta> {
        self.feed.as_ref().and_then(FeedSetting::options)
    }

    /// Categories followed by tags, deduplicated, order kept.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let all = self
            .category
            .iter()
            .chain(self.tag.iter())
            .flat_map(StringList::to_vec);
        for name in all {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }

    /// First cover-like image field.
    pub fn cover_image(&self) -> Option<&str> {
        self.cover
            .as_deref()
            .or(self.banner.as_deref())
            .or(self.image.as_deref())
            .filter(|s| !s.is_empty())
    }
}
