//! One page normalized into a feed entry.
//!
//! Every field has a fallback chain, so a page without any frontmatter
//! still produces a usable item:
//!
//! | Field         | Sources, first match wins                                 |
//! |---------------|-----------------------------------------------------------|
//! | `title`       | `feed.title`, frontmatter title, page title, path segment |
//! | `link`        | `feed.link`, hostname + base + page path                  |
//! | `guid`        | `feed.guid`, link                                         |
//! | `description` | `feed.description`, frontmatter description, excerpt      |
//! | `content`     | `feed.content`, rendered page content                     |
//! | `authors`     | `feed.author`, frontmatter author, channel author         |
//! | `contributors`| `feed.contributor`, git contributors                      |
//! | `categories`  | `feed.category`, frontmatter categories and tags          |
//! | `pub_date`    | frontmatter date, git creation time                       |
//! | `image`       | `feed.image`, cover / banner / image                      |

use crate::config::LocaleOptions;
use crate::page::{Author, AuthorField, Enclosure, FeedMeta, Page};
use crate::utils::url::absolutize_links;
use chrono::{DateTime, Utc};

/// A feed entry. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub guid: String,
    pub link: String,
    pub title: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Summary HTML.
    pub description: Option<String>,
    /// Full HTML content, links made absolute.
    pub content: Option<String>,
    pub authors: Vec<Author>,
    pub contributors: Vec<Author>,
    pub categories: Vec<String>,
    pub image: Option<String>,
    pub enclosure: Option<Enclosure>,
}

impl FeedItem {
    pub fn new(page: &Page, options: &LocaleOptions) -> Self {
        let default_meta = FeedMeta::default();
        let meta = page.frontmatter.feed_meta().unwrap_or(&default_meta);
        let absolutize = |html: &str| absolutize_links(html, &options.hostname, &options.base);

        let title = non_empty(meta.title.as_deref())
            .map_or_else(|| page.display_title(), str::to_string);

        let link = non_empty(meta.link.as_deref())
            .map_or_else(|| options.url(&page.path), |link| options.url(link));

        let guid = non_empty(meta.guid.as_deref()).map_or_else(|| link.clone(), str::to_string);

        let description = non_empty(meta.description.as_deref())
            .or(non_empty(page.frontmatter.description.as_deref()))
            .map(str::to_string)
            .or_else(|| non_empty(Some(page.excerpt.as_str())).map(absolutize));

        let content = match non_empty(meta.content.as_deref()) {
            Some(content) => Some(content.to_string()),
            None => non_empty(Some(page.content.as_str())).map(absolutize),
        };

        let enclosure = meta.enclosure.clone().map(|enclosure| Enclosure {
            url: options.url(&enclosure.url),
            ..enclosure
        });

        Self {
            title,
            guid,
            link,
            pub_date: page.date().or_else(|| page.created_time()),
            last_updated: page.updated_time(),
            description,
            content,
            authors: item_authors(page, meta, options),
            contributors: item_contributors(page, meta),
            categories: match &meta.category {
                Some(category) => category.to_vec(),
                None => page.frontmatter.categories(),
            },
            image: non_empty(meta.image.as_deref())
                .or(page.frontmatter.cover_image())
                .map(|image| options.url(image)),
            enclosure,
        }
    }

    /// Most recent known date of the entry.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated.or(self.pub_date)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// `author: false` suppresses the channel fallback.
fn item_authors(page: &Page, meta: &FeedMeta, options: &LocaleOptions) -> Vec<Author> {
    let field = meta.author.as_ref().or(page.frontmatter.author.as_ref());
    if let Some(AuthorField::Toggle(false)) = field {
        return Vec::new();
    }

    let authors = field.map(AuthorField::to_authors).unwrap_or_default();
    if authors.is_empty() {
        options.channel.author.iter().cloned().collect()
    } else {
        authors
    }
}

fn item_contributors(page: &Page, meta: &FeedMeta) -> Vec<Author> {
    if let Some(field) = &meta.contributor {
        return field.to_authors();
    }
    page.git
        .iter()
        .flat_map(|git| &git.contributors)
        .filter(|c| !c.name.is_empty())
        .map(|c| Author {
            name: c.name.clone(),
            email: Some(c.email.clone()).filter(|e| !e.is_empty()),
            url: None,
        })
        .collect()
}
