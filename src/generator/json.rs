//! JSON Feed 1.1 generation.
//!
//! See <https://www.jsonfeed.org/version/1.1/>. The document carries no
//! feed-level timestamp, so the output depends on the items alone.

use super::GeneratorError;
use crate::feed::{FeedItem, FeedStore};
use crate::page::Author;
use crate::utils::date::to_rfc3339;
use serde::Serialize;

const VERSION: &str = "https://jsonfeed.org/version/1.1";

#[derive(Serialize)]
struct JsonFeed<'a> {
    version: &'static str,
    title: &'a str,
    home_page_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    feed_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    favicon: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<JsonAuthor<'a>>,
    language: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hubs: Vec<JsonHub<'a>>,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonAuthor<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonHub<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    url: &'a str,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    id: &'a str,
    url: &'a str,
    title: &'a str,
    content_html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_published: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_modified: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<JsonAuthor<'a>>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    tags: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<JsonAttachment<'a>>,
}

#[derive(Serialize)]
struct JsonAttachment<'a> {
    url: &'a str,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_in_bytes: Option<u64>,
}

/// Render the store as a JSON Feed document.
pub fn render(store: &FeedStore) -> Result<String, GeneratorError> {
    let channel = store.channel();

    let feed = JsonFeed {
        version: VERSION,
        title: &channel.title,
        home_page_url: &channel.link,
        feed_url: channel.links.json.as_deref(),
        description: Some(channel.description.as_str()).filter(|d| !d.is_empty()),
        icon: channel.image.as_deref(),
        favicon: channel.icon.as_deref(),
        authors: channel.author.iter().map(to_author).collect(),
        language: &channel.language,
        hubs: channel
            .hub
            .iter()
            .map(|url| JsonHub {
                kind: "WebSub",
                url: url.as_str(),
            })
            .collect(),
        items: store.items().iter().map(to_item).collect(),
    };

    Ok(serde_json::to_string_pretty(&feed)?)
}

fn is_empty_slice(tags: &&[String]) -> bool {
    tags.is_empty()
}

fn to_item(item: &FeedItem) -> JsonItem<'_> {
    // Either content_html or content_text is required.
    let content_html = item
        .content
        .as_deref()
        .or(item.description.as_deref())
        .unwrap_or_default();

    JsonItem {
        id: &item.guid,
        url: &item.link,
        title: &item.title,
        content_html,
        summary: item.description.as_deref(),
        image: item.image.as_deref(),
        date_published: item.pub_date.as_ref().map(to_rfc3339),
        date_modified: item.last_updated.as_ref().map(to_rfc3339),
        authors: item.authors.iter().map(to_author).collect(),
        tags: &item.categories,
        attachments: item
            .enclosure
            .iter()
            .map(|enclosure| JsonAttachment {
                url: &enclosure.url,
                mime_type: &enclosure.mime_type,
                size_in_bytes: enclosure.length,
            })
            .collect(),
    }
}

fn to_author(author: &Author) -> JsonAuthor<'_> {
    JsonAuthor {
        name: &author.name,
        url: author.url.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocaleOptions;
    use crate::page::Page;
    use crate::utils::date::parse_date;
    use serde_json::Value;

    fn store() -> FeedStore {
        let mut options = LocaleOptions::new("/zh/", "https://example.com");
        options.json = true;
        options.channel.title = "文档".into();
        options.channel.language = "zh-CN".into();
        options.channel.hub = Some("https://hub.example.com/".into());
        let mut store = FeedStore::for_locale(&options, chrono::Utc::now());

        let mut page = Page::new("/zh/a.html", "/zh/");
        page.frontmatter.title = Some("Quote \"this\"".into());
        page.frontmatter.date = Some("2024-06-15".into());
        page.frontmatter.tag = Some(crate::page::StringList::Many(vec!["rust".into()]));
        page.excerpt = "<p>summary</p>".into();
        store.add(FeedItem::new(&page, &options));
        store
    }

    #[test]
    fn test_render_document() {
        let json: Value = serde_json::from_str(&render(&store()).unwrap()).unwrap();

        assert_eq!(json["version"], VERSION);
        assert_eq!(json["title"], "文档");
        assert_eq!(json["home_page_url"], "https://example.com/zh/");
        assert_eq!(json["feed_url"], "https://example.com/zh/feed.json");
        assert_eq!(json["language"], "zh-CN");
        assert_eq!(json["hubs"][0]["type"], "WebSub");

        let item = &json["items"][0];
        assert_eq!(item["id"], "https://example.com/zh/a.html");
        assert_eq!(item["title"], "Quote \"this\"");
        assert_eq!(item["content_html"], "<p>summary</p>");
        assert_eq!(item["date_published"], "2024-06-15T00:00:00Z");
        assert_eq!(item["tags"][0], "rust");
        assert!(item.get("attachments").is_none());
    }

    #[test]
    fn test_render_ignores_build_time() {
        let options = LocaleOptions::new("/", "example.com");
        let a = FeedStore::for_locale(&options, parse_date("2020-01-01").unwrap());
        let b = FeedStore::for_locale(&options, parse_date("2024-01-01").unwrap());
        assert_eq!(render(&a).unwrap(), render(&b).unwrap());
    }
}
