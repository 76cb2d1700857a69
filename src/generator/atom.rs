//! Atom 1.0 feed generation.

use super::{GENERATOR, GeneratorError, insert_stylesheet};
use crate::feed::{FeedChannel, FeedItem, FeedStore};
use crate::page::Author;
use atom_syndication::{
    Category, CategoryBuilder, ContentBuilder, Entry, EntryBuilder, FeedBuilder, FixedDateTime,
    GeneratorBuilder, Link, LinkBuilder, Person, PersonBuilder, Text,
};
use chrono::{DateTime, Utc};

/// Render the store as an Atom document.
pub fn render(store: &FeedStore) -> Result<String, GeneratorError> {
    let channel = store.channel();

    let entries: Vec<Entry> = store.items().iter().map(to_entry).collect();

    let feed = FeedBuilder::default()
        .title(Text::plain(channel.title.clone()))
        .id(channel.link.clone())
        .updated(to_fixed(channel.last_updated))
        .authors(channel.author.iter().map(to_person).collect::<Vec<_>>())
        .links(feed_links(channel))
        .subtitle(
            Some(channel.description.clone())
                .filter(|d| !d.is_empty())
                .map(Text::plain),
        )
        .rights(channel.copyright.clone().map(Text::plain))
        .icon(channel.icon.clone())
        .logo(channel.image.clone())
        .generator(Some(GeneratorBuilder::default().value(GENERATOR).build()))
        .lang(Some(channel.language.clone()))
        .entries(entries)
        .build();

    let xml = feed.write_to(Vec::new())?;
    Ok(insert_stylesheet(
        &String::from_utf8_lossy(&xml),
        &channel.atom_stylesheet,
    ))
}

fn feed_links(channel: &FeedChannel) -> Vec<Link> {
    let link = |href: &str, rel: &str, mime: &str| -> Link {
        LinkBuilder::default()
            .href(href.to_string())
            .rel(rel.to_string())
            .mime_type(Some(mime.to_string()))
            .build()
    };

    let mut links = vec![link(&channel.link, "alternate", "text/html")];
    if let Some(href) = &channel.links.atom {
        links.push(link(href, "self", "application/atom+xml"));
    }
    if let Some(href) = &channel.links.json {
        links.push(link(href, "alternate", "application/feed+json"));
    }
    if let Some(href) = &channel.links.rss {
        links.push(link(href, "alternate", "application/rss+xml"));
    }
    if let Some(hub) = &channel.hub {
        links.push(
            LinkBuilder::default()
                .href(hub.clone())
                .rel("hub".to_string())
                .build(),
        );
    }
    links
}

fn to_entry(item: &FeedItem) -> Entry {
    let mut links = vec![
        LinkBuilder::default()
            .href(item.link.clone())
            .rel("alternate".to_string())
            .build(),
    ];
    if let Some(enclosure) = &item.enclosure {
        links.push(
            LinkBuilder::default()
                .href(enclosure.url.clone())
                .rel("enclosure".to_string())
                .mime_type(Some(enclosure.mime_type.clone()))
                .length(enclosure.length.map(|len| len.to_string()))
                .build(),
        );
    }

    let categories: Vec<Category> = item
        .categories
        .iter()
        .map(|term| CategoryBuilder::default().term(term.clone()).build())
        .collect();

    // `updated` is mandatory; undated entries sit at the epoch.
    let updated = item.updated().unwrap_or(DateTime::UNIX_EPOCH);

    EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(item.guid.clone())
        .updated(to_fixed(updated))
        .published(item.pub_date.map(to_fixed))
        .links(links)
        .summary(item.description.clone().map(Text::html))
        .content(item.content.clone().map(|html| {
            ContentBuilder::default()
                .value(Some(html))
                .content_type(Some("html".to_string()))
                .build()
        }))
        .authors(item.authors.iter().map(to_person).collect::<Vec<_>>())
        .contributors(item.contributors.iter().map(to_person).collect::<Vec<_>>())
        .categories(categories)
        .build()
}

fn to_person(author: &Author) -> Person {
    PersonBuilder::default()
        .name(author.name.clone())
        .email(author.email.clone())
        .uri(author.url.clone())
        .build()
}

fn to_fixed(date: DateTime<Utc>) -> FixedDateTime {
    date.fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocaleOptions;
    use crate::page::{Enclosure, Page};
    use crate::utils::date::parse_date;
    use atom_syndication::Feed;

    fn store() -> FeedStore {
        let mut options = LocaleOptions::new("/", "https://example.com");
        options.atom = true;
        options.rss = true;
        options.channel.title = "Docs & Notes".into();
        options.channel.author = Some(Author {
            name: "Team".into(),
            email: Some("team@example.com".into()),
            url: None,
        });
        let build_time = parse_date("2024-07-01T12:00:00Z").unwrap();
        let mut store = FeedStore::for_locale(&options, build_time);

        let mut dated = Page::new("/dated.html", "/");
        dated.frontmatter.title = Some("Fish <&> Chips".into());
        dated.frontmatter.date = Some("2024-06-15T08:30:00Z".into());
        dated.content = "<p>body</p>".into();
        let mut item = FeedItem::new(&dated, &options);
        item.enclosure = Some(Enclosure {
            url: "https://example.com/a.mp3".into(),
            mime_type: "audio/mpeg".into(),
            length: Some(1024),
        });
        store.add(item);
        store.add(FeedItem::new(&Page::new("/undated.html", "/"), &options));
        store
    }

    #[test]
    fn test_render_parses_back() {
        let xml = render(&store()).unwrap();
        let feed: Feed = xml.parse().unwrap();

        assert_eq!(feed.title().as_str(), "Docs & Notes");
        assert_eq!(feed.id(), "https://example.com/");
        assert_eq!(feed.updated().to_rfc3339(), "2024-07-01T12:00:00+00:00");
        assert!(
            feed.links()
                .iter()
                .any(|l| l.rel() == "self" && l.href() == "https://example.com/atom.xml")
        );

        let entries = feed.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title().as_str(), "Fish <&> Chips");
        assert_eq!(entries[0].id(), "https://example.com/dated.html");
        assert_eq!(entries[0].updated().to_rfc3339(), "2024-06-15T08:30:00+00:00");
        assert_eq!(entries[0].authors()[0].name(), "Team");
        assert!(entries[0].links().iter().any(|l| l.rel() == "enclosure"));
        assert_eq!(entries[1].updated().timestamp(), 0);
    }

    #[test]
    fn test_render_is_deterministic_and_styled() {
        let store = store();
        let first = render(&store).unwrap();
        assert_eq!(first, render(&store).unwrap());
        assert!(first.contains(r#"<?xml-stylesheet type="text/xsl" href="/atom.xsl"?>"#));
        assert!(first.contains("Fish &lt;&amp;"));
    }

    #[test]
    fn test_render_empty_store() {
        let options = LocaleOptions::new("/", "example.com");
        let store = FeedStore::for_locale(&options, DateTime::UNIX_EPOCH);
        let feed: Feed = render(&store).unwrap().parse().unwrap();
        assert!(feed.entries().is_empty());
    }
}
