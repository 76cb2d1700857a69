//! RSS 2.0 feed generation.

use super::{GENERATOR, GeneratorError, insert_stylesheet};
use crate::feed::{FeedChannel, FeedItem, FeedStore};
use crate::page::{Author, Enclosure};
use crate::utils::date::to_rfc2822;
use atom_syndication::{Link, LinkBuilder};
use regex::Regex;
use rss::extension::atom::AtomExtension;
use rss::extension::dublincore::DublinCoreExtension;
use rss::validation::Validate;
use rss::{
    Category, CategoryBuilder, ChannelBuilder, EnclosureBuilder, GuidBuilder, ImageBuilder, Item,
    ItemBuilder,
};
use std::collections::BTreeMap;
use std::sync::LazyLock;

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Render the store as an RSS document.
pub fn render(store: &FeedStore) -> Result<String, GeneratorError> {
    let channel = store.channel();

    let items: Vec<Item> = store.items().iter().map(to_item).collect();

    let image = channel.image.as_ref().map(|url| {
        ImageBuilder::default()
            .url(url.clone())
            .title(channel.title.clone())
            .link(channel.link.clone())
            .build()
    });

    let mut atom_ext = AtomExtension::default();
    atom_ext.set_links(atom_links(channel));

    let rss_channel = ChannelBuilder::default()
        .title(channel.title.clone())
        .link(channel.link.clone())
        .description(channel.description.clone())
        .language(Some(channel.language.clone()))
        .copyright(channel.copyright.clone())
        .last_build_date(Some(to_rfc2822(&channel.last_updated)))
        .generator(Some(GENERATOR.to_string()))
        .ttl(channel.ttl.map(|ttl| ttl.to_string()))
        .image(image)
        .namespaces(BTreeMap::from([(
            "content".to_string(),
            CONTENT_NAMESPACE.to_string(),
        )]))
        .atom_ext(Some(atom_ext))
        .items(items)
        .build();

    rss_channel.validate()?;
    let xml = rss_channel.write_to(Vec::new())?;
    Ok(insert_stylesheet(
        &String::from_utf8_lossy(&xml),
        &channel.rss_stylesheet,
    ))
}

fn atom_links(channel: &FeedChannel) -> Vec<Link> {
    let mut links = Vec::new();
    if let Some(href) = &channel.links.rss {
        links.push(
            LinkBuilder::default()
                .href(href.clone())
                .rel("self".to_string())
                .mime_type(Some("application/rss+xml".to_string()))
                .build(),
        );
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

fn to_item(item: &FeedItem) -> Item {
    // RSS <author> is an email address; everyone else goes to dc:creator.
    let mut author = None;
    let mut creators = Vec::new();
    for person in &item.authors {
        match normalize_rss_author(person) {
            Some(formatted) if author.is_none() => author = Some(formatted),
            _ => creators.push(person.name.clone()),
        }
    }
    let dublin_core = (!creators.is_empty()).then(|| {
        let mut ext = DublinCoreExtension::default();
        ext.set_creators(creators);
        ext
    });

    let categories: Vec<Category> = item
        .categories
        .iter()
        .map(|name| CategoryBuilder::default().name(name.clone()).build())
        .collect();

    let enclosure = item.enclosure.as_ref().and_then(|enclosure| to_enclosure(item, enclosure));

    ItemBuilder::default()
        .title(Some(item.title.clone()))
        .link(Some(item.link.clone()))
        .guid(Some(
            GuidBuilder::default()
                .permalink(item.guid == item.link)
                .value(item.guid.clone())
                .build(),
        ))
        .description(item.description.clone())
        .content(item.content.clone())
        .pub_date(item.pub_date.as_ref().map(to_rfc2822))
        .author(author)
        .categories(categories)
        .enclosure(enclosure)
        .dublin_core_ext(dublin_core)
        .build()
}

/// RSS enclosure of an item, or `None` when it would not validate.
///
/// RSS requires a positive `length` and a valid MIME type; an enclosure
/// missing either is left out of this format only.
fn to_enclosure(item: &FeedItem, enclosure: &Enclosure) -> Option<rss::Enclosure> {
    let Some(length) = enclosure.length.filter(|&len| len > 0) else {
        crate::debug!("rss"; "skipping enclosure of {} without length", item.link);
        return None;
    };
    let built = EnclosureBuilder::default()
        .url(enclosure.url.clone())
        .length(length.to_string())
        .mime_type(enclosure.mime_type.clone())
        .build();
    match built.validate() {
        Ok(()) => Some(built),
        Err(err) => {
            crate::debug!("rss"; "skipping enclosure of {}: {}", item.link, err);
            None
        }
    }
}

/// Format an author as RSS expects: "email (Name)".
///
/// Names already written that way are kept; authors without an email have
/// no valid RSS form.
fn normalize_rss_author(author: &Author) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    if RE_VALID_AUTHOR.is_match(&author.name) {
        return Some(author.name.clone());
    }

    let formatted = format!("{} ({})", author.email.as_deref()?, author.name);
    RE_VALID_AUTHOR.is_match(&formatted).then_some(formatted)
}
