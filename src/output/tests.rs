use std::path::Path;

use atom_syndication::Feed;
use tempfile::TempDir;

use super::*;
use crate::config::PageSorter;
use crate::generator::FeedFormat;
use crate::page::{Enclosure, FeedMeta, FeedSetting};

fn page(path: &str, locale: &str, date: Option<&str>) -> Page {
    let mut page = Page::new(path, locale);
    page.file_path_relative = Some(format!("{}.md", path.trim_matches('/')));
    page.frontmatter.date = date.map(str::to_string);
    page
}

fn options(locale: &str) -> LocaleOptions {
    LocaleOptions::new(locale, "https://example.com")
}

fn options_map(entries: Vec<LocaleOptions>) -> ResolvedFeedOptionsMap {
    entries
        .into_iter()
        .map(|o| (o.locale_path.clone(), o))
        .collect()
}

fn read(dest: &Path, name: &str) -> String {
    std::fs::read_to_string(dest.join(name)).unwrap()
}

#[test]
fn test_collect_items_filters_by_locale_and_caps() {
    let pages = vec![
        page("/a.html", "/", Some("2024-01-01")),
        page("/zh/b.html", "/zh/", Some("2024-02-01")),
        page("/c.html", "/", Some("2024-03-01")),
        page("/d.html", "/", None),
    ];
    let mut opts = options("/");
    opts.count = 2;
    let mut store = FeedStore::for_locale(&opts, Utc::now());

    assert_eq!(collect_items(&mut store, &pages, &opts), 2);
    let links: Vec<_> = store.items().iter().map(|i| i.link.as_str()).collect();
    assert_eq!(
        links,
        vec!["https://example.com/c.html", "https://example.com/a.html"]
    );
}

#[test]
fn test_collect_items_skips_duplicate_guids() {
    let mut dup = page("/b.html", "/", Some("2024-02-01"));
    dup.frontmatter.feed = Some(FeedSetting::Options(FeedMeta {
        guid: Some("https://example.com/a.html".into()),
        ..FeedMeta::default()
    }));
    let pages = vec![
        page("/a.html", "/", Some("2024-03-01")),
        dup,
        page("/c.html", "/", Some("2024-01-01")),
    ];
    let opts = options("/");
    let mut store = FeedStore::for_locale(&opts, Utc::now());

    assert_eq!(collect_items(&mut store, &pages, &opts), 2);
    assert_eq!(store.items()[1].link, "https://example.com/c.html");
}

#[test]
fn test_candidates_stable_for_ties() {
    let pages = vec![
        page("/first.html", "/", None),
        page("/second.html", "/", None),
    ];
    let mut opts = options("/");
    opts.sorter = PageSorter::new("flat", |_, _| std::cmp::Ordering::Equal);
    let paths: Vec<_> = candidates(&pages, &opts)
        .into_iter()
        .map(|p| p.path.as_str())
        .collect();
    assert_eq!(paths, vec!["/first.html", "/second.html"]);
}

#[tokio::test]
async fn test_atom_only_newest_two() {
    let tmp = TempDir::new().unwrap();
    let pages = vec![
        page("/old.html", "/", Some("2023-01-01")),
        page("/new.html", "/", Some("2024-06-01")),
        page("/mid.html", "/", Some("2024-01-01")),
    ];
    let mut opts = options("/");
    opts.atom = true;
    opts.count = 2;

    let report = output_feeds(pages, &options_map(vec![opts]), tmp.path())
        .await
        .unwrap();

    assert_eq!(report.total_items(), 2);
    assert_eq!(report.locales["/"].files, vec![tmp.path().join("atom.xml")]);
    assert_eq!(report.stylesheets, vec![tmp.path().join("atom.xsl")]);
    assert!(!tmp.path().join("feed.json").exists());
    assert!(!tmp.path().join("rss.xml").exists());
    assert!(!tmp.path().join("rss.xsl").exists());

    let feed: Feed = read(tmp.path(), "atom.xml").parse().unwrap();
    let ids: Vec<_> = feed.entries().iter().map(|e| e.id()).collect();
    assert_eq!(
        ids,
        vec!["https://example.com/new.html", "https://example.com/mid.html"]
    );
    assert_eq!(read(tmp.path(), "atom.xsl"), crate::embed::ATOM_XSL);
}

#[tokio::test]
async fn test_all_disabled_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let pages = vec![page("/a.html", "/", Some("2024-01-01"))];
    let map = options_map(vec![options("/"), options("/zh/")]);

    let report = output_feeds(pages, &map, tmp.path()).await.unwrap();

    assert_eq!(report, OutputReport::default());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_locales_get_prefixed_files() {
    let tmp = TempDir::new().unwrap();
    let pages = vec![
        page("/a.html", "/", Some("2024-01-01")),
        page("/zh/a.html", "/zh/", Some("2024-01-01")),
        page("/zh/b.html", "/zh/", Some("2024-02-01")),
    ];
    let mut root = options("/");
    root.rss = true;
    let mut zh = options("/zh/");
    zh.json = true;
    zh.rss = true;

    let report = output_feeds(pages, &options_map(vec![root, zh]), tmp.path())
        .await
        .unwrap();

    assert_eq!(report.locales["/"].items, 1);
    assert_eq!(report.locales["/zh/"].items, 2);
    assert_eq!(
        report.stylesheets,
        vec![tmp.path().join("rss.xsl"), tmp.path().join("zh/rss.xsl")]
    );

    let json: serde_json::Value = serde_json::from_str(&read(tmp.path(), "zh/feed.json")).unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["items"][0]["url"], "https://example.com/zh/b.html");

    let rss = read(tmp.path(), "zh/rss.xml");
    assert!(rss.contains(r#"href="/zh/rss.xsl""#));
    assert!(!rss.contains("https://example.com/a.html"));
}

#[tokio::test]
async fn test_configured_template_is_copied() {
    let tmp = TempDir::new().unwrap();
    let template = tmp.path().join("custom.xsl");
    std::fs::write(&template, "<xsl:stylesheet/>").unwrap();
    let dest = tmp.path().join("dist");

    let mut opts = options("/");
    opts.rss = true;
    opts.filenames.rss_xsl_template = Some(template);

    output_feeds(Vec::<Page>::new(), &options_map(vec![opts]), &dest)
        .await
        .unwrap();
    assert_eq!(read(&dest, "rss.xsl"), "<xsl:stylesheet/>");
    assert!(dest.join("rss.xml").exists());
}

#[tokio::test]
async fn test_failures_are_aggregated() {
    let tmp = TempDir::new().unwrap();
    // A file where the /zh/ directory should go.
    std::fs::write(tmp.path().join("zh"), "").unwrap();

    let pages = vec![
        page("/a.html", "/", Some("2024-01-01")),
        page("/zh/a.html", "/zh/", Some("2024-01-01")),
    ];
    let mut root = options("/");
    root.json = true;
    let mut zh = options("/zh/");
    zh.json = true;

    let err = output_feeds(pages, &options_map(vec![root, zh]), tmp.path())
        .await
        .unwrap_err();

    let OutputError::Failed { failures, report } = err else {
        panic!("expected aggregated failure");
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].task, Some(OutputTask::Locale("/zh/".into())));
    assert!(matches!(failures[0].error, OutputError::CreateDir(..)));

    assert!(tmp.path().join("feed.json").exists());
    assert_eq!(report.locales["/"].items, 1);
    assert!(!report.locales.contains_key("/zh/"));
}

#[tokio::test]
async fn test_failed_format_keeps_siblings() {
    let tmp = TempDir::new().unwrap();
    let pages = vec![page("/a.html", "/", Some("2024-01-01"))];
    let mut opts = options("/");
    opts.atom = true;
    opts.json = true;
    opts.rss = true;
    // rejected by RSS validation only
    opts.channel.ttl = Some(0);

    let err = output_feeds(pages, &options_map(vec![opts]), tmp.path())
        .await
        .unwrap_err();

    let OutputError::Failed { failures, report } = err else {
        panic!("expected aggregated failure");
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].task, Some(OutputTask::Locale("/".into())));
    assert!(matches!(
        failures[0].error,
        OutputError::Render {
            format: FeedFormat::Rss,
            ..
        }
    ));

    assert!(tmp.path().join("atom.xml").exists());
    assert!(tmp.path().join("feed.json").exists());
    assert!(!tmp.path().join("rss.xml").exists());
    assert_eq!(
        report.locales["/"].files,
        vec![tmp.path().join("atom.xml"), tmp.path().join("feed.json")]
    );
    assert_eq!(report.locales["/"].items, 1);
}

#[tokio::test]
async fn test_enclosure_without_length_keeps_all_formats() {
    let tmp = TempDir::new().unwrap();
    let mut episode = page("/ep1.html", "/", Some("2024-01-01"));
    episode.frontmatter.feed = Some(FeedSetting::Options(FeedMeta {
        enclosure: Some(Enclosure {
            url: "/ep1.mp3".into(),
            mime_type: "audio/mpeg".into(),
            length: None,
        }),
        ..FeedMeta::default()
    }));
    let mut opts = options("/");
    opts.atom = true;
    opts.json = true;
    opts.rss = true;

    let report = output_feeds(vec![episode], &options_map(vec![opts]), tmp.path())
        .await
        .unwrap();

    assert_eq!(report.locales["/"].files.len(), 3);
    let rss = read(tmp.path(), "rss.xml");
    assert!(rss.contains("https://example.com/ep1.html"));
    assert!(!rss.contains("<enclosure"));
    let json: serde_json::Value = serde_json::from_str(&read(tmp.path(), "feed.json")).unwrap();
    assert_eq!(
        json["items"][0]["attachments"][0]["url"],
        "https://example.com/ep1.mp3"
    );
}

#[tokio::test]
async fn test_missing_template_is_reported() {
    let tmp = TempDir::new().unwrap();
    let mut opts = options("/");
    opts.atom = true;
    opts.filenames.atom_xsl_template = Some(tmp.path().join("missing.xsl"));

    let err = output_feeds(Vec::<Page>::new(), &options_map(vec![opts]), tmp.path())
        .await
        .unwrap_err();

    let failures = err.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], OutputError::Copy { .. }));
    assert!(tmp.path().join("atom.xml").exists());
}
