//! Page selection strategies.
//!
//! A locale picks its feed pages with two injected functions:
//!
//! - [`PageFilter`]: `&Page -> bool`
//! - [`PageSorter`]: `(&Page, &Page) -> Ordering`
//!
//! Config files choose a preset by name; library callers can pass any
//! closure through [`PageFilter::new`] / [`PageSorter::new`].

use crate::page::Page;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, sync::Arc};

// ============================================================================
// presets
// ============================================================================

/// Named filters selectable from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    /// `feed:` frontmatter decides; otherwise any non-home page with a source file.
    #[default]
    Default,
    /// Every page of the locale.
    All,
    /// Pages with a frontmatter date or git creation time.
    Dated,
}

/// Named sorters selectable from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SorterPreset {
    /// Newest first, undated pages last.
    #[default]
    Newest,
    /// Oldest first, undated pages last.
    Oldest,
    /// By title, case-insensitive.
    Title,
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::All => "all",
            Self::Dated => "dated",
        })
    }
}

impl fmt::Display for SorterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
        })
    }
}

/// Default inclusion rule.
///
/// `feed: false` excludes and `feed: true` (or a table) includes; without it
/// a page is included when it comes from a source file and is not the home page.
pub fn default_filter(page: &Page) -> bool {
    match &page.frontmatter.feed {
        Some(setting) => setting.is_enabled(),
        None => page.file_path_relative.is_some() && !page.frontmatter.home,
    }
}

/// Compare two optional dates, newest first, `None` last.
pub fn compare_date_desc<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two optional dates, oldest first, `None` last.
pub fn compare_date_asc<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// strategy values
// ============================================================================

type FilterFn = dyn Fn(&Page) -> bool + Send + Sync;
type SorterFn = dyn Fn(&Page, &Page) -> Ordering + Send + Sync;

/// Page predicate shared across locale tasks.
#[derive(Clone)]
pub struct PageFilter {
    name: String,
    func: Arc<FilterFn>,
}

impl PageFilter {
    pub fn new(name: impl Into<String>, func: impl Fn(&Page) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    #[inline]
    pub fn matches(&self, page: &Page) -> bool {
        (self.func)(page)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<FilterPreset> for PageFilter {
    fn from(preset: FilterPreset) -> Self {
        let name = preset.to_string();
        match preset {
            FilterPreset::Default => Self::new(name, default_filter),
            FilterPreset::All => Self::new(name, |_| true),
            FilterPreset::Dated => Self::new(name, |page| page.sort_date().is_some()),
        }
    }
}

impl Default for PageFilter {
    fn default() -> Self {
        FilterPreset::default().into()
    }
}

impl fmt::Debug for PageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PageFilter").field(&self.name).finish()
    }
}

/// Page ordering shared across locale tasks.
#[derive(Clone)]
pub struct PageSorter {
    name: String,
    func: Arc<SorterFn>,
}

impl PageSorter {
    /// Wrap a comparator.
    ///
    /// `func` must be a total order (consistent, transitive, antisymmetric).
    /// Candidates are sorted with `slice::sort_by`, which may panic on
    /// comparators that are not.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&Page, &Page) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    #[inline]
    pub fn compare(&self, a: &Page, b: &Page) -> Ordering {
        (self.func)(a, b)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<SorterPreset> for PageSorter {
    fn from(preset: SorterPreset) -> Self {
        let name = preset.to_string();
        match preset {
            SorterPreset::Newest => Self::new(name, |a, b| {
                compare_date_desc(a.sort_date(), b.sort_date())
            }),
            SorterPreset::Oldest => Self::new(name, |a, b| {
                compare_date_asc(a.sort_date(), b.sort_date())
            }),
            SorterPreset::Title => Self::new(name, |a, b| {
                a.display_title()
                    .to_lowercase()
                    .cmp(&b.display_title().to_lowercase())
            }),
        }
    }
}

impl Default for PageSorter {
    fn default() -> Self {
        SorterPreset::default().into()
    }
}

impl fmt::Debug for PageSorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PageSorter").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{FeedSetting, GitData};

    fn page(path: &str, date: Option<&str>) -> Page {
        let mut page = Page::new(path, "/");
        page.file_path_relative = Some(format!("{}.md", path.trim_start_matches('/')));
        page.frontmatter.date = date.map(str::to_string);
        page
    }

    #[test]
    fn test_default_filter() {
        let mut p = page("/a", None);
        assert!(default_filter(&p));

        p.frontmatter.home = true;
        assert!(!default_filter(&p));

        p.frontmatter.feed = Some(FeedSetting::Toggle(true));
        assert!(default_filter(&p));

        let mut virtual_page = Page::new("/404.html", "/");
        assert!(!default_filter(&virtual_page));
        virtual_page.frontmatter.feed = Some(FeedSetting::Toggle(false));
        assert!(!default_filter(&virtual_page));
    }

    #[test]
    fn test_dated_filter() {
        let filter = PageFilter::from(FilterPreset::Dated);
        assert!(filter.matches(&page("/a", Some("2024-01-01"))));
        assert!(!filter.matches(&page("/b", None)));

        let mut git_only = page("/c", None);
        git_only.git = Some(GitData {
            created_time: Some(0),
            ..GitData::default()
        });
        assert!(filter.matches(&git_only));
    }

    #[test]
    fn test_newest_sorter_undated_last() {
        let sorter = PageSorter::default();
        let mut pages = vec![
            page("/undated", None),
            page("/old", Some("2020-01-01")),
            page("/new", Some("2024-01-01")),
        ];
        pages.sort_by(|a, b| sorter.compare(a, b));
        let paths: Vec<_> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/new", "/old", "/undated"]);
    }

    #[test]
    fn test_oldest_and_title_sorters() {
        let oldest = PageSorter::from(SorterPreset::Oldest);
        let a = page("/a", Some("2020-01-01"));
        let b = page("/b", Some("2024-01-01"));
        assert_eq!(oldest.compare(&a, &b), Ordering::Less);

        let title = PageSorter::from(SorterPreset::Title);
        let mut x = page("/x", None);
        x.title = "beta".into();
        let mut y = page("/y", None);
        y.title = "Alpha".into();
        assert_eq!(title.compare(&x, &y), Ordering::Greater);
    }

    #[test]
    fn test_custom_strategies_and_debug() {
        let filter = PageFilter::new("guide-only", |p| p.path.starts_with("/guide/"));
        assert!(filter.matches(&page("/guide/a", None)));
        assert!(!filter.matches(&page("/blog/a", None)));
        assert_eq!(format!("{filter:?}"), "PageFilter(\"guide-only\")");

        let sorter = PageSorter::new("path", |a, b| a.path.cmp(&b.path));
        assert_eq!(sorter.name(), "path");
    }

    #[test]
    fn test_preset_deserialize() {
        #[derive(Deserialize)]
        struct Wrap {
            filter: FilterPreset,
            sorter: SorterPreset,
        }
        let w: Wrap = toml::from_str("filter = \"dated\"\nsorter = \"oldest\"").unwrap();
        assert_eq!(w.filter, FilterPreset::Dated);
        assert_eq!(w.sorter, SorterPreset::Oldest);
    }
}
