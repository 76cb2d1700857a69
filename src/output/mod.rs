//! Feed output orchestration.
//!
//! ```text
//! output_feeds
//!   ├── locale task (one per locale with a format enabled)
//!   │     pages ─▶ path_locale ─▶ filter ─▶ sort ─▶ FeedStore (capped)
//!   │     └── join!(atom, json, rss) ─▶ dest/<prefix><file>
//!   └── stylesheet task (one per locale and XML format)
//!         template or embedded XSL ─▶ dest/<prefix><name>.xsl
//! ```
//!
//! Every task is spawned into one [`JoinSet`] up front and runs to
//! completion, and so does every format inside a locale task. Failures are
//! collected and reported together once all tasks have settled, so one
//! broken locale or format never hides another.

mod error;

pub use error::{OutputError, OutputTask, TaskFailure};

use crate::config::{LocaleOptions, ResolvedFeedOptionsMap};
use crate::embed;
use crate::feed::{FeedItem, FeedStore};
use crate::generator::FeedFormat;
use crate::logger::{highlight, succeed};
use crate::page::Page;
use crate::utils::plural::{plural_count, plural_s};
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Outcome of one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleReport {
    /// Number of feed items written.
    pub items: usize,
    /// Generated feed files.
    pub files: Vec<PathBuf>,
}

/// What a build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputReport {
    pub locales: BTreeMap<String, LocaleReport>,
    /// Written stylesheets, sorted.
    pub stylesheets: Vec<PathBuf>,
}

impl OutputReport {
    pub fn total_items(&self) -> usize {
        self.locales.values().map(|l| l.items).sum()
    }

    /// Every written file: feeds first, then stylesheets.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.locales
            .values()
            .flat_map(|l| l.files.iter())
            .chain(self.stylesheets.iter())
            .map(PathBuf::as_path)
    }
}

enum TaskOutcome {
    Locale {
        locale: String,
        report: LocaleReport,
        errors: Vec<OutputError>,
    },
    Stylesheet(PathBuf),
}

/// Generate every enabled feed and stylesheet of every locale into `dest`.
///
/// Returns [`OutputError::Failed`] after all tasks settled when any of them
/// failed; the report inside still lists what was written.
pub async fn output_feeds(
    pages: impl Into<Arc<[Page]>>,
    options: &ResolvedFeedOptionsMap,
    dest: &Path,
) -> Result<OutputReport, OutputError> {
    let pages: Arc<[Page]> = pages.into();
    let build_time = Utc::now();

    let mut stores: BTreeMap<&str, FeedStore> = options
        .iter()
        .map(|(locale, opts)| (locale.as_str(), FeedStore::for_locale(opts, build_time)))
        .collect();

    let mut tasks = JoinSet::new();

    for (locale, opts) in options.iter().filter(|(_, opts)| opts.is_enabled()) {
        let Some(store) = stores.remove(locale.as_str()) else {
            continue;
        };
        let task = OutputTask::Locale(locale.clone());
        let pages = Arc::clone(&pages);
        let opts = opts.clone();
        let dest = dest.to_path_buf();
        tasks.spawn(async move {
            let (report, errors) = output_locale(&pages, &opts, store, &dest).await;
            let outcome = TaskOutcome::Locale {
                locale: opts.locale_path.clone(),
                report,
                errors,
            };
            (task, Ok::<_, OutputError>(outcome))
        });
    }

    for (locale, opts) in options {
        for format in [FeedFormat::Atom, FeedFormat::Rss] {
            if !format.is_enabled(opts) {
                continue;
            }
            let task = OutputTask::Stylesheet {
                locale: locale.clone(),
                format,
            };
            let (filename, template) = stylesheet_source(format, opts);
            let dest = dest.to_path_buf();
            tasks.spawn(async move {
                let result = output_stylesheet(format, &filename, template.as_deref(), &dest)
                    .await
                    .map(TaskOutcome::Stylesheet);
                (task, result)
            });
        }
    }

    let mut report = OutputReport::default();
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((
                task,
                Ok(TaskOutcome::Locale {
                    locale,
                    report: locale_report,
                    errors,
                }),
            )) => {
                failures.extend(errors.into_iter().map(|error| TaskFailure {
                    task: Some(task.clone()),
                    error,
                }));
                if !locale_report.files.is_empty() {
                    report.locales.insert(locale, locale_report);
                }
            }
            Ok((_, Ok(TaskOutcome::Stylesheet(path)))) => report.stylesheets.push(path),
            Ok((task, Err(error))) => failures.push(TaskFailure {
                task: Some(task),
                error,
            }),
            Err(err) => failures.push(TaskFailure {
                task: None,
                error: OutputError::Join(err),
            }),
        }
    }
    report.stylesheets.sort();

    if failures.is_empty() {
        Ok(report)
    } else {
        failures.sort_by_key(|f| f.task.clone());
        Err(OutputError::Failed { failures, report })
    }
}

/// Pages of a locale that pass its filter, in sorter order.
pub fn candidates<'a>(pages: &'a [Page], options: &LocaleOptions) -> Vec<&'a Page> {
    let mut selected: Vec<&Page> = pages
        .iter()
        .filter(|page| page.path_locale == options.locale_path)
        .filter(|page| options.filter.matches(page))
        .collect();
    // stable: ties keep input order
    selected.sort_by(|a, b| options.sorter.compare(a, b));
    selected
}

/// Fill `store` from the locale's candidates, stopping once it is full.
/// Returns the number of items held.
pub fn collect_items(store: &mut FeedStore, pages: &[Page], options: &LocaleOptions) -> usize {
    for page in candidates(pages, options) {
        if store.is_full() {
            break;
        }
        if !store.add(FeedItem::new(page, options)) {
            crate::debug!("feed"; "skipping duplicate entry {}", page.path);
        }
    }
    store.len()
}

/// Write every enabled format of a locale. Each format runs to completion;
/// the report lists what was written and the errors what was not.
async fn output_locale(
    pages: &[Page],
    options: &LocaleOptions,
    mut store: FeedStore,
    dest: &Path,
) -> (LocaleReport, Vec<OutputError>) {
    let count = collect_items(&mut store, pages, options);
    succeed(
        "feed",
        &format!(
            "added {} as feed item{} in route {}",
            highlight(plural_count(count, "page")),
            plural_s(count),
            highlight(&options.locale_path)
        ),
    );

    let store = &store;
    let (atom, json, rss) = tokio::join!(
        write_feed(FeedFormat::Atom, store, options, dest),
        write_feed(FeedFormat::Json, store, options, dest),
        write_feed(FeedFormat::Rss, store, options, dest),
    );

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for result in [atom, json, rss] {
        match result {
            Ok(Some(path)) => files.push(path),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }
    (LocaleReport { items: count, files }, errors)
}

async fn write_feed(
    format: FeedFormat,
    store: &FeedStore,
    options: &LocaleOptions,
    dest: &Path,
) -> Result<Option<PathBuf>, OutputError> {
    if !format.is_enabled(options) {
        return Ok(None);
    }

    let filename = format.output_filename(&options.filenames);
    let content = format
        .render(store)
        .map_err(|source| OutputError::Render {
            locale: options.locale_path.clone(),
            format,
            source,
        })?;

    let path = dest.join(filename);
    write_file(&path, content).await?;
    succeed(
        format.name(),
        &format!("generated {format} feed file to {}", highlight(filename)),
    );
    Ok(Some(path))
}

fn stylesheet_source(format: FeedFormat, options: &LocaleOptions) -> (String, Option<PathBuf>) {
    let names = &options.filenames;
    match format {
        FeedFormat::Rss => (names.rss_xsl.clone(), names.rss_xsl_template.clone()),
        _ => (names.atom_xsl.clone(), names.atom_xsl_template.clone()),
    }
}

async fn output_stylesheet(
    format: FeedFormat,
    filename: &str,
    template: Option<&Path>,
    dest: &Path,
) -> Result<PathBuf, OutputError> {
    let path = dest.join(filename);
    match template {
        Some(template) => {
            create_parent(&path).await?;
            tokio::fs::copy(template, &path)
                .await
                .map_err(|source| OutputError::Copy {
                    from: template.to_path_buf(),
                    to: path.clone(),
                    source,
                })?;
        }
        None => write_file(&path, embed::stylesheet(format).unwrap_or_default()).await?,
    }

    succeed(
        format.name(),
        &format!("copied {format} stylesheet to {}", highlight(filename)),
    );
    Ok(path)
}

async fn create_parent(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| OutputError::CreateDir(parent.to_path_buf(), err))?;
    }
    Ok(())
}

async fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), OutputError> {
    create_parent(path).await?;
    tokio::fs::write(path, content)
        .await
        .map_err(|err| OutputError::Write(path.to_path_buf(), err))
}

#[cfg(test)]
mod tests;
