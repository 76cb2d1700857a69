//! `sitefeed check`: validate the config and show the per-locale plan.

use super::CheckArgs;
use crate::config::{FeedConfig, LocaleOptions};
use crate::generator::FeedFormat;
use crate::logger::{highlight, succeed};
use crate::output::candidates;
use crate::page::{Page, load_pages};
use crate::utils::plural::plural_count;
use crate::log;
use anyhow::Result;
use std::path::PathBuf;

/// What a build would do for one locale.
#[derive(Debug)]
pub struct LocalePlan {
    pub locale: String,
    pub formats: Vec<FeedFormat>,
    pub count: usize,
    pub filter: String,
    pub sorter: String,
    /// Feed and stylesheet files, under the output directory.
    pub files: Vec<PathBuf>,
    /// Pages passing the filter, when a manifest was given.
    pub candidates: Option<usize>,
}

impl LocalePlan {
    fn new(config: &FeedConfig, options: &LocaleOptions, pages: Option<&[Page]>) -> Self {
        let formats: Vec<_> = FeedFormat::ALL
            .into_iter()
            .filter(|format| format.is_enabled(options))
            .collect();

        let names = &options.filenames;
        let mut files: Vec<_> = formats
            .iter()
            .map(|format| config.output.join(format.output_filename(names)))
            .collect();
        if options.atom {
            files.push(config.output.join(&names.atom_xsl));
        }
        if options.rss {
            files.push(config.output.join(&names.rss_xsl));
        }

        Self {
            locale: options.locale_path.clone(),
            formats,
            count: options.count,
            filter: options.filter.name().to_string(),
            sorter: options.sorter.name().to_string(),
            files,
            candidates: pages.map(|pages| candidates(pages, options).len()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.formats.is_empty()
    }

    /// Items the feed would hold.
    pub fn items(&self) -> Option<usize> {
        self.candidates.map(|n| n.min(self.count))
    }
}

/// Validate `config` and compute the plan of every locale.
pub fn plan(config: &FeedConfig, pages: Option<&[Page]>) -> Result<Vec<LocalePlan>> {
    config.validate()?;
    let options = config.resolve();
    Ok(options
        .values()
        .map(|opts| LocalePlan::new(config, opts, pages))
        .collect())
}

/// Print the plan; fails on invalid config or an unreadable manifest.
pub fn check_config(config: &FeedConfig, args: &CheckArgs) -> Result<()> {
    let pages = args.pages.as_deref().map(load_pages).transpose()?;
    let plans = plan(config, pages.as_deref())?;

    for plan in &plans {
        if !plan.is_enabled() {
            log!("check"; "{} no feed enabled", highlight(&plan.locale));
            continue;
        }
        let formats: Vec<_> = plan.formats.iter().map(|f| f.label()).collect();
        log!(
            "check";
            "{} {} (count {}, filter {}, sorter {})",
            highlight(&plan.locale),
            formats.join(", "),
            plan.count,
            plan.filter,
            plan.sorter
        );
        for file in &plan.files {
            log!("check"; "  {}", file.display());
        }
        if let (Some(found), Some(items)) = (plan.candidates, plan.items()) {
            log!(
                "check";
                "  {}, {} in feed",
                plural_count(found, "candidate page"),
                items
            );
        }
    }

    let enabled = plans.iter().filter(|p| p.is_enabled()).count();
    succeed(
        "check",
        &format!("config ok, {} with feeds", plural_count(enabled, "locale")),
    );
    Ok(())
}
