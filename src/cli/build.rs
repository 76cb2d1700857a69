//! `sitefeed build`: config + page manifest -> feed files.

use super::BuildArgs;
use crate::config::FeedConfig;
use crate::logger::highlight;
use crate::output::{OutputError, OutputReport, output_feeds};
use crate::page::load_pages;
use crate::utils::plural::plural_count;
use crate::log;
use anyhow::{Result, bail};
use std::time::Instant;

/// Validate the config, load pages and write every enabled feed.
///
/// Individual task failures are logged as they are reported; the build
/// still fails as a whole when any of them did.
pub async fn build_feeds(mut config: FeedConfig, args: &BuildArgs) -> Result<OutputReport> {
    let start = Instant::now();

    config.apply_overrides(args.output.as_deref(), args.hostname.as_deref());
    config.validate()?;
    let options = config.resolve();

    let pages = load_pages(&args.pages)?;
    log!("build"; "loaded {} from {}", plural_count(pages.len(), "page"), args.pages.display());

    match output_feeds(pages, &options, &config.output).await {
        Ok(report) => {
            log!(
                "build";
                "wrote {} ({}) to {} in {:.2?}",
                plural_count(report.files().count(), "file"),
                plural_count(report.total_items(), "feed item"),
                highlight(config.output.display()),
                start.elapsed()
            );
            Ok(report)
        }
        Err(OutputError::Failed { failures, report }) => {
            for failure in &failures {
                log!("error"; "{}", failure);
            }
            bail!(
                "{} failed, {} written",
                plural_count(failures.len(), "output task"),
                plural_count(report.files().count(), "file")
            )
        }
        Err(err) => Err(err.into()),
    }
}
