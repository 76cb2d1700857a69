//! Command-line interface module.

mod args;
pub mod build;
pub mod check;

pub use args::{BuildArgs, CheckArgs, Cli, Commands};

use crate::config::{FeedConfig, find_config_file};
use anyhow::{Context, Result};

/// Locate and load the config named by `--config`.
pub fn load_config(cli: &Cli) -> Result<FeedConfig> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let path = find_config_file(&cli.config, &cwd)
        .with_context(|| format!("config file `{}` not found", cli.config.display()))?;
    crate::debug!("config"; "using {}", path.display());
    Ok(FeedConfig::load(&path)?)
}
