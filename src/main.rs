//! Sitefeed - locale-aware Atom, JSON and RSS feeds for static sites.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use sitefeed::cli::{self, Cli, Commands};
use sitefeed::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.is_verbose());

    let config = cli::load_config(&cli)?;

    match &cli.command {
        Commands::Build { args } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to create tokio runtime")?;
            runtime.block_on(cli::build::build_feeds(config, args))?;
            Ok(())
        }
        Commands::Check { args } => cli::check::check_config(&config, args),
    }
}
