//! Command-line interface definitions.

use crate::config::CONFIG_FILE;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Locale-aware Atom, JSON and RSS feed generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upwards from the current directory
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate feeds and stylesheets for every locale
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Validate the config and print what a build would write
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Page manifest (JSON) exported by the site build
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub pages: PathBuf,

    /// Output directory, overrides `output` in the config
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Override the site hostname.
    ///
    /// Useful in CI where the production origin differs from the one in
    /// sitefeed.toml:
    ///   sitefeed build --pages pages.json --hostname https://example.com
    #[arg(short = 'H', long, value_hint = clap::ValueHint::Url)]
    pub hostname: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Page manifest; when given, candidate counts are printed per locale
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub pages: Option<PathBuf>,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }

    pub const fn is_verbose(&self) -> bool {
        matches!(self.command, Commands::Build { args: BuildArgs { verbose: true, .. } })
    }
}
