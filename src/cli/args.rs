//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Tola asset pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tola.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "tola.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Resolve for production (overrides TOLA_ENV)
    #[arg(short, long, global = true)]
    pub production: bool,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build precompiled assets and write the manifest
    #[command(visible_alias = "b")]
    Build {
        /// Remove stale outputs after building
        #[arg(short, long)]
        clean: bool,
    },

    /// Print the public url of an asset reference
    #[command(visible_alias = "u")]
    Url {
        /// Logical path or external url
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Remove outputs the manifest no longer lists
    Clean,
}
