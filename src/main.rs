//! Tola assets - digested asset builds for tola sites.

mod cli;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use tola_assets::{config::SiteConfig, core::BuildMode, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let mode = if cli.production {
        BuildMode::PRODUCTION
    } else {
        BuildMode::from_env()
    };
    let config = load_config(&cli, mode)?;

    match &cli.command {
        Commands::Build { clean } => cli::build::build_assets(config, *clean),
        Commands::Url { path } => cli::build::print_url(config, path),
        Commands::Clean => cli::build::clean_assets(config),
    }
}

/// Load the config file; without one, defaults rooted at the current directory.
fn load_config(cli: &Cli, mode: BuildMode) -> Result<SiteConfig> {
    if !cli.config.exists() {
        let root = std::env::current_dir().context("failed to read current directory")?;
        return Ok(SiteConfig::new(root, mode));
    }
    SiteConfig::load(&cli.config, mode)
        .with_context(|| format!("failed to load {}", cli.config.display()))
}
