//! Command implementations.
//!
//! Every command resolves against one [`AssetEnv`]; `build` is the only one
//! that writes the manifest.

use anyhow::{Context, Result};
use std::sync::Arc;
use tola_assets::{config::SiteConfig, env::AssetEnv, log};

fn open_env(config: SiteConfig) -> Result<AssetEnv> {
    let manifest = tola_assets::env::manifest_path(&config);
    AssetEnv::with_minifier(Arc::new(config))
        .with_context(|| format!("failed to open manifest {}", manifest.display()))
}

/// Precompile configured assets, persist the manifest, optionally clean.
pub fn build_assets(config: SiteConfig, clean: bool) -> Result<()> {
    let env = open_env(config)?;

    let count = env.precompile().context("asset build failed")?;
    env.finish().context("failed to write manifest")?;
    log!("assets"; "{} precompiled, {} in manifest", count, env.manifest().len());

    if clean {
        clean_env(&env)?;
    }
    Ok(())
}

/// Print the public url of one reference.
pub fn print_url(config: SiteConfig, path: &str) -> Result<()> {
    let env = open_env(config)?;
    let url = env
        .url_for(path)
        .with_context(|| format!("failed to resolve `{path}`"))?;
    println!("{url}");
    Ok(())
}

/// Prune the asset destination against the existing manifest.
pub fn clean_assets(config: SiteConfig) -> Result<()> {
    clean_env(&open_env(config)?)
}

fn clean_env(env: &AssetEnv) -> Result<()> {
    let removed = env.clean().context("failed to clean asset destination")?;
    if removed.is_empty() {
        log!("clean"; "nothing to remove");
    } else {
        log!("clean"; "removed {} stale path(s)", removed.len());
    }
    Ok(())
}
