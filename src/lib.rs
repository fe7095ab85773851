//! Asset pipeline core for tola sites.
//!
//! Resolves template asset references into digested, cache-busting outputs:
//!
//! - [`config`] merges mode defaults with the `[assets]` table of `tola.toml`
//! - [`digest`] and [`manifest`] content-address outputs and remember them across builds
//! - [`url`] builds public urls, CDN-aware in production
//! - [`env`] ties resolution, compilation, output and cleanup together

pub mod asset;
pub mod config;
pub mod core;
pub mod digest;
pub mod env;
pub mod logger;
pub mod manifest;
pub mod tag;
pub mod url;
pub mod utils;
