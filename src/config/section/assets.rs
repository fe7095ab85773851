//! `[assets]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! digest = true                 # Inject content digests into output names
//! source_maps = false           # Ask the compiler for source maps
//! subresource_integrity = true  # Emit `integrity` attributes
//! destination = "/assets"       # Output directory inside the site destination
//! compression = true            # Minify scripts and stylesheets
//! gzip = false                  # Keep gzip siblings next to outputs
//! precompile = ["app.js"]       # Always built, even when unreferenced
//! sources = ["_vendor"]         # Added to the built-in search directories
//!
//! [assets.caching]
//! enabled = true
//! path = ".tola-cache/assets"
//! type = "file"
//!
//! [assets.cdn]
//! url = "https://cdn.example.com"
//! baseurl = false               # Keep site baseurl in cdn urls
//! destination = false           # Keep asset destination in cdn urls
//! ```

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::config::types::{ConfigError, deep_merge};
use crate::core::BuildMode;
use crate::log;

/// Directories searched for assets, relative to the site source.
///
/// User-declared `sources` are added in front of these, never replacing them.
pub const DEFAULT_SOURCES: [&str; 27] = [
    "assets/css",
    "assets/fonts",
    "assets/images",
    "assets/videos",
    "assets/javascript",
    "assets/video",
    "assets/image",
    "assets/img",
    "assets/js",
    "_assets/css",
    "_assets/fonts",
    "_assets/images",
    "_assets/videos",
    "_assets/javascript",
    "_assets/video",
    "_assets/image",
    "_assets/img",
    "_assets/js",
    "css",
    "fonts",
    "images",
    "videos",
    "javascript",
    "video",
    "image",
    "img",
    "js",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Inject content digests into output file names.
    pub digest: bool,

    /// Ask the compiler collaborator for source maps.
    pub source_maps: bool,

    /// Publish `integrity` hashes alongside asset urls.
    pub subresource_integrity: bool,

    /// Output directory for assets, inside the site destination.
    pub destination: String,

    /// Minify scripts and stylesheets.
    pub compression: bool,

    /// Keep gzip siblings of compiled outputs.
    pub gzip: bool,

    /// Compiler cache settings.
    pub caching: CachingConfig,

    /// Logical paths built on every run, referenced or not.
    pub precompile: Vec<String>,

    /// CDN rewriting for production urls.
    pub cdn: CdnConfig,

    /// Source directories searched in order. Always a superset of the built-in list.
    pub sources: Vec<String>,

    /// Manifest file name inside the asset destination.
    pub manifest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachingConfig {
    pub enabled: bool,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for CachingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: ".tola-cache/assets".into(),
            kind: "file".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Keep the site baseurl segment in CDN urls.
    pub baseurl: bool,
    /// Keep the asset destination segment in CDN urls.
    pub destination: bool,
    /// CDN origin, e.g. `https://cdn.example.com`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self::defaults(BuildMode::DEVELOPMENT)
    }
}

impl AssetsConfig {
    /// Built-in defaults for a build mode.
    ///
    /// Development and production differ only in `source_maps`.
    pub fn defaults(mode: BuildMode) -> Self {
        Self {
            digest: false,
            source_maps: mode.is_dev(),
            subresource_integrity: false,
            destination: "/assets".into(),
            compression: true,
            gzip: false,
            caching: CachingConfig::default(),
            precompile: Vec::new(),
            cdn: CdnConfig::default(),
            sources: DEFAULT_SOURCES.iter().map(|s| (*s).to_string()).collect(),
            manifest: ".manifest.json".into(),
        }
    }

    /// Merge user overrides onto the defaults for `mode`.
    pub fn resolve(mode: BuildMode, user: &Table) -> Result<Self, ConfigError> {
        Self::resolve_with(mode, user, |_| {})
    }

    /// Like [`resolve`](Self::resolve), running `before_merge` on the defaults
    /// table before user values are merged in.
    pub fn resolve_with(
        mode: BuildMode,
        user: &Table,
        before_merge: impl FnOnce(&mut Table),
    ) -> Result<Self, ConfigError> {
        let defaults = Self::defaults(mode);
        let mut merged = match Value::try_from(&defaults)? {
            Value::Table(table) => table,
            _ => Table::new(),
        };

        before_merge(&mut merged);
        let builtin: Vec<String> = merged
            .get("sources")
            .and_then(Value::as_array)
            .map(|sources| sources.iter().filter_map(Value::as_str).map(String::from).collect())
            .unwrap_or_default();
        deep_merge(&mut merged, &normalize_user(user));

        let mut ignored = Vec::new();
        let mut config: Self = serde_ignored::deserialize(Value::Table(merged), |path| {
            ignored.push(path.to_string());
        })?;

        for field in ignored {
            log!("warning"; "unknown field `assets.{}` ignored", field);
        }

        config.merge_sources(&builtin);
        Ok(config)
    }

    /// Union of user sources and built-in sources: user items first, then any
    /// built-in one not already present.
    fn merge_sources(&mut self, ours: &[String]) {
        let theirs = std::mem::take(&mut self.sources);
        let mut merged: Vec<String> = Vec::with_capacity(theirs.len() + ours.len());
        for source in theirs.into_iter().chain(ours.iter().cloned()) {
            if !merged.contains(&source) {
                merged.push(source);
            }
        }
        self.sources = merged;
    }

    /// Whether a CDN origin is configured (blank urls count as none).
    pub fn has_cdn(&self) -> bool {
        self.cdn.url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

/// Accept `sources = "dir"` as shorthand for a one-item list.
fn normalize_user(user: &Table) -> Table {
    let mut user = user.clone();
    if let Some(Value::String(single)) = user.get("sources") {
        let single = single.clone();
        user.insert("sources".into(), Value::Array(vec![Value::String(single)]));
    }
    user
}
