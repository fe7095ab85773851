//! Site configuration management for `tola.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── assets     # [assets]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── merge      # deep_merge
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The `[assets]` table is never deserialized directly: it is deep-merged onto
//! the defaults of the active [`BuildMode`] first, see [`AssetsConfig::resolve`].

pub mod section;
pub mod types;

pub use section::{AssetsConfig, CachingConfig, CdnConfig, DEFAULT_SOURCES, SiteSectionConfig};
pub use types::{ConfigError, deep_merge};

use crate::core::BuildMode;
use crate::log;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use toml::Table;

/// Default config file name.
pub const CONFIG_FILE: &str = "tola.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Raw file layout before the `[assets]` merge.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    site: SiteSectionConfig,
    assets: Table,
}

/// Root configuration: the site section plus resolved asset settings.
///
/// Constructed once per build and not mutated afterwards.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Project root directory - parent of config file
    pub root: PathBuf,

    /// Mode the configuration was resolved for
    pub mode: BuildMode,

    /// Site settings (baseurl, directories)
    pub site: SiteSectionConfig,

    /// Resolved asset settings
    pub assets: AssetsConfig,
}

impl SiteConfig {
    /// Configuration with built-in defaults rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, mode: BuildMode) -> Self {
        Self {
            root: root.into(),
            mode,
            site: SiteSectionConfig::default(),
            assets: AssetsConfig::defaults(mode),
        }
    }

    /// Load configuration from a file; the project root is its parent directory.
    pub fn load(path: &Path, mode: BuildMode) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::parse(&content, root, mode)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str, root: PathBuf, mode: BuildMode) -> Result<Self, ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let raw: RawConfig = serde_ignored::deserialize(deserializer, |path| {
            ignored.push(path.to_string());
        })?;

        for field in ignored {
            log!("warning"; "unknown field `{}` ignored", field);
        }

        Ok(Self {
            root,
            mode,
            site: raw.site,
            assets: AssetsConfig::resolve(mode, &raw.assets)?,
        })
    }

    /// Absolute site source directory.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.site.source)
    }

    /// Absolute site output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.site.destination)
    }
}
