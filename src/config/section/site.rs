//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! baseurl = "/blog"         # Path prefix the site is served under
//! source = "."              # Site source directory (relative to the config file)
//! destination = "public"    # Build output directory (relative to the config file)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Path prefix for subdirectory deployment.
    pub baseurl: Option<String>,
    /// Site source directory.
    pub source: PathBuf,
    /// Build output directory.
    pub destination: PathBuf,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            baseurl: None,
            source: ".".into(),
            destination: "public".into(),
        }
    }
}
