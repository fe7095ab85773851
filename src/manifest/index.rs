//! Manifest data structures.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Categories of generated files recorded per manifest entry.
///
/// Cleanup keeps a file only if the manifest lists its category in
/// [`ManifestData::keep_keys`] and the entry carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeepKey {
    /// The primary compiled artifact.
    Assets,
    /// The gzip sibling of the primary artifact.
    Gzip,
}

/// Information about one compiled asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Output path relative to the asset destination (digested when enabled).
    pub digest_path: String,
    /// Gzip sibling path, when one was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gzip_path: Option<String>,
    /// Subresource integrity value of the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    /// Content type of the output.
    #[serde(default)]
    pub content_type: String,
    /// Generated categories present for this entry.
    #[serde(default = "default_entry_keep")]
    pub keep: BTreeSet<KeepKey>,
}

impl ManifestEntry {
    /// Entry for a primary artifact.
    pub fn new(digest_path: impl Into<String>, integrity: Option<String>) -> Self {
        Self {
            digest_path: digest_path.into(),
            gzip_path: None,
            integrity,
            content_type: String::new(),
            keep: default_entry_keep(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Record a gzip sibling next to the primary artifact.
    pub fn with_gzip(mut self, gzip_path: impl Into<String>) -> Self {
        self.gzip_path = Some(gzip_path.into());
        self.keep.insert(KeepKey::Gzip);
        self
    }

    /// Path recorded for a keep category, if the entry has one.
    pub fn path_for(&self, key: KeepKey) -> Option<&str> {
        if !self.keep.contains(&key) {
            return None;
        }
        match key {
            KeepKey::Assets => Some(&self.digest_path),
            KeepKey::Gzip => self.gzip_path.as_deref(),
        }
    }
}

/// Persisted manifest: logical path → compiled output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestData {
    /// Categories considered live by cleanup, in order.
    #[serde(default = "default_keep_keys")]
    pub keep_keys: Vec<KeepKey>,
    /// Logical path → entry
    #[serde(default)]
    pub assets: BTreeMap<String, ManifestEntry>,
}

impl Default for ManifestData {
    fn default() -> Self {
        Self {
            keep_keys: default_keep_keys(),
            assets: BTreeMap::new(),
        }
    }
}

fn default_entry_keep() -> BTreeSet<KeepKey> {
    BTreeSet::from([KeepKey::Assets])
}

fn default_keep_keys() -> Vec<KeepKey> {
    vec![KeepKey::Assets, KeepKey::Gzip]
}
