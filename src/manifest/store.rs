//! Shared, persisted manifest store.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

use super::index::{KeepKey, ManifestData, ManifestEntry};
use crate::digest::ContentHash;
use crate::{debug, log};

/// Manifest persistence errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error on manifest `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("manifest serialization error")]
    Json(#[from] serde_json::Error),
}

/// Logical path → digest path mapping shared by every resolution of a build.
///
/// `register` and `lookup` serialize on one lock, so concurrent resolutions
/// never lose an update. The file is written once, by [`persist`](Self::persist).
#[derive(Debug)]
pub struct ManifestStore {
    path: PathBuf,
    data: Mutex<ManifestData>,
}

impl ManifestStore {
    /// Empty store that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: Mutex::new(ManifestData::default()),
        }
    }

    /// Load the manifest written by the previous build.
    ///
    /// A missing file starts an empty manifest; so does a malformed one, with a
    /// warning.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::new(path)),
            Err(err) => return Err(ManifestError::Io(path, err)),
        };

        let data = match serde_json::from_str::<ManifestData>(&content) {
            Ok(data) => data,
            Err(err) => {
                log!("warning"; "ignoring malformed manifest {}: {}", path.display(), err);
                ManifestData::default()
            }
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Compute the content digest used for digest paths.
    pub fn digest(bytes: impl AsRef<[u8]>) -> ContentHash {
        ContentHash::of(bytes)
    }

    /// Record an entry. Last write wins; the previous entry is returned.
    pub fn register(&self, logical_path: &str, entry: ManifestEntry) -> Option<ManifestEntry> {
        let digest_path = entry.digest_path.clone();
        let previous = self.data.lock().assets.insert(logical_path.to_string(), entry);
        if let Some(previous) = &previous
            && previous.digest_path != digest_path
        {
            debug!(
                "manifest"; "{} moved from {} to {}",
                logical_path, previous.digest_path, digest_path
            );
        }
        previous
    }

    /// Look up the entry for a logical path.
    pub fn lookup(&self, logical_path: &str) -> Option<ManifestEntry> {
        self.data.lock().assets.get(logical_path).cloned()
    }

    /// Drop every entry whose logical path fails `keep`; returns the dropped paths.
    pub fn retain(&self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut dropped = Vec::new();
        self.data.lock().assets.retain(|logical_path, _| {
            let kept = keep(logical_path);
            if !kept {
                dropped.push(logical_path.clone());
            }
            kept
        });
        dropped
    }

    pub fn len(&self) -> usize {
        self.data.lock().assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current manifest data.
    pub fn snapshot(&self) -> ManifestData {
        self.data.lock().clone()
    }

    /// Manifest file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Files and directories (relative to the asset destination) that cleanup must keep.
    ///
    /// Contains every recorded path whose category is a keep key, gzip siblings
    /// only when `gzip` is enabled, and every ancestor directory of those paths.
    pub fn live_files(&self, gzip: bool) -> BTreeSet<PathBuf> {
        let data = self.data.lock();
        let mut live = BTreeSet::new();

        for entry in data.assets.values() {
            for key in &data.keep_keys {
                if *key == KeepKey::Gzip && !gzip {
                    continue;
                }
                let Some(path) = entry.path_for(*key) else {
                    continue;
                };

                let path = PathBuf::from(path.trim_start_matches('/'));
                let mut ancestor = path.parent();
                while let Some(dir) = ancestor {
                    if dir.as_os_str().is_empty() {
                        break;
                    }
                    live.insert(dir.to_path_buf());
                    ancestor = dir.parent();
                }
                live.insert(path);
            }
        }

        live
    }

    /// Write the manifest atomically (temp sibling + rename).
    pub fn persist(&self) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(&*self.data.lock())?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| ManifestError::Io(parent.to_path_buf(), err))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|err| ManifestError::Io(tmp.clone(), err))?;
        fs::rename(&tmp, &self.path).map_err(|err| ManifestError::Io(self.path.clone(), err))?;
        Ok(())
    }
}
