//! Source lookup across the configured search directories.

use std::path::PathBuf;

use crate::config::SiteConfig;

/// Drop a leading source directory from a reference, if present.
///
/// Lets templates reference `assets/img/logo.png` and `logo.png` alike. The
/// first source directory that prefixes the reference is stripped.
pub fn strip_paths(config: &SiteConfig, reference: &str) -> String {
    let reference = reference.trim().trim_start_matches('/');
    config
        .assets
        .sources
        .iter()
        .map(|source| source.trim_matches('/'))
        .filter(|source| !source.is_empty())
        .find_map(|source| reference.strip_prefix(source)?.strip_prefix('/'))
        .unwrap_or(reference)
        .to_string()
}

/// A file found in one of the search directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Search directory that matched.
    pub load_path: PathBuf,
    /// Absolute file path.
    pub filename: PathBuf,
}

/// Search `sources` in order; the first directory holding the reference wins.
///
/// Any existing entry matches, so a directory named like the reference is
/// found here and fails later when read.
pub fn find_source(config: &SiteConfig, logical_path: &str) -> Option<SourceFile> {
    if logical_path.is_empty() || logical_path.split('/').any(|part| part == "..") {
        return None;
    }

    let source_dir = config.source_dir();
    config.assets.sources.iter().find_map(|source| {
        let load_path = source_dir.join(source.trim_matches('/'));
        let filename = load_path.join(logical_path);
        filename.exists().then_some(SourceFile { load_path, filename })
    })
}
