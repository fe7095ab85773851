//! Removal of stale build output.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Delete everything under `root` not listed in `keep` (paths relative to `root`).
///
/// Directories listed in `keep` are descended into and pruned; directories not
/// listed are removed whole. Returns the removed paths, relative to `root`.
pub fn prune_stale(root: &Path, keep: &BTreeSet<PathBuf>) -> std::io::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    if !root.exists() {
        return Ok(removed);
    }

    prune_subtree(root, Path::new(""), keep, &mut removed)?;
    removed.sort();
    Ok(removed)
}

fn prune_subtree(
    root: &Path,
    relative: &Path,
    keep: &BTreeSet<PathBuf>,
    removed: &mut Vec<PathBuf>,
) -> std::io::Result<()> {
    let current_path = if relative.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    };

    let entries = match fs::read_dir(&current_path) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    for entry in entries {
        let entry = entry?;
        let child_relative = if relative.as_os_str().is_empty() {
            PathBuf::from(entry.file_name())
        } else {
            relative.join(entry.file_name())
        };

        let file_type = entry.file_type()?;
        if keep.contains(&child_relative) {
            if file_type.is_dir() {
                prune_subtree(root, &child_relative, keep, removed)?;
            }
            continue;
        }

        if file_type.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
        removed.push(child_relative);
    }

    Ok(())
}
