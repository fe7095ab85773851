//! Asset resolution errors.

use std::path::PathBuf;

use thiserror::Error;

/// `with` value of [`AssetError::InvalidCombination`] for external references.
pub const EXTERNAL: &str = "external";

/// Failures while resolving a reference. All of them abort the build.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The reference matched no file in any configured source directory.
    #[error("asset not found: `{original}` (parsed as `{parsed}`)")]
    NotFound { original: String, parsed: String },

    /// Two mutually exclusive arguments were given together, or an argument
    /// that needs a local file was used on an external url (`with` is `external`).
    #[error("cannot use {arg} w/ {with}")]
    InvalidCombination { arg: &'static str, with: &'static str },

    #[error("failed to read asset source `{}`", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile `{logical_path}`")]
    Compile {
        logical_path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write asset output `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
