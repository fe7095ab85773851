//! The asset value handed to templates.

use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose};

use super::AssetKind;
use crate::digest::{self, ContentHash};

/// A resolvable static file, or an external url dressed up as one.
///
/// `digest_path` is a pure function of `logical_path` and the content bytes,
/// so identical bytes always land on the identical output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub kind: AssetKind,
    /// Identity name, e.g. `img/logo.png`.
    pub logical_path: String,
    /// Source directory the file was found in (`None` for external urls).
    pub load_path: Option<PathBuf>,
    /// Absolute source file (`None` for external urls).
    pub filename: Option<PathBuf>,
    /// MIME type of `source`.
    pub content_type: String,
    /// Compiled content (empty for external urls).
    pub source: Vec<u8>,
    /// Hash of the uncompiled source file, used to detect changes between builds.
    pub source_digest: ContentHash,
    /// Content hash of `source` (of the url string for external assets).
    pub digest: ContentHash,
    /// `logical_path` with the digest token injected.
    pub digest_path: String,
    /// Subresource integrity value (`None` for external urls).
    pub integrity: Option<String>,
    /// External url, or `file://` uri of the source.
    pub uri: String,
}

impl Asset {
    /// Asset backed by a local file.
    pub fn internal(
        logical_path: impl Into<String>,
        load_path: PathBuf,
        filename: PathBuf,
        content_type: impl Into<String>,
        source: Vec<u8>,
        source_digest: ContentHash,
    ) -> Self {
        let logical_path = logical_path.into();
        let digest = ContentHash::of(&source);
        Self {
            kind: AssetKind::Internal,
            digest_path: digest::digest_path(&logical_path, digest),
            integrity: Some(digest::integrity(&source)),
            uri: format!("file://{}", filename.display()),
            logical_path,
            load_path: Some(load_path),
            filename: Some(filename),
            content_type: content_type.into(),
            source,
            source_digest,
            digest,
        }
    }

    /// Pseudo-asset for an external url, keyed by a hash of the url itself.
    pub fn external(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        let url = url.into();
        let name = url
            .split(['?', '#'])
            .next()
            .unwrap_or(&url)
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let digest = ContentHash::of(&url);
        Self {
            kind: AssetKind::External,
            digest_path: digest::digest_path(&name, digest),
            logical_path: name,
            load_path: None,
            filename: None,
            content_type: content_type.into(),
            source: Vec::new(),
            source_digest: digest,
            digest,
            integrity: None,
            uri: url,
        }
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.kind == AssetKind::External
    }

    /// Path under the asset destination: digested when `digest` is on.
    pub fn public_path(&self, digest: bool) -> &str {
        if digest {
            &self.digest_path
        } else {
            &self.logical_path
        }
    }

    /// Base64 `data:` uri of the compiled content.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            general_purpose::STANDARD.encode(&self.source)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> Asset {
        Asset::internal(
            "img.png",
            PathBuf::from("/site/assets/img"),
            PathBuf::from("/site/assets/img/img.png"),
            "image/png",
            bytes.to_vec(),
            ContentHash::of(bytes),
        )
    }

    #[test]
    fn test_internal_is_content_addressed() {
        let a = png(b"same");
        let b = png(b"same");
        let c = png(b"changed");
        assert_eq!(a.digest_path, b.digest_path);
        assert_ne!(a.digest_path, c.digest_path);
        assert!(a.digest_path.starts_with("img-"));
        assert!(a.digest_path.ends_with(".png"));
        assert!(a.integrity.as_deref().unwrap().starts_with("sha256-"));
        assert_eq!(a.uri, "file:///site/assets/img/img.png");
    }

    #[test]
    fn test_external_keyed_by_url() {
        let asset = Asset::external("https://example.com/a.jpg?size=2", "image/jpeg");
        assert!(asset.is_external());
        assert_eq!(asset.logical_path, "a.jpg");
        assert_eq!(asset.digest, ContentHash::of("https://example.com/a.jpg?size=2"));
        assert!(asset.source.is_empty());
        assert!(asset.integrity.is_none());
        assert_eq!(asset.uri, "https://example.com/a.jpg?size=2");
    }

    #[test]
    fn test_public_path() {
        let asset = png(b"x");
        assert_eq!(asset.public_path(false), "img.png");
        assert_eq!(asset.public_path(true), asset.digest_path);
    }

    #[test]
    fn test_data_uri() {
        let asset = png(b"hi");
        assert_eq!(asset.data_uri(), "data:image/png;base64,aGk=");
    }
}
