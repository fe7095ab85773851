//! Content digests for cache busting and subresource integrity.
//!
//! Output names are content addressed: `img.png` with content hash `ab12..`
//! becomes `img-ab12...png`. The same bytes under the same logical path always
//! give the same digest path, across builds and machines.

use base64::{Engine as _, engine::general_purpose};
use sha2::{Digest as _, Sha256};

/// Hex characters of the content hash kept in digest paths (128 bits).
pub const TOKEN_LEN: usize = 32;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash a byte slice.
    pub fn of(data: impl AsRef<[u8]>) -> Self {
        Self(*blake3::hash(data.as_ref()).as_bytes())
    }

    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// URL-safe token injected into digest paths.
    pub fn token(self) -> String {
        self.to_hex()[..TOKEN_LEN].to_string()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Inject a digest token before the file extension of a logical path.
///
/// `css/app.min.css` → `css/app.min-<token>.css`, `LICENSE` → `LICENSE-<token>`.
pub fn digest_path(logical_path: &str, hash: ContentHash) -> String {
    let token = hash.token();
    let (dir, name) = match logical_path.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, logical_path),
    };

    let name = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{token}.{ext}"),
        _ => format!("{name}-{token}"),
    };

    match dir {
        Some(dir) => format!("{dir}/{name}"),
        None => name,
    }
}

/// Subresource integrity value (`sha256-<base64>`) for content.
pub fn integrity(data: impl AsRef<[u8]>) -> String {
    let digest = Sha256::digest(data.as_ref());
    format!("sha256-{}", general_purpose::STANDARD.encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_display() {
        let hash = ContentHash::new([0xab; 32]);
        assert_eq!(format!("{}", hash), "abababababababab");
        assert_eq!(hash.token().len(), TOKEN_LEN);
    }

    #[test]
    fn test_same_bytes_same_hash() {
        assert_eq!(ContentHash::of("body {}"), ContentHash::of(b"body {}".to_vec()));
        assert_ne!(ContentHash::of("body {}"), ContentHash::of("body{}"));
    }

    #[test]
    fn test_digest_path() {
        let hash = ContentHash::new([0x12; 32]);
        let token = hash.token();
        assert_eq!(digest_path("img.png", hash), format!("img-{token}.png"));
        assert_eq!(
            digest_path("css/app.min.css", hash),
            format!("css/app.min-{token}.css")
        );
        assert_eq!(digest_path("LICENSE", hash), format!("LICENSE-{token}"));
        assert_eq!(digest_path(".htaccess", hash), format!(".htaccess-{token}"));
    }

    #[test]
    fn test_digest_path_is_content_addressed() {
        let a = digest_path("img.png", ContentHash::of("same"));
        let b = digest_path("img.png", ContentHash::of("same"));
        let c = digest_path("img.png", ContentHash::of("other"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_integrity() {
        // echo -n "" | openssl dgst -sha256 -binary | base64
        assert_eq!(
            integrity(""),
            "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }
}
