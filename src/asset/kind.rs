//! Asset kind definitions.

/// Where an asset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// File found in a configured source directory.
    Internal,
    /// Absolute url; never fetched.
    External,
}
