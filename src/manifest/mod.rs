//! Asset manifest: which digest path each logical asset compiled to.
//!
//! Loaded at build start, appended to while assets compile, persisted once at
//! build end. Cleanup removes every output file the manifest no longer names.

mod clean;
mod index;
mod store;

pub use clean::prune_stale;
pub use index::{KeepKey, ManifestData, ManifestEntry};
pub use store::{ManifestError, ManifestStore};
