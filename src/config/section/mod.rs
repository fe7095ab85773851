//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tola.toml`:
//!
//! | Module     | TOML Section   | Purpose                                |
//! |------------|----------------|----------------------------------------|
//! | `assets`   | `[assets]`     | Digests, cdn, sources, caching         |
//! | `site`     | `[site]`       | Baseurl, source and output directories |

pub mod assets;
pub mod site;

pub use assets::{AssetsConfig, CachingConfig, CdnConfig, DEFAULT_SOURCES};
pub use site::SiteSectionConfig;
