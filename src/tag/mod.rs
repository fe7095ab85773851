//! Data consumed from the template-tag surface.
//!
//! Parsing `{% asset %}` markup and emitting HTML belong to the template
//! layer. This module holds the parsed arguments and the render outcome.

mod args;
mod handlers;

use std::collections::BTreeMap;

pub use args::TagArgs;
pub use handlers::run_handlers;

use crate::asset::Asset;

/// Result of rendering one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// `@path`: just the public url.
    Url(String),
    /// `@data-url`: a base64 data uri.
    DataUri(String),
    /// Full tag: the asset plus its final attribute set.
    Tag {
        asset: Box<Asset>,
        attrs: BTreeMap<String, String>,
    },
}
