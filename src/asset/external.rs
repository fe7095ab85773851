//! External url detection.

use std::sync::LazyLock;

use regex::Regex;

use super::Asset;
use crate::log;
use crate::tag::TagArgs;
use crate::utils::mime;

static EXTERNAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?:)?//").expect("invalid external url regex"));

/// Whether a reference is an absolute `http(s)://` or scheme-relative url.
pub fn is_external_url(reference: &str) -> bool {
    EXTERNAL.is_match(reference.trim_start())
}

/// An explicit `external` argument wins over url detection.
pub fn is_external(args: &TagArgs) -> bool {
    args.external
        .unwrap_or_else(|| is_external_url(&args.reference))
}

/// Pseudo-asset for an external reference.
///
/// The content type comes from an explicit override, then the url extension,
/// and falls back to `image/jpeg`.
pub fn external_asset(args: &TagArgs) -> Asset {
    let url = args.reference.trim();
    let content_type = match args.content_type.as_deref() {
        Some(content_type) => content_type,
        None => mime::from_url(url).unwrap_or_else(|| {
            log!("warning"; "no content type for {}, assuming {}", url, mime::types::JPEG);
            mime::types::JPEG
        }),
    };
    Asset::external(url, content_type)
}
