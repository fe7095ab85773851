//! Public url and output path construction.
//!
//! A url is composed from up to four segments, each included only when its
//! guard holds:
//!
//! | Segment          | Included when                                            |
//! |------------------|----------------------------------------------------------|
//! | CDN origin       | production build and `cdn.url` set                       |
//! | site baseurl     | development, no CDN, or `cdn.baseurl = true`             |
//! | asset destination| development, no CDN, or `cdn.destination = true`         |
//! | asset path       | a non-empty path was supplied                            |
//!
//! CDN urls are absolute; everything else is root-relative.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SiteConfig;

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?:)?//").expect("invalid scheme regex"));

/// Strip one leading and one trailing slash. Empty input yields `None`.
///
/// `"/a/b/"` → `"a/b"`, `"/"` → `None`.
pub fn strip_slashes(path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    (!path.is_empty()).then(|| path.to_string())
}

/// Rewrite `http://` and scheme-relative `//` prefixes to `https://`.
///
/// Empty input yields `None`; strings without a scheme prefix are returned as-is.
pub fn make_https(url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    Some(SCHEME.replace(url, "https://").into_owned())
}

/// Build the public url for an asset path (usually its digest path).
///
/// Always returns a well-formed value: with nothing to join, the result is `/`.
pub fn build_url(config: &SiteConfig, user_path: Option<&str>) -> String {
    let assets = &config.assets;
    let production = config.mode.is_production();

    let cdn = if production && assets.has_cdn() {
        make_https(assets.cdn.url.as_deref().map(str::trim))
            .and_then(|url| strip_slashes(Some(&url)))
    } else {
        None
    };
    let base = strip_slashes(config.site.baseurl.as_deref());
    let dest = strip_slashes(Some(&assets.destination));
    let cdn_active = cdn.is_some();

    let mut segments: Vec<String> = Vec::with_capacity(4);
    if cdn_active {
        segments.extend(cdn);
    }
    if !cdn_active || assets.cdn.baseurl {
        segments.extend(base);
    }
    if !cdn_active || assets.cdn.destination {
        segments.extend(dest);
    }
    segments.extend(
        user_path
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .map(String::from),
    );

    let joined = segments.join("/");
    if cdn_active {
        joined
    } else {
        format!("/{joined}")
    }
}

/// Land paths inside the asset destination of the site output.
///
/// Parent and root components in `paths` are dropped so nothing escapes it.
pub fn in_destination_dir(config: &SiteConfig, paths: &[&str]) -> PathBuf {
    let mut out = config.output_dir();
    if let Some(dest) = strip_slashes(Some(&config.assets.destination)) {
        push_sanitized(&mut out, &dest);
    }
    for path in paths {
        push_sanitized(&mut out, path);
    }
    out
}

/// Land paths inside the compiler cache directory.
pub fn in_cache_dir(config: &SiteConfig, paths: &[&str]) -> PathBuf {
    let mut out = config.root.clone();
    if let Some(cache) = strip_slashes(Some(&config.assets.caching.path)) {
        push_sanitized(&mut out, &cache);
    }
    for path in paths {
        push_sanitized(&mut out, path);
    }
    out
}

fn push_sanitized(base: &mut PathBuf, path: &str) {
    for component in Path::new(path).components() {
        if let Component::Normal(part) = component {
            base.push(part);
        }
    }
}
