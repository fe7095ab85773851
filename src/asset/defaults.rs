//! Default HTML attributes per content type.
//!
//! Applied after resolution and again after compilation, since compiling can
//! change the content type and with it the matching set.

use std::collections::BTreeMap;

use super::Asset;
use crate::config::SiteConfig;
use crate::url;
use crate::utils::mime;

type Attrs = BTreeMap<String, String>;

/// Inputs shared by every default set.
#[derive(Debug, Clone, Copy)]
pub struct DefaultContext<'a> {
    pub config: &'a SiteConfig,
    /// Caller asked for inline embedding; no url attribute is set.
    pub inline: bool,
}

struct DefaultSet {
    name: &'static str,
    matches: fn(&str) -> bool,
    apply: fn(&mut Attrs, &Asset, &DefaultContext<'_>),
}

/// Applied in order; every matching set runs.
const DEFAULT_SETS: &[DefaultSet] = &[
    DefaultSet {
        name: "img",
        matches: mime::is_image,
        apply: |attrs, asset, cx| {
            set_url(attrs, "src", asset, cx);
            set_integrity(attrs, asset, cx);
        },
    },
    DefaultSet {
        name: "css",
        matches: mime::is_stylesheet,
        apply: |attrs, asset, cx| {
            set_url(attrs, "href", asset, cx);
            attrs.entry("rel".into()).or_insert_with(|| "stylesheet".into());
            set_integrity(attrs, asset, cx);
        },
    },
    DefaultSet {
        name: "js",
        matches: mime::is_script,
        apply: |attrs, asset, cx| {
            set_url(attrs, "src", asset, cx);
            set_integrity(attrs, asset, cx);
        },
    },
];

/// Fill in defaults for `asset`; returns the names of the sets that ran.
pub fn apply_defaults(
    attrs: &mut Attrs,
    asset: &Asset,
    cx: &DefaultContext<'_>,
) -> Vec<&'static str> {
    DEFAULT_SETS
        .iter()
        .filter(|set| (set.matches)(&asset.content_type))
        .map(|set| {
            (set.apply)(attrs, asset, cx);
            set.name
        })
        .collect()
}

/// Public url of an asset: the reference itself for externals.
pub fn asset_url(asset: &Asset, config: &SiteConfig) -> String {
    if asset.is_external() {
        asset.uri.clone()
    } else {
        url::build_url(config, Some(asset.public_path(config.assets.digest)))
    }
}

fn set_url(attrs: &mut Attrs, key: &str, asset: &Asset, cx: &DefaultContext<'_>) {
    if cx.inline {
        attrs.remove(key);
        return;
    }
    attrs.insert(key.to_string(), asset_url(asset, cx.config));
}

fn set_integrity(attrs: &mut Attrs, asset: &Asset, cx: &DefaultContext<'_>) {
    if !cx.config.assets.subresource_integrity || asset.is_external() {
        return;
    }
    let Some(integrity) = &asset.integrity else {
        return;
    };
    attrs.insert("integrity".into(), integrity.clone());
    attrs
        .entry("crossorigin".into())
        .or_insert_with(|| "anonymous".into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildMode;
    use crate::digest::ContentHash;
    use std::path::PathBuf;

    fn asset(name: &str, content_type: &str) -> Asset {
        Asset::internal(
            name,
            PathBuf::from("/site/img"),
            PathBuf::from("/site/img").join(name),
            content_type,
            b"bytes".to_vec(),
            ContentHash::of(b"bytes"),
        )
    }

    fn sri_config() -> SiteConfig {
        let mut config = SiteConfig::new("/site", BuildMode::DEVELOPMENT);
        config.assets.subresource_integrity = true;
        config
    }

    #[test]
    fn test_image_defaults() {
        let config = sri_config();
        let cx = DefaultContext { config: &config, inline: false };
        let mut attrs = Attrs::new();
        let ran = apply_defaults(&mut attrs, &asset("logo.png", "image/png"), &cx);

        assert_eq!(ran, vec!["img"]);
        assert_eq!(attrs["src"], "/assets/logo.png");
        assert!(attrs["integrity"].starts_with("sha256-"));
        assert_eq!(attrs["crossorigin"], "anonymous");
    }

    #[test]
    fn test_caller_crossorigin_kept() {
        let config = sri_config();
        let cx = DefaultContext { config: &config, inline: false };
        let mut attrs = Attrs::from([("crossorigin".to_string(), "use-credentials".to_string())]);
        apply_defaults(&mut attrs, &asset("logo.png", "image/png"), &cx);
        assert_eq!(attrs["crossorigin"], "use-credentials");
    }

    #[test]
    fn test_inline_skips_src() {
        let config = sri_config();
        let cx = DefaultContext { config: &config, inline: true };
        let mut attrs = Attrs::new();
        apply_defaults(&mut attrs, &asset("logo.png", "image/png"), &cx);
        assert!(!attrs.contains_key("src"));
        assert!(attrs.contains_key("integrity"));
    }

    #[test]
    fn test_no_integrity_without_sri() {
        let config = SiteConfig::new("/site", BuildMode::DEVELOPMENT);
        let cx = DefaultContext { config: &config, inline: false };
        let mut attrs = Attrs::new();
        apply_defaults(&mut attrs, &asset("logo.png", "image/png"), &cx);
        assert!(!attrs.contains_key("integrity"));
        assert!(!attrs.contains_key("crossorigin"));
    }

    #[test]
    fn test_external_uses_uri_without_integrity() {
        let config = sri_config();
        let cx = DefaultContext { config: &config, inline: false };
        let external = Asset::external("https://example.com/a.jpg", "image/jpeg");
        let mut attrs = Attrs::new();
        apply_defaults(&mut attrs, &external, &cx);
        assert_eq!(attrs["src"], "https://example.com/a.jpg");
        assert!(!attrs.contains_key("integrity"));
        assert!(!attrs.contains_key("crossorigin"));
    }

    #[test]
    fn test_stylesheet_and_script_defaults() {
        let mut config = sri_config();
        config.assets.digest = true;
        let cx = DefaultContext { config: &config, inline: false };

        let css = asset("app.css", "text/css");
        let mut attrs = Attrs::new();
        assert_eq!(apply_defaults(&mut attrs, &css, &cx), vec!["css"]);
        assert_eq!(attrs["href"], format!("/assets/{}", css.digest_path));
        assert_eq!(attrs["rel"], "stylesheet");

        let mut attrs = Attrs::new();
        let js = asset("app.js", "application/javascript");
        assert_eq!(apply_defaults(&mut attrs, &js, &cx), vec!["js"]);
        assert!(attrs["src"].starts_with("/assets/app-"));
    }

    #[test]
    fn test_unmatched_type_untouched() {
        let config = sri_config();
        let cx = DefaultContext { config: &config, inline: false };
        let mut attrs = Attrs::new();
        assert!(apply_defaults(&mut attrs, &asset("a.woff2", "font/woff2"), &cx).is_empty());
        assert!(attrs.is_empty());
    }
}
