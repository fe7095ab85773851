//! MIME type detection utilities.
//!
//! Content types here describe asset bodies, not HTTP headers, so they carry
//! no charset parameter.

use std::path::Path;

use thiserror::Error;

/// Common MIME type constants.
pub mod types {
    // Text
    pub const HTML: &str = "text/html";
    pub const PLAIN: &str = "text/plain";
    pub const CSS: &str = "text/css";
    pub const SCSS: &str = "text/x-scss";
    pub const SASS: &str = "text/x-sass";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const TYPESCRIPT: &str = "application/typescript";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const SOURCE_MAP: &str = "application/source-map";

    // Binary
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const WASM: &str = "application/wasm";
    pub const PDF: &str = "application/pdf";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";
    pub const AVIF: &str = "image/avif";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";
    pub const BMP: &str = "image/bmp";
    pub const TIFF: &str = "image/tiff";

    // Audio
    pub const MP3: &str = "audio/mpeg";
    pub const WAV: &str = "audio/wav";
    pub const OGG_AUDIO: &str = "audio/ogg";

    // Video
    pub const MP4: &str = "video/mp4";
    pub const WEBM: &str = "video/webm";
    pub const OGG_VIDEO: &str = "video/ogg";

    // Fonts
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
    pub const TTF: &str = "font/ttf";
    pub const OTF: &str = "font/otf";
    pub const EOT: &str = "application/vnd.ms-fontobject";
}

/// Guess MIME type from a path's extension, falling back to octet-stream.
pub fn from_path(path: &Path) -> &'static str {
    lookup(path.extension().and_then(|e| e.to_str())).unwrap_or(types::OCTET_STREAM)
}

/// Guess MIME type from a url or file name, ignoring query and fragment.
///
/// Returns `None` when the extension is missing or unknown.
pub fn from_url(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;
    lookup(Some(ext))
}

/// Known extension → MIME table.
pub fn lookup(ext: Option<&str>) -> Option<&'static str> {
    let ext = ext?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        // Web / Text
        "html" | "htm" => types::HTML,
        "css" => types::CSS,
        "scss" => types::SCSS,
        "sass" => types::SASS,
        "js" | "mjs" | "cjs" => types::JAVASCRIPT,
        "ts" | "mts" | "cts" => types::TYPESCRIPT,
        "json" => types::JSON,
        "xml" => types::XML,
        "map" => types::SOURCE_MAP,
        "txt" => types::PLAIN,

        // Images
        "svg" => types::SVG,
        "png" => types::PNG,
        "jpg" | "jpeg" => types::JPEG,
        "gif" => types::GIF,
        "webp" => types::WEBP,
        "avif" => types::AVIF,
        "ico" => types::ICO,
        "bmp" => types::BMP,
        "tif" | "tiff" => types::TIFF,

        // Audio
        "mp3" => types::MP3,
        "wav" => types::WAV,
        "ogg" | "oga" => types::OGG_AUDIO,

        // Video
        "mp4" | "m4v" => types::MP4,
        "webm" => types::WEBM,
        "ogv" => types::OGG_VIDEO,

        // Fonts
        "woff" => types::WOFF,
        "woff2" => types::WOFF2,
        "ttf" => types::TTF,
        "otf" => types::OTF,
        "eot" => types::EOT,

        // Binary
        "wasm" => types::WASM,
        "pdf" => types::PDF,

        _ => return None,
    };
    Some(mime)
}

/// Preferred file extension for a content type.
pub fn extension_for(mime: &str) -> Option<&'static str> {
    let ext = match mime {
        types::HTML => "html",
        types::CSS => "css",
        types::JAVASCRIPT => "js",
        types::JSON => "json",
        types::SOURCE_MAP => "map",
        types::SVG => "svg",
        types::PNG => "png",
        types::JPEG => "jpg",
        types::GIF => "gif",
        types::WEBP => "webp",
        types::AVIF => "avif",
        _ => return None,
    };
    Some(ext)
}

/// Check if the MIME type represents an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Check if the MIME type is a stylesheet.
pub fn is_stylesheet(mime: &str) -> bool {
    mime == types::CSS
}

/// Check if the MIME type is a script.
pub fn is_script(mime: &str) -> bool {
    mime == types::JAVASCRIPT
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} is invalid.")]
pub struct InvalidContentType(pub String);

/// Drop the structured-syntax prefix of a subtype: `image/svg+xml` → `image/xml`.
pub fn strip_secondary_content_type(mime: &str) -> Result<String, InvalidContentType> {
    let mut parts = mime.split('/');
    let (Some(kind), Some(subtype), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(InvalidContentType(mime.to_string()));
    };
    let subtype = subtype.rsplit('+').next().unwrap_or(subtype);
    Ok(format!("{kind}/{subtype}"))
}
