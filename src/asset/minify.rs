//! Minifying compiler for JS and CSS assets.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Results are cached on
//! disk by content hash when a cache directory is configured.

use std::fs;
use std::path::PathBuf;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::{CompileRequest, Compiled, Compiler};
use crate::debug;
use crate::digest::ContentHash;
use crate::utils::mime;

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = oxc::minifier::Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

/// Compiler that minifies scripts and stylesheets when compression is on.
///
/// Files already named `*.min.*` and sources that fail to parse pass through.
#[derive(Debug, Clone, Default)]
pub struct Minifier {
    cache_dir: Option<PathBuf>,
}

impl Minifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache minified output under `dir`.
    pub fn with_cache(dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: Some(dir.into()),
        }
    }

    fn cache_path(&self, req: &CompileRequest<'_>) -> Option<PathBuf> {
        let dir = self.cache_dir.as_ref()?;
        let ext = mime::extension_for(req.content_type)?;
        Some(dir.join(format!("{}.{ext}", ContentHash::of(req.bytes).to_hex())))
    }

    fn minify(req: &CompileRequest<'_>) -> Option<String> {
        let source = std::str::from_utf8(req.bytes).ok()?;
        if mime::is_script(req.content_type) {
            minify_js(source)
        } else if mime::is_stylesheet(req.content_type) {
            minify_css(source)
        } else {
            None
        }
    }
}

impl Compiler for Minifier {
    fn compile(&self, req: &CompileRequest<'_>) -> anyhow::Result<Compiled> {
        let minifiable = mime::is_script(req.content_type) || mime::is_stylesheet(req.content_type);
        if !req.compression || !minifiable || req.logical_path.contains(".min.") {
            return Ok(Compiled::unchanged(req));
        }

        let cache = self.cache_path(req);
        if let Some(path) = &cache
            && let Ok(bytes) = fs::read(path)
        {
            debug!("minify"; "cache hit for {}", req.logical_path);
            return Ok(Compiled {
                bytes,
                content_type: req.content_type.to_string(),
            });
        }

        let Some(code) = Self::minify(req) else {
            debug!("minify"; "skipping {}, parse failed", req.logical_path);
            return Ok(Compiled::unchanged(req));
        };

        if let Some(path) = &cache {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &code)?;
        }

        Ok(Compiled {
            bytes: code.into_bytes(),
            content_type: req.content_type.to_string(),
        })
    }
}
