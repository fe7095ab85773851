//! Build environment: resolves references against one configuration.
//!
//! One [`AssetEnv`] lives for one build. It owns the manifest store and a
//! per-build asset cache, and is shared by every worker resolving references.
//!
//! # Render flow
//!
//! ```text
//! TagArgs ─► validate ─► external? ──yes──► synthesize ─┐
//!                           │                           │
//!                           no                          │
//!                           ▼                           ▼
//!                        locate ─► defaults ─► compile ─► defaults ─► handlers
//!                                               │                          │
//!                                               ▼                          ▼
//!                                write output + manifest entry          Rendered
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use rayon::prelude::*;

use crate::asset::{
    self, Asset, AssetError, CompileRequest, Compiler, DefaultContext, Minifier,
};
use crate::config::SiteConfig;
use crate::manifest::{ManifestEntry, ManifestError, ManifestStore, prune_stale};
use crate::tag::{Rendered, TagArgs, run_handlers};
use crate::utils::mime;
use crate::{debug, log, url};

pub struct AssetEnv {
    config: Arc<SiteConfig>,
    manifest: ManifestStore,
    compiler: Box<dyn Compiler>,
    /// Source logical path → compiled asset, for this build only.
    cache: DashMap<String, Arc<Asset>>,
}

impl AssetEnv {
    /// Environment loading the manifest left by the previous build.
    pub fn new(
        config: Arc<SiteConfig>,
        compiler: Box<dyn Compiler>,
    ) -> Result<Self, ManifestError> {
        let manifest = ManifestStore::load(manifest_path(&config))?;
        Ok(Self::with_manifest(config, manifest, compiler))
    }

    /// Environment using the built-in [`Minifier`], cached per `assets.caching`.
    pub fn with_minifier(config: Arc<SiteConfig>) -> Result<Self, ManifestError> {
        let caching = &config.assets.caching;
        let minifier = if caching.enabled && caching.kind == "file" {
            Minifier::with_cache(url::in_cache_dir(&config, &[]))
        } else {
            Minifier::new()
        };
        Self::new(config, Box::new(minifier))
    }

    pub fn with_manifest(
        config: Arc<SiteConfig>,
        manifest: ManifestStore,
        compiler: Box<dyn Compiler>,
    ) -> Self {
        Self {
            config,
            manifest,
            compiler,
            cache: DashMap::new(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn manifest(&self) -> &ManifestStore {
        &self.manifest
    }

    // ========================================================================
    // resolution
    // ========================================================================

    /// Find and read the source of an internal reference, uncompiled.
    pub fn locate(&self, reference: &str) -> Result<Asset, AssetError> {
        let logical_path = asset::strip_paths(&self.config, reference);
        let Some(found) = asset::find_source(&self.config, &logical_path) else {
            return Err(AssetError::NotFound {
                original: reference.to_string(),
                parsed: logical_path,
            });
        };

        let bytes = fs::read(&found.filename).map_err(|source| AssetError::UnreadableSource {
            path: found.filename.clone(),
            source,
        })?;
        let content_type = mime::from_path(&found.filename);
        let source_digest = ManifestStore::digest(&bytes);

        Ok(Asset::internal(
            logical_path,
            found.load_path,
            found.filename,
            content_type,
            bytes,
            source_digest,
        ))
    }

    /// Compile a located source, write its output and record it in the manifest.
    ///
    /// Within one build the result is reused until the source bytes change.
    pub fn compile(&self, source: &Asset) -> Result<Arc<Asset>, AssetError> {
        if let Some(cached) = self.cached(source) {
            return Ok(cached);
        }

        let asset = self.compile_only(source)?;
        self.write_output(&asset)?;

        let asset = Arc::new(asset);
        self.cache
            .insert(source.logical_path.clone(), Arc::clone(&asset));
        Ok(asset)
    }

    fn cached(&self, source: &Asset) -> Option<Arc<Asset>> {
        let cached = self
            .cache
            .get(&source.logical_path)
            .map(|entry| Arc::clone(entry.value()))?;
        (cached.source_digest == source.source_digest).then_some(cached)
    }

    /// Run the compiler collaborator; nothing is written or recorded.
    fn compile_only(&self, source: &Asset) -> Result<Asset, AssetError> {
        let assets = &self.config.assets;
        let request = CompileRequest {
            logical_path: &source.logical_path,
            bytes: &source.source,
            content_type: &source.content_type,
            source_maps: assets.source_maps,
            compression: assets.compression,
        };
        let compiled = self
            .compiler
            .compile(&request)
            .map_err(|source_err| AssetError::Compile {
                logical_path: source.logical_path.clone(),
                source: source_err,
            })?;

        let logical_path = if compiled.content_type == source.content_type {
            source.logical_path.clone()
        } else {
            retarget_extension(&source.logical_path, &compiled.content_type)
        };

        Ok(Asset::internal(
            logical_path,
            source.load_path.clone().unwrap_or_default(),
            source.filename.clone().unwrap_or_default(),
            compiled.content_type,
            compiled.bytes,
            source.source_digest,
        ))
    }

    /// Locate and compile an internal reference.
    pub fn find_asset(&self, reference: &str) -> Result<Arc<Asset>, AssetError> {
        self.compile(&self.locate(reference)?)
    }

    /// Public url of a reference; external urls are returned unchanged.
    ///
    /// Compiles to learn the digest but writes no output and records nothing.
    pub fn url_for(&self, reference: &str) -> Result<String, AssetError> {
        if asset::is_external_url(reference) {
            return Ok(reference.trim().to_string());
        }
        let source = self.locate(reference)?;
        let url = match self.cached(&source) {
            Some(asset) => asset::asset_url(&asset, &self.config),
            None => asset::asset_url(&self.compile_only(&source)?, &self.config),
        };
        Ok(url)
    }

    // ========================================================================
    // rendering
    // ========================================================================

    pub fn render(&self, args: &TagArgs) -> Result<Rendered, AssetError> {
        self.render_with(args, |_, _| {})
    }

    /// Render one reference. `pre_render` runs on the final asset and
    /// attributes, before the `@path` and `@data-url` overrides.
    pub fn render_with(
        &self,
        args: &TagArgs,
        pre_render: impl FnOnce(&Asset, &mut BTreeMap<String, String>),
    ) -> Result<Rendered, AssetError> {
        args.validate()?;

        let mut attrs = args.attrs.clone();
        let cx = DefaultContext {
            config: &self.config,
            inline: args.inline,
        };

        let asset = if asset::is_external(args) {
            let asset = Arc::new(asset::external_asset(args));
            asset::apply_defaults(&mut attrs, &asset, &cx);
            asset
        } else {
            let source = self
                .locate(&args.reference)
                .map_err(|err| not_found(args, err))?;
            asset::apply_defaults(&mut attrs, &source, &cx);
            let asset = self.compile(&source)?;
            asset::apply_defaults(&mut attrs, &asset, &cx);
            asset
        };

        pre_render(&asset, &mut attrs);

        if let Some(rendered) = run_handlers(args, &asset, &self.config)? {
            return Ok(rendered);
        }

        Ok(Rendered::Tag {
            asset: Box::new(Asset::clone(&asset)),
            attrs,
        })
    }

    // ========================================================================
    // build lifecycle
    // ========================================================================

    /// Build every `assets.precompile` entry in parallel; the first error aborts.
    pub fn precompile(&self) -> Result<usize, AssetError> {
        let references = &self.config.assets.precompile;
        references.par_iter().try_for_each(|reference| {
            self.find_asset(reference)
                .map(|_| ())
                .inspect_err(|err| log!("error"; "{}: {}", reference, err))
        })?;
        Ok(references.len())
    }

    /// Drop manifest entries this build did not produce, then persist it.
    pub fn finish(&self) -> Result<(), ManifestError> {
        let built: BTreeSet<String> = self
            .cache
            .iter()
            .map(|entry| entry.value().logical_path.clone())
            .collect();

        let dropped = self
            .manifest
            .retain(|logical_path| built.contains(logical_path));
        for logical_path in dropped {
            debug!("manifest"; "dropped {}", logical_path);
        }

        self.manifest.persist()?;
        debug!(
            "manifest";
            "{} entries written to {}",
            self.manifest.len(),
            self.manifest.path().display()
        );
        Ok(())
    }

    /// Remove everything under the asset destination the manifest does not list.
    ///
    /// The manifest file itself is always kept. Nothing is pruned when the asset
    /// destination is the site output directory itself.
    pub fn clean(&self) -> std::io::Result<Vec<PathBuf>> {
        let root = url::in_destination_dir(&self.config, &[]);
        if root == self.config.output_dir() {
            log!(
                "warning";
                "asset destination `{}` is the site output, skipping clean",
                self.config.assets.destination
            );
            return Ok(Vec::new());
        }

        let mut live = self.manifest.live_files(self.config.assets.gzip);
        if let Ok(relative) = self.manifest.path().strip_prefix(&root) {
            live.extend(
                relative
                    .ancestors()
                    .filter(|path| !path.as_os_str().is_empty())
                    .map(Path::to_path_buf),
            );
        }

        let removed = prune_stale(&root, &live)?;
        for path in &removed {
            log!("clean"; "{}", path.display());
        }
        Ok(removed)
    }

    fn write_output(&self, asset: &Asset) -> Result<(), AssetError> {
        let assets = &self.config.assets;
        let public_path = asset.public_path(assets.digest);
        let target = url::in_destination_dir(&self.config, &[public_path]);

        if let Some(previous) = self.manifest.lookup(&asset.logical_path)
            && previous.digest_path == public_path
            && previous.integrity == asset.integrity
            && (!assets.gzip || previous.gzip_path.is_some())
            && target.is_file()
        {
            debug!("assets"; "{} unchanged", public_path);
            return Ok(());
        }

        write_file(&target, &asset.source)?;
        log!("assets"; "{}", public_path);

        let mut entry = ManifestEntry::new(public_path, asset.integrity.clone())
            .with_content_type(&asset.content_type);
        if assets.gzip
            && let Some(gzipped) = self.compiler.compress(&asset.source)
        {
            let gzip_path = format!("{public_path}.gz");
            write_file(&url::in_destination_dir(&self.config, &[&gzip_path]), &gzipped)?;
            entry = entry.with_gzip(gzip_path);
        }

        self.manifest.register(&asset.logical_path, entry);
        Ok(())
    }
}

/// Manifest location inside the asset destination.
pub fn manifest_path(config: &SiteConfig) -> PathBuf {
    url::in_destination_dir(config, &[&config.assets.manifest])
}

/// Report a missing reference with the full argument set.
fn not_found(args: &TagArgs, err: AssetError) -> AssetError {
    let parsed = match err {
        AssetError::NotFound { parsed, .. } => parsed,
        other => return other,
    };
    log!("error"; "could not find `{}` with args {:?}", args.original, args.attrs);
    debug!(
        "assets";
        "parsed reference `{}` (looked up as `{}`): {:?}",
        args.reference,
        parsed,
        args
    );
    AssetError::NotFound {
        original: args.original.clone(),
        parsed: args.reference.clone(),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AssetError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    };
    write().map_err(|source| AssetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Swap the extension of a logical path for the one matching `content_type`.
///
/// Structured-syntax types fall back to their base subtype
/// (`application/ld+json` → `json`). Unknown types keep the path as is.
fn retarget_extension(logical_path: &str, content_type: &str) -> String {
    let ext = mime::extension_for(content_type).or_else(|| {
        mime::strip_secondary_content_type(content_type)
            .ok()
            .and_then(|stripped| mime::extension_for(&stripped))
    });
    let Some(ext) = ext else {
        return logical_path.to_string();
    };

    let (dir, name) = match logical_path.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, logical_path),
    };
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };

    match dir {
        Some(dir) => format!("{dir}/{stem}.{ext}"),
        None => format!("{stem}.{ext}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Compiled, Passthrough};
    use crate::core::BuildMode;
    use tempfile::TempDir;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    /// scss → css, reversed bytes as "gzip".
    struct ScssCompiler;

    impl Compiler for ScssCompiler {
        fn compile(&self, req: &CompileRequest<'_>) -> anyhow::Result<Compiled> {
            if req.content_type == mime::types::SCSS {
                return Ok(Compiled {
                    bytes: req.bytes.to_vec(),
                    content_type: mime::types::CSS.into(),
                });
            }
            Ok(Compiled::unchanged(req))
        }

        fn compress(&self, bytes: &[u8]) -> Option<Vec<u8>> {
            Some(bytes.iter().rev().copied().collect())
        }
    }

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets/img")).unwrap();
        fs::create_dir_all(dir.path().join("_assets/css")).unwrap();
        fs::write(dir.path().join("assets/img/logo.png"), PNG).unwrap();
        fs::write(dir.path().join("_assets/css/app.scss"), "a { b: c }").unwrap();
        dir
    }

    fn env(config: SiteConfig) -> AssetEnv {
        AssetEnv::new(Arc::new(config), Box::new(ScssCompiler)).unwrap()
    }

    fn dev(dir: &TempDir) -> SiteConfig {
        SiteConfig::new(dir.path(), BuildMode::DEVELOPMENT)
    }

    #[test]
    fn test_external_reference_infers_jpeg() {
        let dir = site();
        let env = env(dev(&dir));
        let rendered = env.render(&TagArgs::new("https://example.com/a.jpg")).unwrap();

        let Rendered::Tag { asset, attrs } = rendered else {
            panic!("expected a tag");
        };
        assert!(asset.is_external());
        assert_eq!(asset.content_type, "image/jpeg");
        assert_eq!(attrs["src"], "https://example.com/a.jpg");
        assert!(env.manifest().is_empty());
    }

    #[test]
    fn test_missing_reference_is_not_found() {
        let dir = site();
        let env = env(dev(&dir));
        let args = TagArgs::new("missing.png").with_original("{{ page.cover }}");
        let err = env.render(&args).unwrap_err();

        let AssetError::NotFound { original, parsed } = err else {
            panic!("expected NotFound");
        };
        assert_eq!(original, "{{ page.cover }}");
        assert_eq!(parsed, "missing.png");
    }

    #[test]
    fn test_path_on_external_is_rejected() {
        let dir = site();
        let env = env(dev(&dir));
        let err = env
            .render(&TagArgs::new("https://example.com/a.jpg").path_only())
            .unwrap_err();
        assert!(matches!(
            err,
            AssetError::InvalidCombination { arg: "@path", with: "external" }
        ));
    }

    #[test]
    fn test_exclusive_flags_rejected_before_lookup() {
        let dir = site();
        let env = env(dev(&dir));
        let err = env
            .render(&TagArgs::new("missing.png").path_only().data_url())
            .unwrap_err();
        assert!(matches!(err, AssetError::InvalidCombination { .. }));
    }

    #[test]
    fn test_render_image_tag() {
        let dir = site();
        let mut config = dev(&dir);
        config.assets.digest = true;
        config.assets.subresource_integrity = true;
        let env = env(config);

        let rendered = env.render(&TagArgs::new("logo.png").attr("alt", "Logo")).unwrap();
        let Rendered::Tag { asset, attrs } = rendered else {
            panic!("expected a tag");
        };

        assert_eq!(attrs["alt"], "Logo");
        assert_eq!(attrs["src"], format!("/assets/{}", asset.digest_path));
        assert_eq!(attrs["integrity"], asset.integrity.clone().unwrap());
        assert_eq!(attrs["crossorigin"], "anonymous");

        let output = dir.path().join("public/assets").join(&asset.digest_path);
        assert_eq!(fs::read(output).unwrap(), PNG);
        assert_eq!(env.manifest().lookup("logo.png").unwrap().digest_path, asset.digest_path);
    }

    #[test]
    fn test_path_and_data_url_overrides() {
        let dir = site();
        let env = env(dev(&dir));

        let rendered = env.render(&TagArgs::new("assets/img/logo.png").path_only()).unwrap();
        assert_eq!(rendered, Rendered::Url("/assets/logo.png".into()));

        let rendered = env.render(&TagArgs::new("logo.png").data_url()).unwrap();
        let Rendered::DataUri(uri) = rendered else {
            panic!("expected a data uri");
        };
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_identical_bytes_yield_identical_digest_paths() {
        let first = site();
        let second = site();
        let mut a = dev(&first);
        let mut b = SiteConfig::new(second.path(), BuildMode::PRODUCTION);
        a.assets.digest = true;
        b.assets.digest = true;

        let one = env(a).find_asset("logo.png").unwrap();
        let two = env(b).find_asset("logo.png").unwrap();
        assert_eq!(one.digest_path, two.digest_path);
        assert_ne!(one.digest_path, "logo.png");
    }

    #[test]
    fn test_compile_changes_type_and_extension() {
        let dir = site();
        let env = env(dev(&dir));
        let rendered = env.render(&TagArgs::new("app.scss")).unwrap();

        let Rendered::Tag { asset, attrs } = rendered else {
            panic!("expected a tag");
        };
        assert_eq!(asset.logical_path, "app.css");
        assert_eq!(asset.content_type, "text/css");
        assert_eq!(attrs["href"], "/assets/app.css");
        assert_eq!(attrs["rel"], "stylesheet");
        assert!(dir.path().join("public/assets/app.css").is_file());
    }

    #[test]
    fn test_gzip_sibling() {
        let dir = site();
        let mut config = dev(&dir);
        config.assets.gzip = true;
        let env = env(config);

        env.find_asset("logo.png").unwrap();
        let gz = dir.path().join("public/assets/logo.png.gz");
        let expected: Vec<u8> = PNG.iter().rev().copied().collect();
        assert_eq!(fs::read(gz).unwrap(), expected);
        assert_eq!(
            env.manifest().lookup("logo.png").unwrap().gzip_path.as_deref(),
            Some("logo.png.gz")
        );
    }

    #[test]
    fn test_unchanged_output_not_rewritten() {
        let dir = site();
        let output = dir.path().join("public/assets/logo.png");

        let first = env(dev(&dir));
        first.find_asset("logo.png").unwrap();
        first.finish().unwrap();

        fs::write(&output, b"untouched").unwrap();
        env(dev(&dir)).find_asset("logo.png").unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"untouched");

        fs::write(dir.path().join("assets/img/logo.png"), b"new bytes").unwrap();
        env(dev(&dir)).find_asset("logo.png").unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"new bytes");
    }

    #[test]
    fn test_cache_reused_until_source_changes() {
        let dir = site();
        let env = env(dev(&dir));
        let first = env.find_asset("logo.png").unwrap();
        let again = env.find_asset("logo.png").unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        fs::write(dir.path().join("assets/img/logo.png"), b"changed").unwrap();
        let changed = env.find_asset("logo.png").unwrap();
        assert!(!Arc::ptr_eq(&first, &changed));
        assert_eq!(changed.source, b"changed");
    }

    #[test]
    fn test_pre_render_sees_final_attrs() {
        let dir = site();
        let env = env(dev(&dir));
        let rendered = env
            .render_with(&TagArgs::new("logo.png"), |asset, attrs| {
                assert_eq!(asset.logical_path, "logo.png");
                assert!(attrs.contains_key("src"));
                attrs.insert("loading".into(), "lazy".into());
            })
            .unwrap();
        let Rendered::Tag { attrs, .. } = rendered else {
            panic!("expected a tag");
        };
        assert_eq!(attrs["loading"], "lazy");
    }

    #[test]
    fn test_url_for_respects_cdn() {
        let dir = site();
        let mut config = SiteConfig::new(dir.path(), BuildMode::PRODUCTION);
        config.assets.cdn.url = Some("//cdn.example.com".into());
        let env = env(config);

        assert_eq!(env.url_for("logo.png").unwrap(), "https://cdn.example.com/logo.png");
        assert_eq!(env.url_for("https://x.io/a.png").unwrap(), "https://x.io/a.png");
    }

    #[test]
    fn test_precompile() {
        let dir = site();
        let mut config = dev(&dir);
        config.assets.precompile = vec!["logo.png".into(), "app.scss".into()];
        let env = env(config);

        assert_eq!(env.precompile().unwrap(), 2);
        assert!(dir.path().join("public/assets/logo.png").is_file());
        assert!(dir.path().join("public/assets/app.css").is_file());
        assert_eq!(env.manifest().len(), 2);
    }

    #[test]
    fn test_precompile_missing_aborts() {
        let dir = site();
        let mut config = dev(&dir);
        config.assets.precompile = vec!["logo.png".into(), "nope.js".into()];
        let err = env(config).precompile().unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
    }

    #[test]
    fn test_finish_then_clean() {
        let dir = site();
        let dest = dir.path().join("public/assets");
        fs::create_dir_all(dest.join("old")).unwrap();
        fs::write(dest.join("old/stale.js"), b"x").unwrap();
        fs::write(dest.join("stale.css"), b"x").unwrap();

        let env = AssetEnv::new(Arc::new(dev(&dir)), Box::new(Passthrough)).unwrap();
        env.find_asset("logo.png").unwrap();
        env.finish().unwrap();
        let removed = env.clean().unwrap();

        assert_eq!(removed, vec![PathBuf::from("old"), PathBuf::from("stale.css")]);
        assert!(dest.join("logo.png").is_file());
        assert!(dest.join(".manifest.json").is_file());
    }

    #[test]
    fn test_finish_drops_unbuilt_entries() {
        let dir = site();
        let config = dev(&dir);
        let store = ManifestStore::new(manifest_path(&config));
        store.register("gone.png", ManifestEntry::new("gone.png", None));

        let env = AssetEnv::with_manifest(Arc::new(config), store, Box::new(Passthrough));
        env.find_asset("logo.png").unwrap();
        env.finish().unwrap();

        let reloaded = ManifestStore::load(manifest_path(env.config())).unwrap();
        assert!(reloaded.lookup("gone.png").is_none());
        assert!(reloaded.lookup("logo.png").is_some());
    }

    struct FailingCompiler;

    impl Compiler for FailingCompiler {
        fn compile(&self, _: &CompileRequest<'_>) -> anyhow::Result<Compiled> {
            anyhow::bail!("syntax error at line 1")
        }
    }

    #[test]
    fn test_unreadable_source() {
        let dir = site();
        fs::create_dir_all(dir.path().join("assets/img/x.png")).unwrap();
        let env = env(dev(&dir));

        let err = env.render(&TagArgs::new("x.png")).unwrap_err();
        let AssetError::UnreadableSource { path, .. } = err else {
            panic!("expected UnreadableSource");
        };
        assert!(path.ends_with("assets/img/x.png"));
        assert!(env.manifest().is_empty());
    }

    #[test]
    fn test_compiler_error_surfaces() {
        let dir = site();
        let env = AssetEnv::new(Arc::new(dev(&dir)), Box::new(FailingCompiler)).unwrap();

        let err = env.find_asset("logo.png").unwrap_err();
        let AssetError::Compile { logical_path, source } = err else {
            panic!("expected Compile");
        };
        assert_eq!(logical_path, "logo.png");
        assert!(source.to_string().contains("syntax error"));
        assert!(!dir.path().join("public/assets/logo.png").exists());
    }

    #[test]
    fn test_blocked_output_is_write_error() {
        let dir = site();
        let config = dev(&dir);
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/assets"), b"not a directory").unwrap();

        let store = ManifestStore::new(manifest_path(&config));
        let env = AssetEnv::with_manifest(Arc::new(config), store, Box::new(Passthrough));

        let err = env.find_asset("logo.png").unwrap_err();
        assert!(matches!(err, AssetError::Write { .. }));
        assert!(env.manifest().is_empty());
    }

    #[test]
    fn test_clean_skips_site_output_root() {
        let dir = site();
        let mut config = dev(&dir);
        config.assets.destination = "/".into();
        let output = dir.path().join("public");
        fs::create_dir_all(output.join("blog")).unwrap();
        fs::write(output.join("index.html"), b"<html></html>").unwrap();
        fs::write(output.join("blog/post.html"), b"<html></html>").unwrap();

        let env = AssetEnv::new(Arc::new(config), Box::new(Passthrough)).unwrap();
        env.find_asset("logo.png").unwrap();
        env.finish().unwrap();

        assert!(env.clean().unwrap().is_empty());
        assert!(output.join("index.html").is_file());
        assert!(output.join("blog/post.html").is_file());
        assert!(output.join("logo.png").is_file());
    }

    #[test]
    fn test_url_for_writes_nothing() {
        let dir = site();
        let mut config = dev(&dir);
        config.assets.digest = true;
        let env = env(config);

        let url = env.url_for("logo.png").unwrap();
        assert!(url.starts_with("/assets/logo-"));
        assert!(!dir.path().join("public").exists());
        assert!(env.manifest().is_empty());

        let asset = env.find_asset("logo.png").unwrap();
        assert_eq!(url, format!("/assets/{}", asset.digest_path));
        assert_eq!(env.url_for("logo.png").unwrap(), url);
    }

    #[test]
    fn test_retarget_extension() {
        assert_eq!(retarget_extension("css/app.scss", "text/css"), "css/app.css");
        assert_eq!(retarget_extension("data.jsonld", "application/ld+json"), "data.json");
        assert_eq!(retarget_extension("a.bin", "application/x-unknown"), "a.bin");
    }
}
