//! Placeholder generation: resolve, cache, encode, fall back.
//!
//! [`LqipGenerator`] is the only entry point templates and the CLI use. It
//! never returns an error: any failure is logged and replaced by
//! [`FALLBACK_PLACEHOLDER`], so a broken image degrades to a transparent
//! pixel instead of failing the page.

use super::backend::{BackendError, PlaceholderBackend};
use super::params::LqipOptions;
use super::resolve::{ImageHandle, resolve_handle};
use super::rust_backend::RustBackend;
use crate::cache::{CacheStats, PlaceholderCache};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 1×1 transparent GIF returned whenever a placeholder cannot be produced.
pub const FALLBACK_PLACEHOLDER: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Default assets directory, relative to the project root.
pub const DEFAULT_ASSETS_DIR: &str = "src/assets";

/// What to build a placeholder for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetRef {
    /// Path relative to the assets directory.
    Path(String),
    /// Imported image whose file location must be resolved.
    Handle(ImageHandle),
}

impl From<&str> for AssetRef {
    fn from(path: &str) -> Self {
        AssetRef::Path(path.to_string())
    }
}

/// An image record before placeholders are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    pub src: AssetRef,
    pub alt: String,
}

/// An image record with its placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LqipImage {
    pub src: AssetRef,
    pub alt: String,
    pub lqip: String,
}

/// Produces cached base64 data URLs for blurred previews.
pub struct LqipGenerator<B: PlaceholderBackend = RustBackend> {
    backend: B,
    project_root: PathBuf,
    assets_dir: PathBuf,
    options: LqipOptions,
    cache: PlaceholderCache,
}

impl LqipGenerator<RustBackend> {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_backend(RustBackend::new(), project_root)
    }
}

impl<B: PlaceholderBackend> LqipGenerator<B> {
    pub fn with_backend(backend: B, project_root: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            project_root: project_root.into(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            options: LqipOptions::default(),
            cache: PlaceholderCache::new(),
        }
    }

    pub fn with_options(mut self, options: LqipOptions) -> Self {
        self.options = options;
        self
    }

    /// Assets directory, relative to the project root unless absolute.
    pub fn with_assets_dir(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = assets_dir.into();
        self
    }

    pub fn options(&self) -> &LqipOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cache(&self) -> &PlaceholderCache {
        &self.cache
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn assets_root(&self) -> PathBuf {
        self.project_root.join(&self.assets_dir)
    }

    /// Placeholder for a path relative to the assets directory.
    pub fn placeholder(&self, relative: &str) -> String {
        self.placeholder_from_path(&self.assets_root().join(relative))
    }

    /// Placeholder for an absolute (or working-directory relative) file,
    /// bypassing assets-directory resolution.
    ///
    /// Every entry point lands here, so the cache is keyed by the file path
    /// actually read.
    pub fn placeholder_from_path(&self, path: &Path) -> String {
        self.cached(path)
    }

    /// Placeholder for an imported image handle.
    pub fn placeholder_for_handle(&self, handle: &ImageHandle) -> String {
        let resolved = resolve_handle(handle, &self.project_root, &self.assets_dir);
        debug!(
            src = %handle.src,
            tier = ?resolved.tier,
            path = %resolved.path.display(),
            "resolved image handle"
        );
        self.placeholder_from_path(&resolved.path)
    }

    pub fn placeholder_for(&self, asset: &AssetRef) -> String {
        match asset {
            AssetRef::Path(relative) => self.placeholder(relative),
            AssetRef::Handle(handle) => self.placeholder_for_handle(handle),
        }
    }

    /// Placeholders for many assets, computed in parallel.
    ///
    /// The result has one entry per input, in input order. A failure only
    /// affects its own entry.
    pub fn placeholders(&self, assets: &[AssetRef]) -> Vec<String> {
        assets
            .par_iter()
            .map(|asset| self.placeholder_for(asset))
            .collect()
    }

    /// Attach placeholders to image records, in parallel, keeping order.
    pub fn with_placeholders(&self, images: Vec<SourceImage>) -> Vec<LqipImage> {
        images
            .into_par_iter()
            .map(|image| {
                let lqip = self.placeholder_for(&image.src);
                LqipImage {
                    src: image.src,
                    alt: image.alt,
                    lqip,
                }
            })
            .collect()
    }

    fn cached(&self, path: &Path) -> String {
        let key = path.to_string_lossy();
        if let Some(hit) = self.cache.get(&key) {
            debug!(path = %key, "placeholder cache hit");
            return hit;
        }
        match self.encode(path) {
            Ok(data_url) => self.cache.insert(&key, data_url),
            Err(e) => {
                warn!(path = %key, error = %e, "failed to generate placeholder");
                self.cache.record_failure();
                FALLBACK_PLACEHOLDER.to_string()
            }
        }
    }

    fn encode(&self, path: &Path) -> Result<String, BackendError> {
        let bytes = self.backend.encode(path, &self.options)?;
        Ok(format!(
            "data:{};base64,{}",
            self.options.format.mime(),
            STANDARD.encode(bytes)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lqip::backend::tests::MockBackend;
    use std::time::Duration;

    fn generator(backend: MockBackend) -> LqipGenerator<MockBackend> {
        LqipGenerator::with_backend(backend, "/site")
    }

    #[test]
    fn encodes_base64_data_url() {
        let lqip = generator(MockBackend::new());
        let url = lqip.placeholder("x.png");
        assert_eq!(
            url,
            format!("data:image/webp;base64,{}", STANDARD.encode("x.png:20:false"))
        );
    }

    #[test]
    fn relative_paths_resolve_under_assets_dir() {
        let lqip = generator(MockBackend::new());
        lqip.placeholder("works/x.png");
        assert_eq!(
            lqip.backend().get_calls(),
            vec!["/site/src/assets/works/x.png".to_string()]
        );
    }

    #[test]
    fn custom_assets_dir() {
        let lqip = generator(MockBackend::new()).with_assets_dir("public/img");
        lqip.placeholder("x.png");
        assert_eq!(
            lqip.backend().get_calls(),
            vec!["/site/public/img/x.png".to_string()]
        );
    }

    #[test]
    fn second_request_is_cached() {
        let lqip = generator(MockBackend::new());
        let first = lqip.placeholder("x.png");
        let second = lqip.placeholder("x.png");
        assert_eq!(first, second);
        assert_eq!(lqip.backend().get_calls().len(), 1);
        assert_eq!(lqip.stats().hits, 1);
        assert_eq!(lqip.stats().misses, 1);
        assert!(lqip.cache().contains("/site/src/assets/x.png"));
        assert!(!lqip.cache().contains("x.png"));
    }

    #[test]
    fn asset_and_bare_path_with_same_name_are_distinct_entries() {
        let lqip = generator(MockBackend::new());
        let asset = lqip.placeholder("x.png");
        let bare = lqip.placeholder_from_path(Path::new("x.png"));
        assert_eq!(
            lqip.backend().get_calls(),
            vec!["/site/src/assets/x.png".to_string(), "x.png".to_string()]
        );
        assert_eq!(lqip.cache().len(), 2);
        assert_eq!(asset, bare);
    }

    #[test]
    fn relative_path_and_handle_to_same_file_share_entry() {
        let lqip = generator(MockBackend::new());
        lqip.placeholder("x.png");
        lqip.placeholder_for_handle(&ImageHandle::from_src("/src/assets/x.png"));
        assert_eq!(lqip.backend().get_calls().len(), 1);
        assert_eq!(lqip.stats().hits, 1);
    }

    #[test]
    fn failure_returns_fallback_and_is_not_cached() {
        let lqip = generator(MockBackend::failing(&["missing.png"]));
        assert_eq!(lqip.placeholder("missing.png"), FALLBACK_PLACEHOLDER);
        assert_eq!(lqip.placeholder("missing.png"), FALLBACK_PLACEHOLDER);
        assert_eq!(lqip.backend().get_calls().len(), 2);
        assert!(lqip.cache().is_empty());
        assert_eq!(lqip.stats().failures, 2);
    }

    #[test]
    fn options_reach_backend() {
        let lqip = generator(MockBackend::new())
            .with_options(LqipOptions::default().width(12).grayscale(true));
        let url = lqip.placeholder("x.png");
        assert!(url.ends_with(&STANDARD.encode("x.png:12:true")));
    }

    #[test]
    fn handle_uses_resolved_path_as_key() {
        let lqip = generator(MockBackend::new());
        let a = AssetRef::Handle(ImageHandle::from_src("/src/assets/x.png"));
        let b = AssetRef::Handle(ImageHandle {
            src: "/_astro/x.123.png".to_string(),
            fs_path: Some("/site/src/assets/x.png".to_string()),
        });
        assert_eq!(lqip.placeholder_for(&a), lqip.placeholder_for(&b));
        assert_eq!(lqip.backend().get_calls().len(), 1);
        assert!(lqip.cache().contains("/site/src/assets/x.png"));
    }

    #[test]
    fn from_path_skips_assets_dir() {
        let lqip = generator(MockBackend::new());
        lqip.placeholder_from_path(Path::new("/elsewhere/y.jpg"));
        assert_eq!(lqip.backend().get_calls(), vec!["/elsewhere/y.jpg".to_string()]);
    }

    #[test]
    fn batch_preserves_order_when_later_items_finish_first() {
        let backend = MockBackend::new().with_delay("a.png", Duration::from_millis(50));
        let lqip = generator(backend);
        let urls = lqip.placeholders(&["a.png".into(), "b.png".into()]);
        assert_eq!(urls[0], lqip.placeholder("a.png"));
        assert_eq!(urls[1], lqip.placeholder("b.png"));
        assert_ne!(urls[0], urls[1]);
    }

    #[test]
    fn batch_isolates_failures() {
        let lqip = generator(MockBackend::failing(&["b.png"]));
        let urls = lqip.placeholders(&["a.png".into(), "b.png".into(), "c.png".into()]);
        assert_eq!(urls.len(), 3);
        assert_ne!(urls[0], FALLBACK_PLACEHOLDER);
        assert_eq!(urls[1], FALLBACK_PLACEHOLDER);
        assert_ne!(urls[2], FALLBACK_PLACEHOLDER);
    }

    #[test]
    fn with_placeholders_keeps_alt_and_order() {
        let lqip = generator(MockBackend::new());
        let images = vec![
            SourceImage {
                src: "one.png".into(),
                alt: "First".to_string(),
            },
            SourceImage {
                src: "two.png".into(),
                alt: "Second".to_string(),
            },
        ];
        let out = lqip.with_placeholders(images);
        assert_eq!(out[0].alt, "First");
        assert_eq!(out[1].alt, "Second");
        assert_eq!(out[0].lqip, lqip.placeholder("one.png"));
    }

    #[test]
    fn asset_ref_deserializes_both_shapes() {
        let refs: Vec<AssetRef> =
            serde_json::from_str(r#"["a.png", {"src": "/src/assets/b.png"}]"#).unwrap();
        assert_eq!(refs[0], AssetRef::Path("a.png".to_string()));
        assert_eq!(
            refs[1],
            AssetRef::Handle(ImageHandle::from_src("/src/assets/b.png"))
        );
    }
}
