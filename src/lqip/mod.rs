//! Low-quality image placeholders (LQIP).
//!
//! A placeholder is a tiny (about 20 px wide), blurred copy of an image,
//! inlined as a base64 data URL so the page can paint something before the
//! full image arrives.
//!
//! | Step | Where |
//! |---|---|
//! | **Resolve** handle → file | [`resolve`] (four-tier fallback) |
//! | **Cache** by asset key | [`crate::cache::PlaceholderCache`] |
//! | **Resize, blur, encode** | [`PlaceholderBackend`] / [`RustBackend`] |
//! | **Fallback** on any failure | [`FALLBACK_PLACEHOLDER`] |
//!
//! The module is split into:
//! - **Parameters**: [`LqipOptions`] and friends
//! - **Backend**: [`PlaceholderBackend`] trait + [`RustBackend`]
//! - **Resolution**: [`ImageHandle`] → path
//! - **Generator**: [`LqipGenerator`], the caching, never-failing front door

pub mod backend;
pub mod generator;
mod params;
pub mod resolve;
pub mod rust_backend;

pub use backend::{BackendError, PlaceholderBackend};
pub use generator::{
    AssetRef, DEFAULT_ASSETS_DIR, FALLBACK_PLACEHOLDER, LqipGenerator, LqipImage, SourceImage,
};
pub use params::{LqipOptions, OutputFormat, Quality};
pub use resolve::{ImageHandle, Resolved, Tier, resolve_handle};
pub use rust_backend::RustBackend;
