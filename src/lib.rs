//! # Folio
//!
//! Front-end logic for a small portfolio site: a "works" list where hovering
//! previews a work and clicking pins it, plus low-quality image placeholders
//! (LQIP) for progressive image loading.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`selection`] | Hover/lock state machine with injected pointer listeners and returned cursor effects |
//! | [`render`] | `WorksList` component: routes interactions to the selection, renders HTML with Maud |
//! | [`lqip`] | Placeholder generation: handle resolution, resize/blur/encode, fail-soft fallback |
//! | [`cache`] | Owned, process-lifetime placeholder cache and its statistics |
//! | [`config`] | `config.toml` loading, validation, and merging onto stock defaults |
//! | [`content`] | Works loaded from a JSON content export |
//! | [`types`] | `Work` and the `Identifiable` trait |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Headless Selection
//!
//! The selection controller never sees a document. Listeners are requested
//! from a [`selection::PointerSource`], containment is answered by a
//! [`selection::Container`], and cursor changes come back as
//! [`selection::UiEffect`]s. Every transition is a plain method call, so the
//! whole interaction model is unit tested without a browser.
//!
//! ## Placeholders Never Fail
//!
//! A missing or corrupt image must not break a page. [`lqip::LqipGenerator`]
//! logs the error and returns a 1×1 transparent GIF instead of propagating
//! it. Only successful results are cached, so a fixed asset is picked up on
//! the next request.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resizing, blurring, and encoding use the `image` crate. No
//! system libraries are needed.

pub mod cache;
pub mod config;
pub mod content;
pub mod lqip;
pub mod output;
pub mod render;
pub mod selection;
pub mod types;
