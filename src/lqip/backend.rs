//! Placeholder backend trait and shared error type.
//!
//! The [`PlaceholderBackend`] trait is the single seam between placeholder
//! bookkeeping (resolution, caching, fallbacks) and pixel work. The
//! production implementation is [`RustBackend`](super::rust_backend::RustBackend).

use super::params::LqipOptions;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Turns a source image into encoded placeholder bytes.
///
/// `Sync` so one backend can serve a rayon batch.
pub trait PlaceholderBackend: Sync {
    fn encode(&self, source: &Path, options: &LqipOptions) -> Result<Vec<u8>, BackendError>;
}
