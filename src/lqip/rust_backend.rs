//! Pure Rust placeholder backend built on the `image` crate.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Blur | `DynamicImage::blur` (Gaussian) |
//! | Grayscale | `DynamicImage::grayscale` |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (lossy, quality) |

use super::backend::{BackendError, PlaceholderBackend};
use super::params::{LqipOptions, OutputFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Backend using the `image` crate ecosystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Height for `target_width` that keeps the source aspect ratio. Never zero.
fn scaled_height(source: (u32, u32), target_width: u32) -> u32 {
    let (w, h) = source;
    if w == 0 {
        return 1;
    }
    let height = (target_width as f64 * h as f64 / w as f64).round();
    (height as u32).max(1)
}

fn encode_image(img: &DynamicImage, options: &LqipOptions) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    match options.format {
        OutputFormat::Webp => DynamicImage::ImageRgba8(img.to_rgba8())
            .write_with_encoder(WebPEncoder::new_lossless(&mut buf))
            .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {e}")))?,
        OutputFormat::Jpeg => {
            let quality = options.quality.value().min(100) as u8;
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
                .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?
        }
    }
    Ok(buf)
}

impl PlaceholderBackend for RustBackend {
    fn encode(&self, source: &Path, options: &LqipOptions) -> Result<Vec<u8>, BackendError> {
        let img = load_image(source)?;
        let width = options.width.max(1);
        let height = scaled_height((img.width(), img.height()), width);

        let mut small = img.resize_exact(width, height, FilterType::Lanczos3);
        if options.blur > 0.0 {
            small = small.blur(options.blur);
        }
        if options.grayscale {
            small = small.grayscale();
        }
        encode_image(&small, options)
    }
}
