//! Parameter types for placeholder encoding.
//!
//! These describe *what* the placeholder should look like, not how to
//! produce it. The [`backend`](super::backend) turns them into bytes.
//!
//! - [`Quality`]: lossy quality (1–100, default 20). Clamped on construction.
//! - [`OutputFormat`]: WebP (lossless, default) or JPEG (honours quality).
//! - [`LqipOptions`]: width, blur sigma, grayscale flag, quality, format.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(20)
    }
}

/// Encoded format of the placeholder bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Webp,
    Jpeg,
}

impl OutputFormat {
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

/// How a placeholder is derived from its source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LqipOptions {
    /// Output width in pixels. Height follows the source aspect ratio.
    pub width: u32,
    /// Gaussian blur sigma applied after resizing. `0.0` disables the blur.
    pub blur: f32,
    pub grayscale: bool,
    pub quality: Quality,
    pub format: OutputFormat,
}

impl Default for LqipOptions {
    fn default() -> Self {
        Self {
            width: 20,
            blur: 10.0,
            grayscale: false,
            quality: Quality::default(),
            format: OutputFormat::default(),
        }
    }
}

impl LqipOptions {
    pub fn grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }
}
