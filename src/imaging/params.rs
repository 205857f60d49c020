//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. The
//! [`handle`](super::handle) module turns them into calls on the `image`
//! crate.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (0–100, default 75). Clamped on construction.
//! - [`ResampleFilter`] — Which `image` filter `resize` uses.
//! - [`SaveOptions`] — Output format, quality and optional Unix permission bits.
//! - [`Transform`] — One in-memory edit, as queued up by the CLI.

use super::format::ImageType;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

impl From<u32> for Quality {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// A single edit applied to an [`ImageHandle`](super::ImageHandle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Counter-clockwise, in degrees.
    Rotate(f32),
    Resize { width: u32, height: u32 },
    ResizeToWidth(u32),
    ResizeToHeight(u32),
    /// Percentage of the current size.
    Scale(f64),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Rotate(degrees) => write!(f, "rotate {degrees}°"),
            Transform::Resize { width, height } => write!(f, "resize {width}x{height}"),
            Transform::ResizeToWidth(width) => write!(f, "resize to width {width}"),
            Transform::ResizeToHeight(height) => write!(f, "resize to height {height}"),
            Transform::Scale(percent) => write!(f, "scale {percent}%"),
        }
    }
}

/// Resampling filter used when resizing.
///
/// `Triangle` (the default) averages every source pixel under the
/// destination footprint, which is what a smooth downscale should do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// How [`ImageHandle::save`](super::ImageHandle::save) encodes its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub format: ImageType,
    /// Only honored by formats whose [`FormatSpec`](super::FormatSpec) says so.
    pub quality: Quality,
    /// Unix mode bits applied after writing (e.g. `0o644`).
    pub permissions: Option<u32>,
}

impl SaveOptions {
    pub fn new(format: ImageType) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            format: ImageType::Jpeg,
            quality: Quality::default(),
            permissions: None,
        }
    }
}
