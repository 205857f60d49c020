//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Sniff + decode** | `image::ImageReader::with_guessed_format` |
//! | **Resize** | `DynamicImage::resize_exact` (Triangle by default) |
//! | **Quarter-turn rotation** | `DynamicImage::rotate90/180/270` |
//! | **Free rotation** | `imageproc::geometric_transformations::rotate_about_center` |
//! | **Encode JPEG** | `image::codecs::jpeg::JpegEncoder` with quality |
//! | **Encode PNG / GIF / WebP** | `DynamicImage::write_to` |
//!
//! The module is split into:
//! - **Format**: [`ImageType`] and the [`FormatSpec`] dispatch table
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: [`Quality`], [`ResampleFilter`], [`SaveOptions`], [`Transform`]
//! - **Rotation**: angle rotation with format-aware background fill
//! - **Handle**: [`ImageHandle`], which owns the decoded bitmap

pub mod calculations;
pub mod format;
pub mod handle;
mod params;
mod rotation;

pub use format::{FormatSpec, ImageType, UnknownImageType};
pub use handle::{HandleError, ImageHandle};
pub use params::{Quality, ResampleFilter, SaveOptions, Transform};
