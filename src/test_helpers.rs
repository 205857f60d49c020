//! Shared test utilities: fixture images written into a temp directory.
//!
//! Fixtures are generated with the `image` crate rather than checked in, so
//! every test can ask for exactly the dimensions and type it needs.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let path = write_fixture(tmp.path(), ImageType::Png, 200, 100);
//! ```

use crate::imaging::ImageType;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Fixture setup
// =========================================================================

/// Opaque gradient image, encoded as `image_type`.
pub fn write_fixture(dir: &Path, image_type: ImageType, width: u32, height: u32) -> PathBuf {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
            255,
        ])
    });
    let path = dir.join(format!("fixture-{width}x{height}.{}", image_type.extension()));
    encode_fixture(DynamicImage::ImageRgba8(img), image_type, &path);
    path
}

/// Transparent border around an opaque square in the middle half.
pub fn write_transparent(dir: &Path, image_type: ImageType, width: u32, height: u32) -> PathBuf {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= width / 4 && x < width * 3 / 4 && y >= height / 4 && y < height * 3 / 4;
        if inside {
            Rgba([200, 50, 50, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let path = dir.join(format!(
        "transparent-{width}x{height}.{}",
        image_type.extension()
    ));
    encode_fixture(DynamicImage::ImageRgba8(img), image_type, &path);
    path
}

/// High-entropy image, useful where compression ratio matters.
pub fn write_noise(dir: &Path, image_type: ImageType, width: u32, height: u32) -> PathBuf {
    let mut state: u32 = 0x9e37_79b9;
    let img = RgbaImage::from_fn(width, height, |_, _| {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgba([r, g, b, 255])
    });
    let path = dir.join(format!("noise-{width}x{height}.{}", image_type.extension()));
    encode_fixture(DynamicImage::ImageRgba8(img), image_type, &path);
    path
}

fn encode_fixture(img: DynamicImage, image_type: ImageType, path: &Path) {
    let img = match image_type {
        ImageType::Jpeg => DynamicImage::ImageRgb8(img.into_rgb8()),
        _ => img,
    };
    img.save_with_format(path, image_type.image_format())
        .unwrap();
}
