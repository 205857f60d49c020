//! Rotation of a decoded bitmap by an arbitrary angle.
//!
//! Angles are in degrees, positive is counter-clockwise. Exact quarter turns
//! use the lossless `image::DynamicImage::rotate*` primitives; anything else
//! goes through `imageproc::geometric_transformations::rotate_about_center`
//! with bilinear interpolation on a canvas grown to the rotated bounding box.
//!
//! Pixels outside the original bounds are filled transparent for formats
//! with alpha and opaque black otherwise.

use super::calculations::{quarter_turns, rotated_bounds};
use super::format::FormatSpec;
use image::{DynamicImage, Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

/// Background used for the area the rotated image no longer covers.
pub fn fill_color(spec: &FormatSpec) -> Rgba<u8> {
    if spec.supports_alpha {
        Rgba([0, 0, 0, 0])
    } else {
        Rgba([0, 0, 0, 255])
    }
}

/// Rotate `img` counter-clockwise by `degrees`.
pub fn rotate(img: DynamicImage, degrees: f32, spec: &FormatSpec) -> DynamicImage {
    match quarter_turns(degrees) {
        Some(0) => img,
        // DynamicImage rotations are clockwise
        Some(1) => img.rotate270(),
        Some(2) => img.rotate180(),
        Some(_) => img.rotate90(),
        None => rotate_free(&img, degrees, spec),
    }
}

fn rotate_free(img: &DynamicImage, degrees: f32, spec: &FormatSpec) -> DynamicImage {
    let fill = fill_color(spec);
    let source = img.to_rgba8();
    let (w, h) = source.dimensions();
    let (bound_w, bound_h) = rotated_bounds((w, h), degrees);

    // Large enough for both the source and the rotated result.
    let (canvas_w, canvas_h) = (bound_w.max(w), bound_h.max(h));
    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, fill);
    imageops::replace(
        &mut canvas,
        &source,
        ((canvas_w - w) / 2) as i64,
        ((canvas_h - h) / 2) as i64,
    );

    let rotated = rotate_about_center(
        &canvas,
        -degrees.to_radians(),
        Interpolation::Bilinear,
        fill,
    );
    let cropped = imageops::crop_imm(
        &rotated,
        (canvas_w - bound_w) / 2,
        (canvas_h - bound_h) / 2,
        bound_w,
        bound_h,
    )
    .to_image();

    if spec.supports_alpha {
        DynamicImage::ImageRgba8(cropped)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(cropped).into_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::ImageType;
    use image::{GenericImageView, Rgb, RgbImage};

    fn marked_rgb(w: u32, h: u32) -> DynamicImage {
        // Red pixel in the top-left corner, white elsewhere
        let mut img = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn zero_degrees_is_identity() {
        let img = marked_rgb(4, 2);
        let out = rotate(img.clone(), 0.0, ImageType::Jpeg.spec());
        assert_eq!(out, img);
    }

    #[test]
    fn ninety_degrees_is_counter_clockwise() {
        let img = marked_rgb(4, 2);
        let out = rotate(img, 90.0, ImageType::Jpeg.spec());
        assert_eq!(out.dimensions(), (2, 4));
        // Top-left moves to bottom-left on a counter-clockwise turn
        assert_eq!(out.to_rgb8().get_pixel(0, 3), &Rgb([255, 0, 0]));
    }

    #[test]
    fn negative_ninety_is_clockwise() {
        let img = marked_rgb(4, 2);
        let out = rotate(img, -90.0, ImageType::Jpeg.spec());
        assert_eq!(out.dimensions(), (2, 4));
        // Top-left moves to top-right on a clockwise turn
        assert_eq!(out.to_rgb8().get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn free_rotation_grows_canvas() {
        let img = marked_rgb(100, 100);
        let out = rotate(img, 45.0, ImageType::Jpeg.spec());
        assert_eq!(out.dimensions(), (142, 142));
    }

    #[test]
    fn free_rotation_fills_black_for_jpeg() {
        let img = marked_rgb(100, 100);
        let out = rotate(img, 45.0, ImageType::Jpeg.spec()).to_rgb8();
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn free_rotation_fills_transparent_for_png() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            100,
            100,
            Rgba([10, 20, 30, 255]),
        ));
        let out = rotate(img, 30.0, ImageType::Png.spec());
        let rgba = out.as_rgba8().expect("rgba output");
        assert_eq!(rgba.get_pixel(0, 0)[3], 0);
        let (w, h) = rgba.dimensions();
        let center = rgba.get_pixel(w / 2, h / 2);
        // Interpolation may be off by one on a uniform area
        for (got, want) in center.0.iter().zip([10u8, 20, 30, 255]) {
            assert!(got.abs_diff(want) <= 1, "{center:?}");
        }
    }

    #[test]
    fn free_rotation_keeps_long_thin_images_inside_bounds() {
        let img = marked_rgb(200, 10);
        let out = rotate(img, 45.0, ImageType::Jpeg.spec());
        // 200 * cos45 + 10 * sin45 = 148.49 → 149
        assert_eq!(out.dimensions(), (149, 149));
    }
}
