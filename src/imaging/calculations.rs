//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! ## Rounding
//!
//! Every derived dimension is rounded half away from zero and clamped to at
//! least one pixel. `resize_to_width`, `resize_to_height` and `scale` all go
//! through [`round_dimension`] so they agree on the result.

/// Round a fractional pixel count to a usable dimension.
pub fn round_dimension(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.round().min(u32::MAX as f64) as u32
}

/// Height that keeps the aspect ratio when the width becomes `target_width`.
///
/// # Examples
/// ```
/// # use imghandle::imaging::calculations::proportional_height;
/// // 800x600 scaled to width 400 → height 300
/// assert_eq!(proportional_height((800, 600), 400), 300);
/// ```
pub fn proportional_height(current: (u32, u32), target_width: u32) -> u32 {
    let (w, h) = current;
    let ratio = target_width as f64 / w as f64;
    round_dimension(h as f64 * ratio)
}

/// Width that keeps the aspect ratio when the height becomes `target_height`.
pub fn proportional_width(current: (u32, u32), target_height: u32) -> u32 {
    let (w, h) = current;
    let ratio = target_height as f64 / h as f64;
    round_dimension(w as f64 * ratio)
}

/// Dimensions after scaling both edges by `percent` (100 = unchanged).
pub fn scaled_dimensions(current: (u32, u32), percent: f64) -> (u32, u32) {
    let (w, h) = current;
    let factor = percent / 100.0;
    (
        round_dimension(w as f64 * factor),
        round_dimension(h as f64 * factor),
    )
}

/// Bounding box of a `width × height` rectangle rotated by `degrees`.
///
/// Quarter turns are exact; other angles are rounded up so no rotated pixel
/// falls outside the canvas.
pub fn rotated_bounds(dims: (u32, u32), degrees: f32) -> (u32, u32) {
    let (w, h) = dims;
    match quarter_turns(degrees) {
        Some(0) | Some(2) => return (w, h),
        Some(_) => return (h, w),
        None => {}
    }
    let theta = (degrees as f64).to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (w as f64, h as f64);
    let new_w = (w * cos + h * sin - 1e-9).ceil();
    let new_h = (w * sin + h * cos - 1e-9).ceil();
    (new_w.max(1.0) as u32, new_h.max(1.0) as u32)
}

/// Number of counter-clockwise quarter turns (0..=3) if `degrees` is an
/// exact multiple of 90, `None` otherwise.
pub fn quarter_turns(degrees: f32) -> Option<u8> {
    let normalized = degrees.rem_euclid(360.0);
    if normalized % 90.0 != 0.0 {
        return None;
    }
    Some((normalized / 90.0) as u8 % 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // round_dimension tests
    // =========================================================================

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_dimension(2.5), 3);
        assert_eq!(round_dimension(2.49), 2);
    }

    #[test]
    fn clamps_to_one_pixel() {
        assert_eq!(round_dimension(0.2), 1);
        assert_eq!(round_dimension(0.0), 1);
        assert_eq!(round_dimension(-5.0), 1);
        assert_eq!(round_dimension(f64::NAN), 1);
    }

    // =========================================================================
    // proportional tests
    // =========================================================================

    #[test]
    fn proportional_height_landscape() {
        // 800x600 → width 400: 600 * 0.5 = 300
        assert_eq!(proportional_height((800, 600), 400), 300);
    }

    #[test]
    fn proportional_height_rounds() {
        // 300x200 → width 100: 200 / 3 = 66.67 → 67
        assert_eq!(proportional_height((300, 200), 100), 67);
    }

    #[test]
    fn proportional_width_portrait() {
        // 600x900 → height 300: 600 / 3 = 200
        assert_eq!(proportional_width((600, 900), 300), 200);
    }

    #[test]
    fn proportional_width_upscale() {
        // 100x50 → height 150: 100 * 3 = 300
        assert_eq!(proportional_width((100, 50), 150), 300);
    }

    // =========================================================================
    // scaled_dimensions tests
    // =========================================================================

    #[test]
    fn scale_half() {
        assert_eq!(scaled_dimensions((200, 100), 50.0), (100, 50));
    }

    #[test]
    fn scale_fractional_percent() {
        // 333 * 0.333 = 110.889 → 111; 100 * 0.333 = 33.3 → 33
        assert_eq!(scaled_dimensions((333, 100), 33.3), (111, 33));
    }

    #[test]
    fn scale_never_reaches_zero() {
        assert_eq!(scaled_dimensions((10, 10), 1.0), (1, 1));
    }

    // =========================================================================
    // rotation tests
    // =========================================================================

    #[test]
    fn quarter_turns_normalizes_angles() {
        assert_eq!(quarter_turns(0.0), Some(0));
        assert_eq!(quarter_turns(90.0), Some(1));
        assert_eq!(quarter_turns(450.0), Some(1));
        assert_eq!(quarter_turns(-90.0), Some(3));
        assert_eq!(quarter_turns(45.0), None);
    }

    #[test]
    fn rotated_bounds_quarter_turn_swaps() {
        assert_eq!(rotated_bounds((200, 100), 90.0), (100, 200));
        assert_eq!(rotated_bounds((200, 100), 180.0), (200, 100));
        assert_eq!(rotated_bounds((200, 100), 270.0), (100, 200));
    }

    #[test]
    fn rotated_bounds_45_degrees_grows_square() {
        // 100 * (cos45 + sin45) = 141.42 → 142
        assert_eq!(rotated_bounds((100, 100), 45.0), (142, 142));
    }
}
