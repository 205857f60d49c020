//! Supported image types and their per-format behavior table.
//!
//! Every place that used to branch on the format (decode, encode, resize
//! background, rotation) consults [`FormatSpec`] instead. The table makes the
//! asymmetries explicit:
//!
//! | Type | Alpha | Rotation | Quality |
//! |------|-------|----------|---------|
//! | JPEG | no    | yes      | yes     |
//! | PNG  | yes   | yes      | no      |
//! | GIF  | no    | **no**   | no      |
//! | WEBP | yes   | yes      | no      |
//!
//! GIF rotation is a silent no-op. PNG and GIF are lossless and the WebP
//! encoder compiled into `image` is lossless-only, so only JPEG honors the
//! quality setting.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four raster formats the handle can load and save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    Gif,
    WebP,
}

/// Static description of how a format is decoded, encoded and transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub image_format: ImageFormat,
    pub mime_type: &'static str,
    pub extension: &'static str,
    /// Bitmap is kept as RGBA and transparent fills are used.
    pub supports_alpha: bool,
    /// `rotate` has an effect. When false it is a no-op.
    pub supports_rotation: bool,
    /// The encoder honors the lossy quality parameter.
    pub honors_quality: bool,
}

const JPEG: FormatSpec = FormatSpec {
    image_format: ImageFormat::Jpeg,
    mime_type: "image/jpeg",
    extension: "jpg",
    supports_alpha: false,
    supports_rotation: true,
    honors_quality: true,
};

const PNG: FormatSpec = FormatSpec {
    image_format: ImageFormat::Png,
    mime_type: "image/png",
    extension: "png",
    supports_alpha: true,
    supports_rotation: true,
    honors_quality: false,
};

const GIF: FormatSpec = FormatSpec {
    image_format: ImageFormat::Gif,
    mime_type: "image/gif",
    extension: "gif",
    supports_alpha: false,
    supports_rotation: false,
    honors_quality: false,
};

const WEBP: FormatSpec = FormatSpec {
    image_format: ImageFormat::WebP,
    mime_type: "image/webp",
    extension: "webp",
    supports_alpha: true,
    supports_rotation: true,
    honors_quality: false,
};

impl ImageType {
    pub const ALL: [ImageType; 4] = [
        ImageType::Jpeg,
        ImageType::Png,
        ImageType::Gif,
        ImageType::WebP,
    ];

    pub fn spec(self) -> &'static FormatSpec {
        match self {
            ImageType::Jpeg => &JPEG,
            ImageType::Png => &PNG,
            ImageType::Gif => &GIF,
            ImageType::WebP => &WEBP,
        }
    }

    /// Map a sniffed `image` format onto a supported type.
    ///
    /// Returns `None` for formats the `image` crate knows but this crate
    /// does not handle (TIFF, BMP, ...).
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.spec().image_format == format)
    }

    pub fn image_format(self) -> ImageFormat {
        self.spec().image_format
    }

    pub fn mime_type(self) -> &'static str {
        self.spec().mime_type
    }

    pub fn extension(self) -> &'static str {
        self.spec().extension
    }
}

impl From<ImageType> for ImageFormat {
    fn from(t: ImageType) -> Self {
        t.image_format()
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageType::Jpeg => "JPEG",
            ImageType::Png => "PNG",
            ImageType::Gif => "GIF",
            ImageType::WebP => "WEBP",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown image type: {0}")]
pub struct UnknownImageType(pub String);

impl FromStr for ImageType {
    type Err = UnknownImageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageType::Jpeg),
            "png" => Ok(ImageType::Png),
            "gif" => Ok(ImageType::Gif),
            "webp" => Ok(ImageType::WebP),
            _ => Err(UnknownImageType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gif_is_the_only_type_without_rotation() {
        let unrotatable: Vec<_> = ImageType::ALL
            .into_iter()
            .filter(|t| !t.spec().supports_rotation)
            .collect();
        assert_eq!(unrotatable, vec![ImageType::Gif]);
    }

    #[test]
    fn only_png_and_webp_keep_alpha() {
        assert!(ImageType::Png.spec().supports_alpha);
        assert!(ImageType::WebP.spec().supports_alpha);
        assert!(!ImageType::Jpeg.spec().supports_alpha);
        assert!(!ImageType::Gif.spec().supports_alpha);
    }

    #[test]
    fn only_jpeg_honors_quality() {
        for t in ImageType::ALL {
            assert_eq!(t.spec().honors_quality, t == ImageType::Jpeg);
        }
    }

    #[test]
    fn round_trips_through_image_format() {
        for t in ImageType::ALL {
            assert_eq!(ImageType::from_image_format(t.into()), Some(t));
        }
    }

    #[test]
    fn unsupported_image_format_maps_to_none() {
        assert_eq!(ImageType::from_image_format(ImageFormat::Tiff), None);
        assert_eq!(ImageType::from_image_format(ImageFormat::Bmp), None);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("jpg".parse::<ImageType>(), Ok(ImageType::Jpeg));
        assert_eq!("JPEG".parse::<ImageType>(), Ok(ImageType::Jpeg));
        assert_eq!("Png".parse::<ImageType>(), Ok(ImageType::Png));
        assert_eq!("webp".parse::<ImageType>(), Ok(ImageType::WebP));
        assert!("tiff".parse::<ImageType>().is_err());
    }

    #[test]
    fn display_uses_upper_case_names() {
        assert_eq!(ImageType::WebP.to_string(), "WEBP");
        assert_eq!(ImageType::Jpeg.to_string(), "JPEG");
    }
}
