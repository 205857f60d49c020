//! [`ImageHandle`]: one decoded image, loaded from disk and written back.
//!
//! The handle is either empty or holds a source path, the sniffed
//! [`ImageType`] and the decoded bitmap. Those three live in one private
//! struct so they can only be set or cleared together.
//!
//! ```no_run
//! use imghandle::imaging::{ImageHandle, ImageType, SaveOptions};
//!
//! let mut handle = ImageHandle::new();
//! handle.load("photo.png")?;
//! handle.resize_to_width(400)?;
//! handle.save("photo-400.webp", SaveOptions::new(ImageType::WebP))?;
//! # Ok::<(), imghandle::imaging::HandleError>(())
//! ```

use super::calculations::{proportional_height, proportional_width, scaled_dimensions};
use super::format::ImageType;
use super::params::{Quality, ResampleFilter, SaveOptions, Transform};
use super::rotation;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandleError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load {}: {reason}", path.display())]
    LoadError { path: PathBuf, reason: String },
    #[error("No image loaded")]
    FileNotLoaded,
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, HandleError>;

/// Largest bitmap a resize may produce: 1 GiB of RGBA.
pub const MAX_PIXELS: u64 = 1 << 28;

#[derive(Debug)]
struct Loaded {
    path: PathBuf,
    image_type: ImageType,
    image: DynamicImage,
}

/// Owns at most one decoded image and the file it came from.
#[derive(Debug, Default)]
pub struct ImageHandle {
    loaded: Option<Loaded>,
    filter: ResampleFilter,
}

impl ImageHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `filter` for every subsequent resize.
    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }

    /// Decode the file at `path`, replacing whatever was loaded before.
    ///
    /// The format is sniffed from the file header, never from the extension.
    /// On any error the handle is left empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.loaded = None;

        let (image_type, image) = decode(path)?;
        tracing::debug!(
            path = %path.display(),
            image_type = %image_type,
            width = image.width(),
            height = image.height(),
            "Loaded image"
        );

        self.loaded = Some(Loaded {
            path: path.to_path_buf(),
            image_type,
            image,
        });
        Ok(())
    }

    /// Type detected by the last successful load.
    pub fn image_type(&self) -> Option<ImageType> {
        self.loaded.as_ref().map(|l| l.image_type)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The current decoded bitmap.
    pub fn image(&self) -> Result<&DynamicImage> {
        Ok(&self.current()?.image)
    }

    pub fn width(&self) -> Result<u32> {
        Ok(self.image()?.width())
    }

    pub fn height(&self) -> Result<u32> {
        Ok(self.image()?.height())
    }

    pub fn dimensions(&self) -> Result<(u32, u32)> {
        let image = self.image()?;
        Ok((image.width(), image.height()))
    }

    /// Resample to exactly `width × height`, ignoring the aspect ratio.
    ///
    /// PNG and WebP bitmaps stay RGBA so transparent areas remain
    /// transparent after resampling. Zero edges and targets above
    /// [`MAX_PIXELS`] are rejected before anything is allocated.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let filter = self.filter;
        let loaded = self.current_mut()?;
        if width == 0 || height == 0 || u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(HandleError::InvalidDimensions { width, height });
        }

        let resized = loaded.image.resize_exact(width, height, filter.into());
        loaded.image = if loaded.image_type.spec().supports_alpha {
            DynamicImage::ImageRgba8(resized.into_rgba8())
        } else {
            resized
        };

        tracing::debug!(width, height, ?filter, "Resized image");
        Ok(())
    }

    /// Resize to `width`, keeping the aspect ratio.
    pub fn resize_to_width(&mut self, width: u32) -> Result<()> {
        let height = proportional_height(self.dimensions()?, width);
        self.resize(width, height)
    }

    /// Resize to `height`, keeping the aspect ratio.
    pub fn resize_to_height(&mut self, height: u32) -> Result<()> {
        let width = proportional_width(self.dimensions()?, height);
        self.resize(width, height)
    }

    /// Scale both edges by `percent` (50 halves, 200 doubles).
    pub fn scale(&mut self, percent: f64) -> Result<()> {
        let (width, height) = scaled_dimensions(self.dimensions()?, percent);
        self.resize(width, height)
    }

    /// Rotate the *source file* counter-clockwise by `degrees`.
    ///
    /// The original file is decoded again, so earlier in-memory transforms
    /// are discarded. Formats that don't support rotation (GIF) are left
    /// untouched.
    pub fn rotate(&mut self, degrees: f32) -> Result<()> {
        let loaded = self.current_mut()?;
        let spec = loaded.image_type.spec();
        if !spec.supports_rotation {
            tracing::warn!(
                image_type = %loaded.image_type,
                "Rotation not supported for this image type, leaving image unchanged"
            );
            return Ok(());
        }

        let (_, original) = decode(&loaded.path)?;
        loaded.image = rotation::rotate(original, degrees, spec);

        tracing::debug!(
            degrees,
            width = loaded.image.width(),
            height = loaded.image.height(),
            "Rotated image"
        );
        Ok(())
    }

    /// Apply one [`Transform`].
    pub fn apply(&mut self, transform: Transform) -> Result<()> {
        match transform {
            Transform::Rotate(degrees) => self.rotate(degrees),
            Transform::Resize { width, height } => self.resize(width, height),
            Transform::ResizeToWidth(width) => self.resize_to_width(width),
            Transform::ResizeToHeight(height) => self.resize_to_height(height),
            Transform::Scale(percent) => self.scale(percent),
        }
    }

    /// Encode the current bitmap to `path`.
    ///
    /// If `options.permissions` is set the mode bits are applied once the
    /// file is fully written.
    pub fn save(&self, path: impl AsRef<Path>, options: SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let image = self.image()?;

        let mut writer = BufWriter::new(File::create(path)?);
        encode(image, &mut writer, options.format, options.quality)?;
        writer.flush()?;
        drop(writer);

        if let Some(mode) = options.permissions {
            apply_permissions(path, mode)?;
        }

        tracing::debug!(
            path = %path.display(),
            format = %options.format,
            quality = options.quality.value(),
            "Saved image"
        );
        Ok(())
    }

    /// Encode the current bitmap to standard output at default quality.
    pub fn output(&self, format: ImageType) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.output_to(&mut lock, format)?;
        lock.flush()?;
        Ok(())
    }

    /// Encode the current bitmap into any writer.
    ///
    /// Encoders need to seek, so the bytes are buffered in memory first.
    pub fn output_to<W: Write>(&self, writer: &mut W, format: ImageType) -> Result<()> {
        let image = self.image()?;
        let mut buffer = Cursor::new(Vec::new());
        encode(image, &mut buffer, format, Quality::default())?;
        writer.write_all(buffer.get_ref())?;
        Ok(())
    }

    fn current(&self) -> Result<&Loaded> {
        self.loaded.as_ref().ok_or(HandleError::FileNotLoaded)
    }

    fn current_mut(&mut self) -> Result<&mut Loaded> {
        self.loaded.as_mut().ok_or(HandleError::FileNotLoaded)
    }
}

/// Sniff and decode `path`.
///
/// PNG and WebP are widened to RGBA8 so palette and grayscale images carry a
/// full alpha channel through later transforms.
fn decode(path: &Path) -> Result<(ImageType, DynamicImage)> {
    if !path.exists() {
        return Err(HandleError::FileNotFound(path.to_path_buf()));
    }
    let load_error = |reason: String| HandleError::LoadError {
        path: path.to_path_buf(),
        reason,
    };

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| load_error(e.to_string()))?;
    let image_type = reader
        .format()
        .and_then(ImageType::from_image_format)
        .ok_or_else(|| load_error("unrecognized image format".to_string()))?;
    let image = reader.decode().map_err(|e| load_error(e.to_string()))?;

    let image = if image_type.spec().supports_alpha {
        DynamicImage::ImageRgba8(image.into_rgba8())
    } else {
        image
    };
    Ok((image_type, image))
}

fn encode<W: Write + Seek>(
    image: &DynamicImage,
    writer: &mut W,
    format: ImageType,
    quality: Quality,
) -> Result<()> {
    let spec = format.spec();
    if spec.honors_quality {
        // The JPEG encoder rejects 0 and cannot store alpha.
        let encoder = JpegEncoder::new_with_quality(writer, quality.value().max(1));
        DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
    } else {
        // Every remaining encoder accepts 8-bit RGB and RGBA.
        let normalized = if spec.supports_alpha || image.color().has_alpha() {
            DynamicImage::ImageRgba8(image.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(image.to_rgb8())
        };
        normalized.write_to(writer, spec.image_format)?;
    }
    Ok(())
}

#[cfg(unix)]
fn apply_permissions(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn apply_permissions(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
