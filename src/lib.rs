//! # imghandle
//!
//! Load a JPEG, PNG, GIF or WebP file, inspect it, resize/scale/rotate it,
//! and write it back out in any of the same four formats.
//!
//! All pixel work is delegated to the [`image`] crate (plus `imageproc` for
//! arbitrary-angle rotation). This crate only decides *which* primitive to
//! call with *which* parameters.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | [`ImageHandle`](imaging::ImageHandle), format table, dimension math |
//! | [`data_uri`] | Stateless helpers for `data:<mime>;base64,<payload>` strings |
//! | [`config`] | Optional TOML defaults for the CLI (output format, quality, filter) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Format Behavior Is a Table
//!
//! Which formats keep alpha, which honor JPEG-style quality and which can be
//! rotated is recorded once in [`imaging::FormatSpec`]. Load, resize, rotate
//! and save look the answer up instead of branching on the format.
//!
//! ## Rotation Starts From the Source File
//!
//! [`ImageHandle::rotate`](imaging::ImageHandle::rotate) decodes the file it
//! was loaded from again before rotating, so a resize done before a rotate is
//! discarded. Callers that want both should rotate first. GIF rotation is a
//! no-op.
//!
//! ## One Rounding Rule
//!
//! Proportional resizes and percentage scaling round to the nearest pixel
//! and never go below one pixel. See [`imaging::calculations`].

pub mod config;
pub mod data_uri;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
