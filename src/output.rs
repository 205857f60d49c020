//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Info
//!
//! ```text
//! photos/dawn.png
//!     Type: PNG (image/png)
//!     Size: 640x480
//! ```
//!
//! ## Convert
//!
//! ```text
//! photos/dawn.png → out/dawn.webp
//!     640x480 PNG
//!     rotate 90°
//!     resize to width 200
//!     200x267 WEBP
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and [`print_lines`] writes the result to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::imaging::{ImageType, Transform};
use std::path::Path;

const INDENT: &str = "    ";

/// Summary of a loaded image for the `info` command.
pub fn format_info(path: &Path, image_type: ImageType, dims: (u32, u32)) -> Vec<String> {
    vec![
        path.display().to_string(),
        format!("{INDENT}Type: {image_type} ({})", image_type.mime_type()),
        format!("{INDENT}Size: {}x{}", dims.0, dims.1),
    ]
}

/// What happened during a `convert`: input, each transform, final result.
pub fn format_convert(
    input: &Path,
    output: &str,
    before: (ImageType, (u32, u32)),
    transforms: &[Transform],
    after: (ImageType, (u32, u32)),
) -> Vec<String> {
    let mut lines = vec![format!("{} → {}", input.display(), output)];
    lines.push(format!(
        "{INDENT}{}x{} {}",
        before.1.0, before.1.1, before.0
    ));
    lines.extend(transforms.iter().map(|t| format!("{INDENT}{t}")));
    lines.push(format!("{INDENT}{}x{} {}", after.1.0, after.1.1, after.0));
    lines
}

/// Result of the `decode` command.
pub fn format_decoded(path: &Path, bytes: u64) -> Vec<String> {
    vec![format!("{} ({bytes} bytes)", path.display())]
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
