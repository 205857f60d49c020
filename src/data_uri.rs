//! Helpers for `data:<mime>;base64,<payload>` strings.
//!
//! Neither function touches an [`ImageHandle`](crate::imaging::ImageHandle);
//! they work on the raw string and the filesystem only.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataUriError {
    #[error("Malformed data URI: {0}")]
    MalformedInput(String),
    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// MIME subtype of a data URI: `"data:image/png;base64,..."` → `"png"`.
///
/// The MIME type ends at the first `;` or `,`; the subtype is whatever
/// follows its `/`. A `/` inside the payload never counts.
pub fn image_extension(data: &str) -> Result<String, DataUriError> {
    let malformed = || DataUriError::MalformedInput(truncate(data));

    let (_, rest) = data.split_once(':').ok_or_else(malformed)?;
    let mime = &rest[..rest.find([';', ',']).unwrap_or(rest.len())];
    let (_, subtype) = mime.split_once('/').ok_or_else(malformed)?;
    let subtype = subtype.trim();
    if subtype.is_empty() {
        return Err(malformed());
    }
    Ok(subtype.to_string())
}

/// Decode the payload after the first comma and write it to `dir/name.ext`.
///
/// Whitespace inside the payload (line-wrapped base64) is ignored.
///
/// Any existing file at that path is removed first. `overwrite` is accepted
/// for callers that pass it but does not change that behavior.
pub fn save_image(
    dir: &Path,
    data: &str,
    name: &str,
    ext: &str,
    overwrite: bool,
) -> Result<PathBuf, DataUriError> {
    let (_, payload) = data
        .split_once(',')
        .ok_or_else(|| DataUriError::MalformedInput(truncate(data)))?;
    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(payload)?;

    let path = dir.join(format!("{name}.{ext}"));
    if path.exists() {
        tracing::debug!(path = %path.display(), overwrite, "Removing existing file");
        fs::remove_file(&path)?;
    }
    fs::write(&path, &bytes)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved data URI payload");
    Ok(path)
}

/// Keep error messages readable when the input is a multi-megabyte payload.
fn truncate(data: &str) -> String {
    const MAX: usize = 48;
    match data.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &data[..idx]),
        None => data.to_string(),
    }
}
