//! MIME tagging for user-selected photos.
//!
//! The loader performs no validation: an unrecognized payload is tagged with
//! a generic MIME type and left for the decoder or the remote service to
//! reject.

use std::path::Path;
use image::ImageFormat;

/// MIME tag applied when neither the bytes nor the extension are recognized.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Best-effort MIME detection for an encoded raster image.
///
/// Sniffs the magic bytes first (container formats are self-describing),
/// then falls back to the file extension.
pub fn detect_mime(bytes: &[u8], path: &Path) -> String {
    image::guess_format(bytes)
        .ok()
        .or_else(|| extension_format(path))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|| FALLBACK_MIME.to_string())
}

fn extension_format(path: &Path) -> Option<ImageFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
}
