//! Downscale and recompression applied to every photo before upload.
//!
//! Bounds the request payload and the model's input resolution:
//! deterministic output for a given photo since the edge limit and JPEG
//! quality are fixed.

use std::io::Cursor;

use image::GenericImageView;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::debug;

use crate::core::EncodedImage;
use crate::utils::{StudioError, StudioResult};

/// Longest edge allowed into a generation request.
pub const MAX_EDGE: u32 = 1024;

/// JPEG quality for the re-encoded upload.
pub const JPEG_QUALITY: u8 = 85;

/// Decodes `image`, scales it down to fit [`MAX_EDGE`] and re-encodes it as
/// JPEG at [`JPEG_QUALITY`].
///
/// Scaling is uniform: only the longer axis is actively clamped, the other
/// follows proportionally. Photos already within bounds keep their
/// dimensions but still go through the lossy re-encode.
///
/// CPU-bound and synchronous; callers run it under `spawn_blocking`.
pub fn prepare_for_generation(image: &EncodedImage) -> StudioResult<EncodedImage> {
    let decoded = image::load_from_memory(image.bytes())
        .map_err(|e| StudioError::image(format!("Failed to decode photo: {e}")))?;

    let (width, height) = decoded.dimensions();
    let scaled = if width.max(height) > MAX_EDGE {
        // resize() picks the largest dimensions that fit the bounding box
        // while preserving aspect ratio, so the longest edge lands on
        // MAX_EDGE exactly.
        decoded.resize(MAX_EDGE, MAX_EDGE, FilterType::Lanczos3)
    } else {
        decoded
    };

    let (out_w, out_h) = scaled.dimensions();
    debug!("Prepared photo: {width}×{height} → {out_w}×{out_h}, JPEG q{JPEG_QUALITY}");

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    // JPEG has no alpha channel; flatten before encoding
    scaled
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| StudioError::image(format!("Failed to re-encode photo: {e}")))?;

    Ok(EncodedImage::new(buf.into_inner(), "image/jpeg"))
}
