//! Reads user-selected photos into memory.

use std::path::Path;
use tracing::debug;

use crate::core::EncodedImage;
use crate::utils::{StudioError, StudioResult, detect_mime};

/// Loads the file at `path` into an [`EncodedImage`].
///
/// No type or size validation happens here: anything readable is accepted
/// and tagged with a best-effort MIME type. Bad payloads fail later, at
/// decode time or at the remote service.
///
/// # Errors
/// [`StudioError::UnreadableFile`] when the file cannot be read.
pub async fn load_encoded_image(path: &Path) -> StudioResult<EncodedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StudioError::unreadable_file(format!("{}: {e}", path.display())))?;

    let mime = detect_mime(&bytes, path);
    debug!("Loaded '{}': {} bytes, {}", path.display(), bytes.len(), mime);

    Ok(EncodedImage::new(bytes, mime))
}
