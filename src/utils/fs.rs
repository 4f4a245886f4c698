use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use crate::core::EncodedImage;
use crate::utils::{StudioError, StudioResult};

/// Fixed name for exported headshots.
///
/// The `.png` extension is kept regardless of the MIME type the service
/// returned; the service replies with PNG in practice.
pub const EXPORT_FILE_NAME: &str = "professional-avatar.png";

/// Writes the result image into `dest_dir` under [`EXPORT_FILE_NAME`].
///
/// Creates the directory when it does not exist yet and returns the full
/// path of the written file.
pub async fn write_export(dest_dir: impl AsRef<Path>, image: &EncodedImage) -> StudioResult<PathBuf> {
    let dest_dir = dest_dir.as_ref();

    fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| StudioError::io(format!("Cannot create export directory: {e}")))?;

    let path = dest_dir.join(EXPORT_FILE_NAME);
    fs::write(&path, image.bytes())
        .await
        .map_err(|e| StudioError::io(format!("Failed to write '{}': {e}", path.display())))?;

    debug!("Wrote {} bytes to '{}'", image.bytes().len(), path.display());
    Ok(path)
}
