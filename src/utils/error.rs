//! Error types for the headshot studio.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use serde::Serialize;
use thiserror::Error;

/// Main error type for the application.
///
/// All errors are converted to this type before being returned to the
/// frontend. Failures on the generation path (resize, request, response
/// parsing) are additionally folded into the session's `Failed` phase by the
/// generate command rather than surfaced as command errors.
#[derive(Error, Debug, Serialize)]
pub enum StudioError {
    /// The generation credential is not configured.
    ///
    /// Checked when a request is attempted, never at startup, so a missing
    /// key fails the attempt and nothing else.
    #[error("Generation API key is not configured. Set GEMINI_API_KEY and try again.")]
    MissingCredential,

    /// The selected photo could not be read from disk
    #[error("Could not read photo: {0}")]
    UnreadableFile(String),

    /// Decoding or re-encoding the photo failed
    #[error("Image processing error: {0}")]
    Image(String),

    /// Transport-level or service-side failure, message passed through
    #[error("Generation service error: {0}")]
    Service(String),

    /// The service answered but no candidate carried an inline image
    #[error("The model did not return an image. Try again or use a different photo.")]
    NoImageProduced,

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenience result type for studio operations.
pub type StudioResult<T> = Result<T, StudioError>;

// Helper methods for error creation
impl StudioError {
    pub fn unreadable_file<T: Into<String>>(msg: T) -> Self {
        Self::UnreadableFile(msg.into())
    }

    pub fn image<T: Into<String>>(msg: T) -> Self {
        Self::Image(msg.into())
    }

    pub fn service<T: Into<String>>(msg: T) -> Self {
        Self::Service(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::Io(msg.into())
    }
}

// Convert std::io::Error to StudioError
impl From<io::Error> for StudioError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Transport errors surface with reqwest's own message intact
impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        Self::Service(err.to_string())
    }
}

impl From<image::ImageError> for StudioError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}
