//! The session state machine driving the UI.
//!
//! One linear flow per attempt: upload → processing → result or error. The
//! session is a single tagged variant so that illegal combinations (a
//! processing phase without a photo, a result alongside an error) cannot be
//! constructed.

use tracing::debug;

use crate::core::types::{EncodedImage, Phase, SessionSnapshot};
use crate::utils::{StudioError, StudioResult};

/// Shown when a failure carries no message of its own.
const GENERIC_FAILURE_MESSAGE: &str = "Headshot generation failed. Please try again.";

/// Single source of truth for the UI.
///
/// Only the latest attempt is kept; re-running generate on the same photo
/// overwrites the previous result or error.
#[derive(Debug, Clone)]
pub enum Session {
    /// No photo selected yet
    Idle,
    /// Photo loaded, not yet processed
    Uploaded { original: EncodedImage },
    /// A generation request is in flight
    Processing { original: EncodedImage },
    /// Terminal per attempt: the service returned a headshot
    Succeeded {
        original: EncodedImage,
        result: EncodedImage,
    },
    /// Terminal per attempt: the attempt failed with a user-facing message
    Failed {
        original: EncodedImage,
        error: String,
    },
}

impl Session {
    pub fn new() -> Self {
        Session::Idle
    }

    pub fn phase(&self) -> Phase {
        match self {
            Session::Idle => Phase::Idle,
            Session::Uploaded { .. } => Phase::Uploaded,
            Session::Processing { .. } => Phase::Processing,
            Session::Succeeded { .. } => Phase::Succeeded,
            Session::Failed { .. } => Phase::Failed,
        }
    }

    /// Loads a freshly selected photo.
    ///
    /// Legal from every phase; any previous result or error is gone by
    /// construction since `Uploaded` carries only the new photo.
    pub fn select(&mut self, image: EncodedImage) {
        *self = Session::Uploaded { original: image };
    }

    /// Starts a generation attempt and hands back the photo to process.
    ///
    /// Returns `None` when there is nothing to process (`Idle`) or an
    /// attempt is already in flight (`Processing`) — the in-flight phase is
    /// the mutual-exclusion gate, so rapid repeated triggers are no-ops.
    /// Re-running after a terminal phase is a fresh attempt: the previous
    /// result or error is cleared on entry.
    pub fn begin_processing(&mut self) -> Option<EncodedImage> {
        match std::mem::replace(self, Session::Idle) {
            Session::Idle => None,
            Session::Processing { original } => {
                // Already in flight; put the state back untouched.
                *self = Session::Processing { original };
                None
            }
            Session::Uploaded { original }
            | Session::Succeeded { original, .. }
            | Session::Failed { original, .. } => {
                *self = Session::Processing {
                    original: original.clone(),
                };
                Some(original)
            }
        }
    }

    /// Applies the outcome of a finished attempt.
    ///
    /// Only honored while still `Processing`: when the user selected a new
    /// photo mid-flight, the stale outcome is dropped and the newer state
    /// wins.
    pub fn complete(&mut self, outcome: StudioResult<EncodedImage>) {
        match std::mem::replace(self, Session::Idle) {
            Session::Processing { original } => {
                *self = match outcome {
                    Ok(result) => Session::Succeeded { original, result },
                    Err(err) => Session::Failed {
                        original,
                        error: failure_message(&err),
                    },
                };
            }
            other => {
                debug!("Dropping stale generation outcome in phase {:?}", other.phase());
                *self = other;
            }
        }
    }

    pub fn original(&self) -> Option<&EncodedImage> {
        match self {
            Session::Idle => None,
            Session::Uploaded { original }
            | Session::Processing { original }
            | Session::Succeeded { original, .. }
            | Session::Failed { original, .. } => Some(original),
        }
    }

    pub fn result(&self) -> Option<&EncodedImage> {
        match self {
            Session::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Session::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            original_image: self.original().map(|i| i.to_data_uri()),
            result_image: self.result().map(|i| i.to_data_uri()),
            error_message: self.error_message().map(str::to_string),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn failure_message(err: &StudioError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> EncodedImage {
        EncodedImage::new(vec![1, 2, 3], "image/jpeg")
    }

    fn result_image() -> EncodedImage {
        EncodedImage::new(vec![9, 8, 7], "image/png")
    }

    #[test]
    fn select_moves_to_uploaded() {
        let mut session = Session::new();
        session.select(photo());

        assert_eq!(session.phase(), Phase::Uploaded);
        assert!(session.original().is_some());
        assert!(session.result().is_none());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn generate_is_noop_without_photo() {
        let mut session = Session::new();
        assert!(session.begin_processing().is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn generate_is_noop_while_processing() {
        let mut session = Session::new();
        session.select(photo());
        assert!(session.begin_processing().is_some());

        // Rapid repeated trigger: ignored, phase unchanged
        assert!(session.begin_processing().is_none());
        assert_eq!(session.phase(), Phase::Processing);
    }

    #[test]
    fn success_stores_result() {
        let mut session = Session::new();
        session.select(photo());
        session.begin_processing();
        session.complete(Ok(result_image()));

        assert_eq!(session.phase(), Phase::Succeeded);
        assert_eq!(session.result(), Some(&result_image()));
        assert!(session.error_message().is_none());
    }

    #[test]
    fn failure_stores_message_and_clears_result() {
        let mut session = Session::new();
        session.select(photo());
        session.begin_processing();
        session.complete(Err(StudioError::service("boom")));

        assert_eq!(session.phase(), Phase::Failed);
        assert!(session.result().is_none());
        assert_eq!(
            session.error_message(),
            Some("Generation service error: boom")
        );
    }

    #[test]
    fn rerun_after_failure_clears_error_on_entry() {
        let mut session = Session::new();
        session.select(photo());
        session.begin_processing();
        session.complete(Err(StudioError::NoImageProduced));
        assert_eq!(session.phase(), Phase::Failed);

        // Same photo, fresh attempt
        let original = session.begin_processing().expect("retry must start");
        assert_eq!(original, photo());
        assert_eq!(session.phase(), Phase::Processing);
        assert!(session.error_message().is_none());

        session.complete(Ok(result_image()));
        assert_eq!(session.phase(), Phase::Succeeded);
    }

    #[test]
    fn new_photo_after_success_clears_result_and_error() {
        let mut session = Session::new();
        session.select(photo());
        session.begin_processing();
        session.complete(Ok(result_image()));
        assert_eq!(session.phase(), Phase::Succeeded);

        session.select(EncodedImage::new(vec![4, 4], "image/png"));

        assert_eq!(session.phase(), Phase::Uploaded);
        assert!(session.result().is_none());
        assert!(session.error_message().is_none());
    }

    #[test]
    fn stale_outcome_is_dropped_after_new_selection() {
        let mut session = Session::new();
        session.select(photo());
        session.begin_processing();

        // User picks a new photo while the request is in flight
        let newer = EncodedImage::new(vec![5, 5, 5], "image/png");
        session.select(newer.clone());

        session.complete(Ok(result_image()));

        assert_eq!(session.phase(), Phase::Uploaded);
        assert_eq!(session.original(), Some(&newer));
        assert!(session.result().is_none());
    }

    #[test]
    fn snapshot_reflects_phase_and_images() {
        let mut session = Session::new();
        session.select(photo());
        session.begin_processing();
        session.complete(Ok(result_image()));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Succeeded);
        assert!(snapshot.original_image.unwrap().starts_with("data:image/jpeg;base64,"));
        assert!(snapshot.result_image.unwrap().starts_with("data:image/png;base64,"));
        assert!(snapshot.error_message.is_none());
    }
}
