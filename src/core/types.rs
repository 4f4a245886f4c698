//! Core types shared between the pipeline and the presentation layer.

use std::fmt;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// A byte-accurate encoded raster image plus its MIME tag.
///
/// The bytes are always a complete container (JPEG, PNG, ...) as produced by
/// a standard codec; base64 and `data:` URI forms exist only at the wire and
/// presentation boundaries.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    mime_type: String,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Decodes a base64 payload (no `data:` prefix) into an image.
    pub fn from_base64(data: &str, mime_type: impl Into<String>) -> Result<Self, base64::DecodeError> {
        Ok(Self::new(BASE64.decode(data)?, mime_type))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload sent to the generation service: the raw bytes with
    /// no transport prefix.
    pub fn base64_payload(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// Renders the image as a `data:` URI for the presentation layer.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_payload())
    }
}

// The derived Debug would dump the full byte buffer into logs.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The current node of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Uploaded,
    Processing,
    Succeeded,
    Failed,
}

/// Serializable projection of the session for the frontend.
///
/// Images travel as `data:` URIs so the frontend can bind them straight into
/// an `<img>` element.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Current phase (idle, uploaded, processing, succeeded, failed)
    pub phase: Phase,
    /// The photo the user selected, if any
    pub original_image: Option<String>,
    /// The generated headshot, present only in the succeeded phase
    pub result_image: Option<String>,
    /// Human-readable failure message, present only in the failed phase
    pub error_message: Option<String>,
}
