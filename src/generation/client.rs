//! Per-request client for the remote generation service.
//!
//! The client is constructed lazily on every generate trigger, so a missing
//! credential fails only the attempted operation, never the session. One
//! request per attempt: no timeout, no retry, no streaming — the in-flight
//! `Processing` phase is the caller's only gate.

use tracing::debug;

use crate::core::EncodedImage;
use crate::utils::{StudioError, StudioResult};

use super::wire::{Content, GenerateRequest, GenerateResponse, GenerationConfig, Part};

/// Model identifier, fixed at compile time.
pub const GENERATION_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Instruction sent with every request. Exactly one transformation: studio
/// headshot treatment of the supplied photo.
pub const HEADSHOT_INSTRUCTION: &str = "Transform this photo into a professional studio \
headshot. Replace the background with a clean neutral studio backdrop, apply soft even \
studio lighting to the face, and keep the subject's identity, expression, hairstyle and \
clothing recognizable. If the subject wears glasses, keep them on and remove any lens \
glare. Output a single photorealistic head-and-shoulders portrait.";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const API_BASE_ENV: &str = "GEMINI_API_BASE";

/// Client for one generation request.
pub struct GenerationClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GenerationClient {
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client from the environment.
    ///
    /// The credential is read here, at call time, so its absence surfaces
    /// only when generation is attempted. `GEMINI_API_BASE` overrides the
    /// endpoint for testing against a local stub.
    ///
    /// # Errors
    /// [`StudioError::MissingCredential`] when `GEMINI_API_KEY` is unset or
    /// blank.
    pub fn from_env() -> StudioResult<Self> {
        let api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok())?;

        let api_base = std::env::var(API_BASE_ENV)
            .ok()
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self::new(api_key, api_base))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base, GENERATION_MODEL
        )
    }

    /// Sends the prepared photo plus the fixed instruction and extracts the
    /// generated image.
    ///
    /// Suspends until the service answers or the transport fails; the call
    /// owns no shared state and reports everything through its return value.
    pub async fn generate(&self, image: &EncodedImage) -> StudioResult<EncodedImage> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline(image.mime_type(), image.base64_payload()),
                    Part::text(HEADSHOT_INSTRUCTION),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        debug!(
            "Sending generation request: {} bytes, {}",
            image.bytes().len(),
            image.mime_type()
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StudioError::service(service_message(status, &body)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| StudioError::service(format!("Malformed service response: {e}")))?;

        extract_image(parsed)
    }
}

fn resolve_api_key(raw: Option<String>) -> StudioResult<String> {
    raw.map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(StudioError::MissingCredential)
}

/// Prefers the service's own error message over a bare status line.
fn service_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            let message = value.get("error")?.get("message")?.as_str()?;
            Some(message.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

/// Pulls the generated image out of a response.
///
/// Only the first candidate is consulted, and within it only the first
/// inline-image part; text parts and any later candidates are ignored.
fn extract_image(response: GenerateResponse) -> StudioResult<EncodedImage> {
    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or(StudioError::NoImageProduced)?;

    let inline = content
        .parts
        .into_iter()
        .find_map(|part| part.inline_data)
        .ok_or(StudioError::NoImageProduced)?;

    EncodedImage::from_base64(&inline.data, inline.mime_type)
        .map_err(|_| StudioError::NoImageProduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_candidate_list_produces_no_image() {
        let response = parse(json!({ "candidates": [] }));
        assert!(matches!(
            extract_image(response),
            Err(StudioError::NoImageProduced)
        ));
    }

    #[test]
    fn missing_candidates_field_produces_no_image() {
        let response = parse(json!({}));
        assert!(matches!(
            extract_image(response),
            Err(StudioError::NoImageProduced)
        ));
    }

    #[test]
    fn text_only_candidate_produces_no_image() {
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "sorry, cannot help" } ] } }
            ]
        }));
        assert!(matches!(
            extract_image(response),
            Err(StudioError::NoImageProduced)
        ));
    }

    #[test]
    fn text_part_before_image_is_skipped() {
        let payload = BASE64.encode(b"generated bytes");
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [
                    { "text": "here is your headshot" },
                    { "inlineData": { "mimeType": "image/png", "data": payload } },
                    { "inlineData": { "mimeType": "image/webp", "data": "aWdub3JlZA==" } }
                ] } }
            ]
        }));

        let image = extract_image(response).unwrap();
        assert_eq!(image.bytes(), b"generated bytes");
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn later_candidates_are_ignored() {
        // First candidate has no image: the call fails even though the
        // second one carries data.
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "refused" } ] } },
                { "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "aWdub3JlZA==" } }
                ] } }
            ]
        }));
        assert!(matches!(
            extract_image(response),
            Err(StudioError::NoImageProduced)
        ));
    }

    #[test]
    fn snake_case_inline_data_is_accepted() {
        let payload = BASE64.encode(b"ok");
        let response = parse(json!({
            "candidates": [
                { "content": { "parts": [
                    { "inline_data": { "mimeType": "image/png", "data": payload } }
                ] } }
            ]
        }));
        assert!(extract_image(response).is_ok());
    }

    #[test]
    fn credential_must_be_present_and_non_blank() {
        assert!(matches!(
            resolve_api_key(None),
            Err(StudioError::MissingCredential)
        ));
        assert!(matches!(
            resolve_api_key(Some("   ".to_string())),
            Err(StudioError::MissingCredential)
        ));
        assert_eq!(resolve_api_key(Some(" key ".to_string())).unwrap(), "key");
    }

    #[test]
    fn request_serializes_with_camel_case_wire_names() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline("image/jpeg", "QUJD"),
                    Part::text(HEADSHOT_INSTRUCTION),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        let first_part = &value["contents"][0]["parts"][0];
        assert_eq!(first_part["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(first_part["inlineData"]["data"], "QUJD");
        // The text part must not serialize an empty inlineData field
        assert!(value["contents"][0]["parts"][1].get("inlineData").is_none());
        assert_eq!(value["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn service_message_prefers_body_detail() {
        let body = r#"{ "error": { "code": 429, "message": "Quota exceeded" } }"#;
        assert_eq!(
            service_message(reqwest::StatusCode::TOO_MANY_REQUESTS, body),
            "Quota exceeded"
        );
        assert_eq!(
            service_message(reqwest::StatusCode::BAD_GATEWAY, "<html>"),
            "HTTP 502 Bad Gateway"
        );
    }
}
