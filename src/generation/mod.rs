//! Request construction and response parsing for the remote generation
//! service.
//!
//! # Architecture
//!
//! - [`GenerationClient`]: Per-request client; builds the two-part payload
//!   (inline photo, then instruction), sends it, extracts the first inline
//!   image of the first candidate.
//! - [`wire`]: Serde types mirroring the generateContent contract.

mod client;
pub mod wire;

pub use client::{GENERATION_MODEL, GenerationClient, HEADSHOT_INSTRUCTION};
