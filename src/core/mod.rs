//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Application state managed by Tauri
//! - [`Session`]: The tagged-variant session state machine
//! - [`EncodedImage`]: Encoded raster bytes plus MIME tag
//! - [`SessionSnapshot`]: Serializable projection for the frontend

mod session;
mod state;
mod types;

pub use session::Session;
pub use state::AppState;
pub use types::{EncodedImage, Phase, SessionSnapshot};
