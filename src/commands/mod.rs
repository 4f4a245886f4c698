//! Tauri command handlers for the frontend.
//!
//! This module exposes the session triggers the presentation layer may
//! invoke:
//! - [`select_photo`]: Load a photo and reset the session
//! - [`generate_headshot`]: Run one generation attempt
//! - [`export_result`]: Save the result under the fixed export name
//! - [`session_snapshot`]: Read the current session state

mod session;

pub use session::*;
