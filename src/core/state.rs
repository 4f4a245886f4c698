//! Application state management for Tauri.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::Session;

/// Application state managed by Tauri.
///
/// Holds the single per-run [`Session`]. Commands mutate it only from the
/// trigger handlers and the completion path of the generate command, one
/// writer at a time behind the mutex; the guard is never held across an
/// await point.
pub struct AppState {
    session: Mutex<Session>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(Session::new()),
        }
    }

    /// Locks the session. A poisoned lock is recovered rather than
    /// propagated: the session holds no invariants a panicked writer could
    /// leave half-applied.
    pub fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
