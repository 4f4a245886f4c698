//! Tauri command handlers for the headshot session.

use std::path::Path;
use tauri::Emitter;
use tauri::State;
use tracing::{debug, info, warn};

use crate::core::{AppState, EncodedImage, SessionSnapshot};
use crate::generation::GenerationClient;
use crate::processing::{load_encoded_image, prepare_for_generation};
use crate::utils::{StudioError, StudioResult, write_export};

/// Event carrying a fresh [`SessionSnapshot`] on every phase change, so the
/// frontend can re-render without polling.
const SESSION_EVENT: &str = "session-update";

fn emit_snapshot(app: &tauri::AppHandle, snapshot: &SessionSnapshot) {
    let _ = app.emit(SESSION_EVENT, snapshot.clone());
}

/// Loads a user-selected photo and resets the session around it.
///
/// Any previous result or error is cleared; the session moves to the
/// uploaded phase regardless of where it was.
///
/// # Arguments
/// * `app` - Tauri app handle for event emission
/// * `state` - Application state holding the session
/// * `path` - Path to the photo the user picked
///
/// # Returns
/// The updated session snapshot. Fails with `UnreadableFile` when the file
/// cannot be read, leaving the session untouched.
#[tauri::command]
pub async fn select_photo(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
    path: String,
) -> StudioResult<SessionSnapshot> {
    debug!("Received select_photo command for '{path}'");
    let image = load_encoded_image(Path::new(&path)).await?;

    let mut session = state.session();
    session.select(image);
    let snapshot = session.snapshot();
    emit_snapshot(&app, &snapshot);
    Ok(snapshot)
}

/// Runs one generation attempt: downscale, request, response.
///
/// This is the top-level generate trigger. Every failure on the pipeline —
/// resize, missing credential, transport, unusable response — is folded
/// into the failed phase with a human-readable message; the command itself
/// returns `Ok` so the session never crashes over a failed attempt. Calling
/// it while an attempt is in flight (or before any photo is loaded) is a
/// no-op that returns the current snapshot.
#[tauri::command]
pub async fn generate_headshot(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
) -> StudioResult<SessionSnapshot> {
    let original = {
        let mut session = state.session();
        let Some(original) = session.begin_processing() else {
            debug!(
                "generate_headshot ignored in phase {:?}",
                session.phase()
            );
            return Ok(session.snapshot());
        };
        emit_snapshot(&app, &session.snapshot());
        original
    };

    info!("Generation attempt started ({} bytes)", original.bytes().len());
    let outcome = run_generation(original).await;
    match &outcome {
        Ok(result) => info!("Generation succeeded ({} bytes)", result.bytes().len()),
        Err(err) => warn!("Headshot generation failed: {err}"),
    }

    let mut session = state.session();
    session.complete(outcome);
    let snapshot = session.snapshot();
    emit_snapshot(&app, &snapshot);
    Ok(snapshot)
}

/// Saves the generated headshot under the fixed export name.
///
/// # Arguments
/// * `state` - Application state holding the session
/// * `dest_dir` - Directory the user picked via the save dialog
///
/// # Returns
/// The path of the written file, or `None` when there is no result to
/// export (the command is a no-op then).
#[tauri::command]
pub async fn export_result(
    state: State<'_, AppState>,
    dest_dir: String,
) -> StudioResult<Option<String>> {
    let result = state.session().result().cloned();
    let Some(image) = result else {
        debug!("export_result called without a result; nothing to do");
        return Ok(None);
    };

    let path = write_export(&dest_dir, &image).await?;
    info!("Exported headshot to '{}'", path.display());
    Ok(Some(path.to_string_lossy().to_string()))
}

/// Read access for the presentation layer.
#[tauri::command]
pub fn session_snapshot(state: State<'_, AppState>) -> SessionSnapshot {
    state.session().snapshot()
}

/// Downscale + re-encode, then one request to the generation service.
///
/// The resize must finish before the request is built; both suspensions run
/// in sequence. Decode and re-encode are CPU-bound, so they run on the
/// blocking pool.
async fn run_generation(original: EncodedImage) -> StudioResult<EncodedImage> {
    let prepared = tokio::task::spawn_blocking(move || prepare_for_generation(&original))
        .await
        .map_err(|e| StudioError::image(format!("Resize task panicked: {e}")))??;

    // Built per request: a missing credential fails this attempt only.
    let client = GenerationClient::from_env()?;
    client.generate(&prepared).await
}
