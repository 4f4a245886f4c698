// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// This is the primary entry point for the Headshot Studio application.
// The lib.rs file serves only as a public API for external consumers.

mod utils;
mod core;
mod processing;
mod generation;
mod commands;

use tracing::{info, debug};
use crate::core::AppState;
use crate::commands::{select_photo, generate_headshot, export_result, session_snapshot};

fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)         // Keep colored output
        .with_writer(std::io::stdout)
        .compact();              // Use compact formatter instead of pretty

    subscriber.init();

    info!("=== Headshot Studio Starting ===");

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .manage(AppState::new())
        .invoke_handler(tauri::generate_handler![
            select_photo,
            generate_headshot,
            export_result,
            session_snapshot,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    debug!("✓ Session state initialized");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}
