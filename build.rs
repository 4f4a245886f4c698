fn main() {
    // Tauri build embeds Windows resources (icons) if RC.EXE is available.
    tauri_build::build()
}
