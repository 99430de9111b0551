pub mod api;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod logging;
pub mod models;
pub mod render;
pub mod view;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(test)]
mod test_support;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init(false);
    let settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };
    if let Err(e) = run_with(settings) {
        tracing::error!(error = %e, "error while running tauri application");
    }
}

/// Open the desktop window with both pages wired to the configured backend.
#[cfg(feature = "desktop")]
pub fn run_with(settings: config::Settings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = commands::DesktopState::new(&settings)?;
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            commands::generator::generate_concept,
            commands::generator::copy_concept_text,
            commands::generator::save_concept,
            commands::archive::load_archive,
        ])
        .run(tauri::generate_context!())
        .map_err(|e| e.to_string())?;
    Ok(())
}
