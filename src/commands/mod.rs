pub mod archive;
pub mod generator;

use crate::api::{ApiError, HttpBackend};
use crate::clipboard::SystemClipboard;
use crate::config::Settings;
use crate::controller::{ArchiveController, GeneratorController};
use crate::render::TextRenderer;
use std::sync::{Mutex, MutexGuard};

/// Controllers shared by all webview commands. Locks are never held across
/// a backend call; the sequence tickets sort out overlapping requests.
///
/// The clipboard lives as long as the window: on X11 and Wayland the copied
/// text is served by its handle.
pub struct DesktopState {
    pub backend: HttpBackend,
    pub generator: Mutex<GeneratorController>,
    pub archive: Mutex<ArchiveController>,
    pub clipboard: Mutex<SystemClipboard>,
}

impl DesktopState {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let renderer = TextRenderer::detect(settings.prefer_markdown);
        tracing::info!(api_url = %settings.api_url, ?renderer, "Desktop shell starting");
        Ok(Self {
            backend: HttpBackend::from_settings(settings)?,
            generator: Mutex::new(GeneratorController::new(renderer, settings.on_failure)),
            archive: Mutex::new(ArchiveController::new(renderer)),
            clipboard: Mutex::new(SystemClipboard::new()),
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    mutex.lock().map_err(|e| e.to_string())
}
