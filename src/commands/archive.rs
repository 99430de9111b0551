use super::{lock, DesktopState};
use crate::api::ConceptBackend;
use crate::controller::ArchiveView;
use tauri::State;

#[tauri::command]
pub async fn load_archive(state: State<'_, DesktopState>) -> Result<ArchiveView, String> {
    let pending = lock(&state.archive)?.begin_load();

    let outcome = state.backend.list_archive().await;

    let mut archive = lock(&state.archive)?;
    archive.finish_load(pending, outcome);
    Ok(archive.view().clone())
}
