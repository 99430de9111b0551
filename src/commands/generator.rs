use super::{lock, DesktopState};
use crate::api::ConceptBackend;
use crate::controller::GeneratorView;
use serde::Serialize;
use tauri::State;

#[derive(Clone, Serialize)]
pub struct GeneratorResponse {
    view: GeneratorView,
    /// Blocking notices for the page to `alert()`.
    notices: Vec<String>,
}

#[tauri::command]
pub async fn generate_concept(
    state: State<'_, DesktopState>,
    prompt: String,
) -> Result<GeneratorResponse, String> {
    let pending = {
        let mut gen = lock(&state.generator)?;
        match gen.begin_generate(&prompt) {
            Ok(pending) => pending,
            Err(e) => {
                return Ok(GeneratorResponse {
                    view: gen.view().clone(),
                    notices: vec![e.to_string()],
                })
            }
        }
    };

    let outcome = state.backend.generate(pending.prompt()).await;

    let mut gen = lock(&state.generator)?;
    gen.finish_generate(pending, outcome);
    Ok(GeneratorResponse {
        view: gen.view().clone(),
        notices: Vec::new(),
    })
}

#[tauri::command]
pub fn copy_concept_text(state: State<'_, DesktopState>) -> Result<Vec<String>, String> {
    let gen = lock(&state.generator)?;
    let mut clipboard = lock(&state.clipboard)?;
    let mut notices: Vec<String> = Vec::new();
    // No terminal behind the webview, so there is nothing to fall back to.
    gen.copy_text(&mut *clipboard, None, &mut notices);
    Ok(notices)
}

#[tauri::command]
pub async fn save_concept(state: State<'_, DesktopState>) -> Result<GeneratorResponse, String> {
    let pending = {
        let mut gen = lock(&state.generator)?;
        match gen.begin_save() {
            Ok(pending) => pending,
            Err(e) => {
                return Ok(GeneratorResponse {
                    view: gen.view().clone(),
                    notices: vec![e.to_string()],
                })
            }
        }
    };

    let outcome = state.backend.save(pending.concept()).await;

    let mut gen = lock(&state.generator)?;
    let mut notices: Vec<String> = Vec::new();
    gen.finish_save(pending, outcome, &mut notices);
    Ok(GeneratorResponse {
        view: gen.view().clone(),
        notices,
    })
}
