//! Generator page: prompt in, rendered concept out, plus copy and save.

use super::{Applied, FetchPhase, RequestSequencer, Ticket};
use crate::api::{ApiError, ConceptBackend};
use crate::models::{ArchiveReceipt, ConceptResult};
use crate::render::html::{self, Tone};
use crate::render::TextRenderer;
use crate::view::{Clipboard, Control, Notifier, Region};
use serde::Serialize;

pub const GENERATING_MESSAGE: &str = "Generating concept... Please wait.";
pub const NO_TEXT_MESSAGE: &str = "No text generated.";
pub const NO_IMAGES_MESSAGE: &str = "No visualizations generated.";
pub const COPIED_MESSAGE: &str = "Concept text copied to clipboard!";
pub const COPIED_FALLBACK_MESSAGE: &str = "Concept text copied to clipboard (fallback method)!";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy text. Please try again or copy manually.";
pub const NOTHING_TO_COPY_MESSAGE: &str = "No concept text available to copy.";
pub const SAVED_MESSAGE: &str = "Concept saved to archive!";

const IMAGE_ALT: &str = "Generated visualization";

/// What happens to the previous concept when a generation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Earlier result stays in memory (copy/save controls are still disabled).
    #[default]
    KeepPrevious,
    Clear,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Please enter a concept prompt.")]
    Empty,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SaveError {
    #[error("No concept data to save. Please generate a concept first.")]
    NothingToSave,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorView {
    pub phase: FetchPhase,
    pub detail: Region,
    pub visualizations: Region,
    pub generate: Control,
    pub copy: Control,
    pub save: Control,
    /// Message of the last failed generation, if the last one failed.
    pub error: Option<String>,
}

impl Default for GeneratorView {
    fn default() -> Self {
        Self {
            phase: FetchPhase::Idle,
            detail: Region::default(),
            visualizations: Region::default(),
            generate: Control::enabled(),
            copy: Control::disabled(),
            save: Control::disabled(),
            error: None,
        }
    }
}

/// A generate request that has been started but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingGenerate {
    ticket: Ticket,
    prompt: String,
}

impl PendingGenerate {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

#[derive(Debug, Clone)]
pub struct PendingSave {
    concept: ConceptResult,
}

impl PendingSave {
    pub fn concept(&self) -> &ConceptResult {
        &self.concept
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateOutcome {
    Rejected,
    Applied,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied,
    CopiedWithFallback,
    Failed,
    NothingToCopy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    Failed,
    NothingToSave,
}

pub struct GeneratorController {
    renderer: TextRenderer,
    policy: FailurePolicy,
    current: Option<ConceptResult>,
    sequencer: RequestSequencer,
    view: GeneratorView,
}

impl GeneratorController {
    pub fn new(renderer: TextRenderer, policy: FailurePolicy) -> Self {
        Self {
            renderer,
            policy,
            current: None,
            sequencer: RequestSequencer::default(),
            view: GeneratorView::default(),
        }
    }

    pub fn view(&self) -> &GeneratorView {
        &self.view
    }

    /// The most recent successful generation.
    pub fn current(&self) -> Option<&ConceptResult> {
        self.current.as_ref()
    }

    pub fn set_current(&mut self, concept: Option<ConceptResult>) {
        self.current = concept;
    }

    fn actions_allowed(&self) -> bool {
        self.view.phase == FetchPhase::Success
            && self.current.as_ref().is_some_and(ConceptResult::has_text)
    }

    // ── Generate ──

    pub fn begin_generate(&mut self, input: &str) -> Result<PendingGenerate, PromptError> {
        let prompt = input.trim();
        if prompt.is_empty() {
            return Err(PromptError::Empty);
        }

        let ticket = self.sequencer.issue();
        let view = &mut self.view;
        view.phase = FetchPhase::Loading;
        view.error = None;
        view.detail.set(html::message(GENERATING_MESSAGE, Tone::Info));
        view.visualizations.clear();
        view.generate.start_busy();
        view.copy.settle(false);
        view.save.settle(false);

        tracing::info!(ticket = ticket.value(), prompt_len = prompt.len(), "Generating concept");
        Ok(PendingGenerate {
            ticket,
            prompt: prompt.to_string(),
        })
    }

    pub fn finish_generate(
        &mut self,
        pending: PendingGenerate,
        outcome: Result<ConceptResult, ApiError>,
    ) -> Applied {
        if !self.sequencer.is_current(pending.ticket) {
            tracing::debug!(ticket = pending.ticket.value(), "Discarding stale generate response");
            return Applied::Stale;
        }

        match outcome {
            Ok(concept) => {
                let view = &mut self.view;
                view.phase = FetchPhase::Success;
                if concept.has_text() {
                    view.detail.set(self.renderer.render(&concept.flowise_response));
                } else {
                    view.detail.set(html::message(NO_TEXT_MESSAGE, Tone::Info));
                }
                if concept.gemini_image_urls.is_empty() {
                    view.visualizations.set(html::message(NO_IMAGES_MESSAGE, Tone::Info));
                } else {
                    view.visualizations
                        .set(html::image_grid(&concept.gemini_image_urls, IMAGE_ALT));
                }
                tracing::info!(
                    ticket = pending.ticket.value(),
                    images = concept.gemini_image_urls.len(),
                    "Concept generated"
                );
                self.current = Some(concept);
                let allowed = self.actions_allowed();
                self.view.copy.settle(allowed);
                self.view.save.settle(allowed);
            }
            Err(e) => {
                tracing::error!(ticket = pending.ticket.value(), error = %e, "Error generating concept");
                let message = e.to_string();
                let view = &mut self.view;
                view.phase = FetchPhase::Failure;
                view.detail
                    .set(html::message(&format!("Error: {}", message), Tone::Error));
                view.visualizations.clear();
                view.copy.settle(false);
                view.save.settle(false);
                view.error = Some(message);
                if self.policy == FailurePolicy::Clear {
                    self.current = None;
                }
            }
        }

        self.view.generate.settle(true);
        Applied::Applied
    }

    pub async fn generate<B>(
        &mut self,
        backend: &B,
        input: &str,
        notifier: &mut dyn Notifier,
    ) -> GenerateOutcome
    where
        B: ConceptBackend + ?Sized,
    {
        let pending = match self.begin_generate(input) {
            Ok(pending) => pending,
            Err(e) => {
                notifier.notify(&e.to_string());
                return GenerateOutcome::Rejected;
            }
        };
        let outcome = backend.generate(pending.prompt()).await;
        match self.finish_generate(pending, outcome) {
            Applied::Applied => GenerateOutcome::Applied,
            Applied::Stale => GenerateOutcome::Stale,
        }
    }

    // ── Copy ──

    /// Copies the raw markdown, trying `fallback` when the primary clipboard fails.
    pub fn copy_text(
        &self,
        primary: &mut dyn Clipboard,
        fallback: Option<&mut dyn Clipboard>,
        notifier: &mut dyn Notifier,
    ) -> CopyOutcome {
        let text = match self.current.as_ref().filter(|c| c.has_text()) {
            Some(concept) => concept.flowise_response.as_str(),
            None => {
                notifier.notify(NOTHING_TO_COPY_MESSAGE);
                return CopyOutcome::NothingToCopy;
            }
        };

        let primary_err = match primary.write_text(text) {
            Ok(()) => {
                notifier.notify(COPIED_MESSAGE);
                return CopyOutcome::Copied;
            }
            Err(e) => e,
        };
        tracing::warn!(error = %primary_err, "Failed to copy text");

        if let Some(fallback) = fallback {
            match fallback.write_text(text) {
                Ok(()) => {
                    notifier.notify(COPIED_FALLBACK_MESSAGE);
                    return CopyOutcome::CopiedWithFallback;
                }
                Err(e) => tracing::warn!(error = %e, "Fallback copy failed"),
            }
        }

        notifier.notify(COPY_FAILED_MESSAGE);
        CopyOutcome::Failed
    }

    // ── Save ──

    pub fn begin_save(&mut self) -> Result<PendingSave, SaveError> {
        let concept = self.current.clone().ok_or(SaveError::NothingToSave)?;
        self.view.save.start_busy();
        Ok(PendingSave { concept })
    }

    pub fn finish_save(
        &mut self,
        _pending: PendingSave,
        outcome: Result<ArchiveReceipt, ApiError>,
        notifier: &mut dyn Notifier,
    ) -> SaveOutcome {
        let result = match outcome {
            Ok(receipt) => {
                tracing::info!(id = ?receipt.id, "Concept saved to archive");
                notifier.notify(SAVED_MESSAGE);
                SaveOutcome::Saved
            }
            Err(e) => {
                tracing::error!(error = %e, "Error saving to archive");
                notifier.notify(&format!("Error saving to archive: {}", e));
                SaveOutcome::Failed
            }
        };
        let allowed = self.actions_allowed();
        self.view.save.settle(allowed);
        result
    }

    pub async fn save_to_archive<B>(&mut self, backend: &B, notifier: &mut dyn Notifier) -> SaveOutcome
    where
        B: ConceptBackend + ?Sized,
    {
        let pending = match self.begin_save() {
            Ok(pending) => pending,
            Err(e) => {
                notifier.notify(&e.to_string());
                return SaveOutcome::NothingToSave;
            }
        };
        let outcome = backend.save(pending.concept()).await;
        self.finish_save(pending, outcome, notifier)
    }
}

impl Default for GeneratorController {
    fn default() -> Self {
        Self::new(TextRenderer::default(), FailurePolicy::default())
    }
}
