//! Archive page: one fetch on load, rendered as a grid of cards.

use super::{Applied, FetchPhase, RequestSequencer, Ticket};
use crate::api::{ApiError, ConceptBackend};
use crate::models::ConceptResult;
use crate::render::html::{self, escape, Tone};
use crate::render::{timestamp, TextRenderer};
use crate::view::Region;
use serde::Serialize;

pub const LOADING_MESSAGE: &str = "Loading archived concepts...";
pub const EMPTY_MESSAGE: &str = "No concepts have been archived yet.";
pub const NO_IMAGE_LABEL: &str = "No image";
pub const NO_TEXT_MESSAGE: &str = "No detailed concept text.";

/// One rendered archive entry, in the order the backend returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveCard {
    pub key: String,
    pub prompt: String,
    pub image_url: Option<String>,
    pub body_html: String,
    pub archived_at: String,
}

impl ArchiveCard {
    pub fn from_concept(concept: &ConceptResult, renderer: TextRenderer) -> Self {
        let key = match concept.id {
            Some(id) => format!("concept-{}", id),
            None => format!(
                "{}|{}",
                concept.timestamp.as_deref().unwrap_or_default(),
                concept.prompt
            ),
        };
        let body_html = if concept.has_text() {
            renderer.render(&concept.flowise_response)
        } else {
            format!(r#"<p class="text-slate-400">{}</p>"#, NO_TEXT_MESSAGE)
        };
        let archived_at = concept
            .timestamp
            .as_deref()
            .map(timestamp::human_readable)
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            key,
            prompt: concept.prompt.clone(),
            image_url: concept.first_image().map(str::to_string),
            body_html,
            archived_at,
        }
    }

    pub fn to_html(&self) -> String {
        let image = match &self.image_url {
            Some(url) => format!(
                r#"<img class="w-full aspect-video object-cover rounded-xl border border-slate-700" src="{}" alt="Visualization for {}" loading="lazy">"#,
                escape(url),
                escape(&self.prompt)
            ),
            None => format!(
                r#"<div class="w-full bg-slate-700 aspect-video rounded-xl flex items-center justify-center"><p class="text-slate-500 text-sm">{}</p></div>"#,
                NO_IMAGE_LABEL
            ),
        };
        let prompt = escape(&self.prompt);
        format!(
            concat!(
                r#"<div class="flex flex-col gap-3 pb-3 bg-slate-800 p-4 rounded-lg shadow-lg" data-key="{key}">"#,
                "{image}",
                "<div>",
                r#"<h3 class="text-slate-100 text-base font-semibold leading-tight truncate mb-1" title="{prompt}">Prompt: {prompt}</h3>"#,
                r#"<div class="text-slate-300 text-sm max-h-32 overflow-y-auto prose prose-sm prose-invert max-w-none mb-2 border border-slate-700 p-2 rounded bg-slate-900">{body}</div>"#,
                r#"<p class="text-slate-500 text-xs mt-1">Archived: {archived}</p>"#,
                "</div></div>"
            ),
            key = escape(&self.key),
            image = image,
            prompt = prompt,
            body = self.body_html,
            archived = escape(&self.archived_at),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveView {
    pub phase: FetchPhase,
    pub grid: Region,
    pub cards: Vec<ArchiveCard>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PendingLoad {
    ticket: Ticket,
}

pub struct ArchiveController {
    renderer: TextRenderer,
    sequencer: RequestSequencer,
    view: ArchiveView,
}

impl ArchiveController {
    pub fn new(renderer: TextRenderer) -> Self {
        Self {
            renderer,
            sequencer: RequestSequencer::default(),
            view: ArchiveView::default(),
        }
    }

    pub fn view(&self) -> &ArchiveView {
        &self.view
    }

    pub fn begin_load(&mut self) -> PendingLoad {
        let ticket = self.sequencer.issue();
        self.view.phase = FetchPhase::Loading;
        self.view.error = None;
        self.view.cards.clear();
        self.view.grid.set(html::grid_message(LOADING_MESSAGE, Tone::Info));
        PendingLoad { ticket }
    }

    pub fn finish_load(
        &mut self,
        pending: PendingLoad,
        outcome: Result<Vec<ConceptResult>, ApiError>,
    ) -> Applied {
        if !self.sequencer.is_current(pending.ticket) {
            tracing::debug!(ticket = pending.ticket.value(), "Discarding stale archive response");
            return Applied::Stale;
        }

        match outcome {
            Ok(concepts) if concepts.is_empty() => {
                self.view.phase = FetchPhase::Success;
                self.view.grid.set(html::grid_message(EMPTY_MESSAGE, Tone::Info));
            }
            Ok(concepts) => {
                let cards: Vec<ArchiveCard> = concepts
                    .iter()
                    .map(|c| ArchiveCard::from_concept(c, self.renderer))
                    .collect();
                self.view.phase = FetchPhase::Success;
                self.view.grid.set(cards.iter().map(ArchiveCard::to_html).collect::<String>());
                self.view.cards = cards;
                tracing::info!(count = self.view.cards.len(), "Archive loaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching archive");
                let message = e.to_string();
                self.view.phase = FetchPhase::Failure;
                self.view.grid.set(html::grid_message(
                    &format!("Error loading archive: {}", message),
                    Tone::Error,
                ));
                self.view.error = Some(message);
            }
        }
        Applied::Applied
    }

    pub async fn load<B>(&mut self, backend: &B) -> Applied
    where
        B: ConceptBackend + ?Sized,
    {
        let pending = self.begin_load();
        let outcome = backend.list_archive().await;
        self.finish_load(pending, outcome)
    }
}

impl Default for ArchiveController {
    fn default() -> Self {
        Self::new(TextRenderer::default())
    }
}
