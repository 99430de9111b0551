//! Scripted backend shared by the controller tests.

use crate::api::{ApiError, ConceptBackend};
use crate::models::{ArchiveReceipt, ConceptResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type Reply<T> = Result<T, (u16, String)>;

#[derive(Default)]
pub struct FakeBackend {
    generate_replies: Mutex<VecDeque<Reply<ConceptResult>>>,
    save_replies: Mutex<VecDeque<Reply<ArchiveReceipt>>>,
    list_replies: Mutex<VecDeque<Reply<Vec<ConceptResult>>>>,
    pub prompts: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<ConceptResult>>,
    pub list_calls: Mutex<usize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_generate(self, reply: Reply<ConceptResult>) -> Self {
        self.generate_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_save(self, reply: Reply<ArchiveReceipt>) -> Self {
        self.save_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_list(self, reply: Reply<Vec<ConceptResult>>) -> Self {
        self.list_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn saved(&self) -> Vec<ConceptResult> {
        self.saved.lock().unwrap().clone()
    }
}

fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Result<T, ApiError> {
    match queue.lock().unwrap().pop_front() {
        Some(Ok(value)) => Ok(value),
        Some(Err((status, message))) => Err(ApiError::status(status, message)),
        None => Err(ApiError::Parse("no scripted reply".into())),
    }
}

#[async_trait]
impl ConceptBackend for FakeBackend {
    async fn generate(&self, prompt: &str) -> Result<ConceptResult, ApiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        next(&self.generate_replies)
    }

    async fn save(&self, concept: &ConceptResult) -> Result<ArchiveReceipt, ApiError> {
        self.saved.lock().unwrap().push(concept.clone());
        next(&self.save_replies)
    }

    async fn list_archive(&self) -> Result<Vec<ConceptResult>, ApiError> {
        *self.list_calls.lock().unwrap() += 1;
        next(&self.list_replies)
    }
}

pub fn concept(prompt: &str, text: &str, urls: &[&str]) -> ConceptResult {
    ConceptResult {
        prompt: prompt.to_string(),
        flowise_response: text.to_string(),
        gemini_image_urls: urls.iter().map(|u| u.to_string()).collect(),
        timestamp: None,
        id: None,
    }
}

pub fn archived(id: i64, prompt: &str, text: &str, urls: &[&str], timestamp: &str) -> ConceptResult {
    ConceptResult {
        timestamp: Some(timestamp.to_string()),
        id: Some(id),
        ..concept(prompt, text, urls)
    }
}
