pub mod http;

use crate::models::{ArchiveReceipt, ConceptResult};
use async_trait::async_trait;
use serde::Serialize;

pub use http::HttpBackend;

/// The two backend endpoints the pages talk to. Generation and persistence
/// happen entirely behind this seam.
#[async_trait]
pub trait ConceptBackend: Send + Sync {
    /// `POST /api/generate` with `{prompt}`.
    async fn generate(&self, prompt: &str) -> Result<ConceptResult, ApiError>;

    /// `POST /api/archive` with the full concept as body.
    async fn save(&self, concept: &ConceptResult) -> Result<ArchiveReceipt, ApiError>;

    /// `GET /api/archive`. Order is whatever the backend returns.
    async fn list_archive(&self) -> Result<Vec<ConceptResult>, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response; `message` is already extracted from the body or
    /// derived from the status code.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Parse(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }
}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
