use serde::{Deserialize, Deserializer, Serialize};

/// A generated concept as returned by `/api/generate`, or an archived one as
/// returned by `GET /api/archive` (the latter also carries `timestamp` and `id`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ConceptResult {
    pub prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flowise_response: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gemini_image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl ConceptResult {
    pub fn has_text(&self) -> bool {
        !self.flowise_response.is_empty()
    }

    pub fn first_image(&self) -> Option<&str> {
        self.gemini_image_urls.first().map(String::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Error body carried by non-2xx responses. Either field may be missing.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ArchiveReceipt {
    pub message: Option<String>,
    pub id: Option<i64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
