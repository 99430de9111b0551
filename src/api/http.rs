use super::{ApiError, ConceptBackend};
use crate::config::Settings;
use crate::models::{ApiErrorBody, ArchiveReceipt, ConceptResult, GenerateRequest};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Which error-body fields a failed response is mined for, in order.
#[derive(Debug, Clone, Copy)]
enum ErrorFields {
    DetailsThenError,
    ErrorOnly,
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(settings.api_url.clone(), settings.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, req: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, "{what}: sending request");
        let resp = req
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "{what}: transport error");
                ApiError::Transport(e)
            })?;
        tracing::debug!(request_id = %request_id, status = resp.status().as_u16(), "{what}: response");
        Ok(resp)
    }
}

#[async_trait]
impl ConceptBackend for HttpBackend {
    async fn generate(&self, prompt: &str) -> Result<ConceptResult, ApiError> {
        let body = GenerateRequest {
            prompt: prompt.to_string(),
        };
        let req = self
            .client
            .post(self.url("/api/generate"))
            .header("Content-Type", "application/json")
            .json(&body);

        let resp = self.send(req, "generate").await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp, ErrorFields::DetailsThenError).await);
        }
        parse_body(resp).await
    }

    async fn save(&self, concept: &ConceptResult) -> Result<ArchiveReceipt, ApiError> {
        let req = self
            .client
            .post(self.url("/api/archive"))
            .header("Content-Type", "application/json")
            .json(concept);

        let resp = self.send(req, "archive save").await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp, ErrorFields::ErrorOnly).await);
        }
        // Success bodies are informational only.
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }

    async fn list_archive(&self) -> Result<Vec<ConceptResult>, ApiError> {
        let req = self.client.get(self.url("/api/archive"));

        let resp = self.send(req, "archive list").await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp, ErrorFields::ErrorOnly).await);
        }
        parse_body(resp).await
    }
}

async fn parse_body<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

async fn error_from_response(resp: Response, fields: ErrorFields) -> ApiError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
    ApiError::status(status, error_message(status, body, fields))
}

fn error_message(status: u16, body: ApiErrorBody, fields: ErrorFields) -> String {
    let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
    let found = match fields {
        ErrorFields::DetailsThenError => non_empty(body.details).or_else(|| non_empty(body.error)),
        ErrorFields::ErrorOnly => non_empty(body.error),
    };
    found.unwrap_or_else(|| format!("HTTP error! status: {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(error: Option<&str>, details: Option<&str>) -> ApiErrorBody {
        ApiErrorBody {
            error: error.map(String::from),
            details: details.map(String::from),
        }
    }

    #[test]
    fn test_details_preferred_for_generate() {
        let msg = error_message(
            500,
            body(Some("Failed to get valid response from Flowise"), Some("timed out")),
            ErrorFields::DetailsThenError,
        );
        assert_eq!(msg, "timed out");
    }

    #[test]
    fn test_empty_details_falls_through_to_error() {
        let msg = error_message(500, body(Some("overloaded"), Some("")), ErrorFields::DetailsThenError);
        assert_eq!(msg, "overloaded");
    }

    #[test]
    fn test_archive_ignores_details() {
        let msg = error_message(400, body(None, Some("ignored")), ErrorFields::ErrorOnly);
        assert_eq!(msg, "HTTP error! status: 400");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:5001/", None).unwrap();
        assert_eq!(backend.url("/api/archive"), "http://localhost:5001/api/archive");
    }
}
