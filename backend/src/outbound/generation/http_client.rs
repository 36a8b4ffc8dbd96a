//! Reqwest-backed `GenerationClient`.
//!
//! One POST per call to `{endpoint}/models/{model}:generateContent`. No retry.
//! The API key travels in the `x-goog-api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use super::dto::{GenerateContentRequestDto, GenerateContentResponseDto};
use crate::domain::GenerationRequest;
use crate::domain::ports::{GenerationClient, GenerationClientError};

/// Public endpoint of the generative-language API.
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when none is configured.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash-preview-05-20";

const API_KEY_HEADER: &str = "x-goog-api-key";
const BODY_PREVIEW_CHAR_LIMIT: usize = 160;

/// Connection settings for [`GeminiHttpClient`].
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Zeroizing<String>,
    /// Request timeout; the transport default applies when `None`.
    pub timeout: Option<Duration>,
}

/// Failure constructing the client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiClientBuildError {
    #[error("invalid generation endpoint {endpoint:?}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Generation client speaking the `generateContent` JSON protocol.
pub struct GeminiHttpClient {
    client: Client,
    url: Url,
    api_key: Zeroizing<String>,
}

impl GeminiHttpClient {
    /// Build a client for `config`.
    ///
    /// # Errors
    ///
    /// Fails when the endpoint and model do not form a valid URL or the
    /// reqwest client cannot be constructed.
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiClientBuildError> {
        let GeminiConfig {
            endpoint,
            model,
            api_key,
            timeout,
        } = config;
        let raw = format!(
            "{}/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model.trim()
        );
        let url = Url::parse(&raw).map_err(|source| GeminiClientBuildError::Endpoint {
            endpoint: endpoint.clone(),
            source,
        })?;
        let builder = Client::builder();
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        Ok(Self {
            client: builder.build()?,
            url,
            api_key,
        })
    }

    /// Fully resolved request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl GenerationClient for GeminiHttpClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationClientError> {
        let body = GenerateContentRequestDto::from(request);
        let response = self
            .client
            .post(self.url.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        debug!(bytes = bytes.len(), "generation response received");
        parse_first_text(bytes.as_ref())
    }
}

fn parse_first_text(body: &[u8]) -> Result<String, GenerationClientError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        GenerationClientError::missing_candidate(format!("response is not JSON: {error}"))
    })?;
    decoded
        .into_first_text()
        .map_err(GenerationClientError::missing_candidate)
}

fn map_transport_error(error: reqwest::Error) -> GenerationClientError {
    GenerationClientError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GenerationClientError {
    GenerationClientError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact
        .chars()
        .take(BODY_PREVIEW_CHAR_LIMIT)
        .collect::<String>();
    if compact.chars().count() > BODY_PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
