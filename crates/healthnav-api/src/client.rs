use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retry::{is_retryable_status, with_retry, RetryConfig};
use crate::Result;

const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether a retry has any chance of helping
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::RequestFailed { status, .. } => reqwest::StatusCode::from_u16(*status)
                .map(is_retryable_status)
                .unwrap_or(false),
            ApiError::NotFound(_) | ApiError::Parse(_) => false,
        }
    }
}

/// Payload returned by the backend `/health` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HealthCheck {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub graphdb_connected: bool,
    #[serde(default)]
    pub mongodb_connected: bool,
}

/// Thin JSON client over the navigator backend
///
/// Knows nothing about providers or hospitals - callers pick the endpoint
/// and the type to decode into. Keeps the transport concerns (retries,
/// status mapping, user agent) in one place.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE.to_string())
    }

    /// Point at a non-default backend (staging, local docker, ...)
    pub fn with_base_url(base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("HealthNav/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url,
            retry_config: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(base_url: String, retry_config: RetryConfig) -> Self {
        let mut client = Self::with_base_url(base_url);
        client.retry_config = retry_config;
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json_with_query(path, &[]).await
    }

    /// GET with query parameters attached
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        with_retry(
            &self.retry_config,
            || async {
                let response = self.client.get(&url).query(query).send().await?;
                Self::decode(path, response).await
            },
            ApiError::is_retryable,
        )
        .await
    }

    /// GET where a 404 is a legitimate "no such thing" answer
    pub async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get_json(path).await {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        with_retry(
            &self.retry_config,
            || async {
                let response = self.client.post(&url).json(body).send().await?;
                Self::decode(path, response).await
            },
            ApiError::is_retryable,
        )
        .await
    }

    /// Probe the backend health endpoint
    pub async fn health(&self) -> Result<HealthCheck> {
        self.get_json("/health").await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
