//! HTTP client for the admin API.
//!
//! Wraps `reqwest` with the conventions every call shares: one fixed
//! timeout, a bearer token read from the token store, JSON bodies, and
//! envelope decoding. Errors never escape the adapters; repositories turn
//! them into a fallback.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::dto::PayloadError;
use super::envelope::ApiResponse;
use crate::adapters::storage::TokenStore;

/// Why a remote call did not produce usable data.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}{}", status_detail(.message))]
    Status { status: u16, message: Option<String> },

    #[error("undecodable response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("response carried no data")]
    MissingData,

    #[error("unexpected payload: {0}")]
    Payload(#[from] PayloadError),
}

fn status_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Connection settings of the client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// Applied to every request, connect through body.
    pub timeout: Duration,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

/// Shared client of the admin API.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig, tokens: Arc<TokenStore>) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(config.base_url));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds `<base_url>/<segments...>`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, TransportError> {
        self.fetch(Method::GET, segments, None, None).await
    }

    /// GET authorized with an explicit token instead of the stored one.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: &str,
    ) -> Result<T, TransportError> {
        self.fetch(Method::GET, segments, None, Some(token)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, TransportError> {
        let body = serde_json::to_value(body)?;
        self.fetch(Method::POST, segments, Some(body), None).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, TransportError> {
        let body = serde_json::to_value(body)?;
        self.fetch(Method::PUT, segments, Some(body), None).await
    }

    /// POST whose success carries no data of interest.
    pub async fn post_ack<B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), TransportError> {
        let body = serde_json::to_value(body)?;
        self.acknowledge(Method::POST, segments, Some(body)).await
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<(), TransportError> {
        self.acknowledge(Method::DELETE, segments, None).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Result<T, TransportError> {
        match self.exchange(method, segments, body, token).await? {
            ApiResponse::Success {
                data: Some(data), ..
            } => Ok(data),
            ApiResponse::Success { data: None, .. } => Err(TransportError::MissingData),
            ApiResponse::Failure { message } => Err(TransportError::Rejected(message)),
        }
    }

    async fn acknowledge(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> Result<(), TransportError> {
        match self
            .exchange::<IgnoredAny>(method, segments, body, None)
            .await?
        {
            ApiResponse::Success { .. } => Ok(()),
            ApiResponse::Failure { message } => Err(TransportError::Rejected(message)),
        }
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Result<ApiResponse<T>, TransportError> {
        let url = self.endpoint(segments)?;
        let token = token
            .map(str::to_string)
            .or_else(|| self.tokens.current_token())
            .unwrap_or_default();

        tracing::debug!(method = %method, url = %url, "Admin API request");

        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let message = ApiResponse::<IgnoredAny>::decode(&bytes)
                .ok()
                .and_then(|r| r.failure_message().map(str::to_string));
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(ApiResponse::decode(&bytes)?)
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(error.to_string())
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::runtime::SystemClock;
    use crate::adapters::storage::InMemoryKeyValueStore;

    fn client(base_url: &str) -> Result<ApiClient, TransportError> {
        let tokens = Arc::new(TokenStore::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(SystemClock),
        ));
        ApiClient::new(
            ApiClientConfig::new(base_url, Duration::from_millis(500)),
            tokens,
        )
    }

    #[test]
    fn endpoint_appends_segments_to_base_path() {
        let api = client("http://localhost:3000/api").unwrap();
        let url = api.endpoint(&["users", "42", "roles"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/users/42/roles");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let api = client("http://localhost:3000/api/").unwrap();
        let url = api.endpoint(&["roles"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/roles");
    }

    #[test]
    fn endpoint_encodes_segments() {
        let api = client("http://localhost:3000/api").unwrap();
        let url = api
            .endpoint(&["roles", "check-name", "Super Admin/x"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/roles/check-name/Super%20Admin%2Fx"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            client("not a url"),
            Err(TransportError::InvalidUrl(_))
        ));
        assert!(matches!(
            client("mailto:admin@example.com"),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn status_error_display_includes_message() {
        let with = TransportError::Status {
            status: 409,
            message: Some("duplicated".to_string()),
        };
        let without = TransportError::Status {
            status: 503,
            message: None,
        };
        assert_eq!(with.to_string(), "unexpected status 409: duplicated");
        assert_eq!(without.to_string(), "unexpected status 503");
    }
}
