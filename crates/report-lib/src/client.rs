//! HTTP client for the control-plane REST API

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors raised while talking to the control plane
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid control plane URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error ({status}) from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Username and API token for HTTP Basic authentication
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// `Basic base64(username:token)`
    pub fn basic_auth_value(&self) -> String {
        let raw = format!("{}:{}", self.username, self.token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Authenticated client bound to one control-plane base URL
pub struct ControlPlaneClient {
    client: Client,
    base_url: Url,
}

impl ControlPlaneClient {
    /// Create a client with the HTTP library's default timeouts
    pub fn new(base_url: &str, credentials: &Credentials) -> Result<Self, ClientError> {
        Self::build(base_url, credentials, None)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: &str,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        Self::build(base_url, credentials, Some(timeout))
    }

    fn build(
        base_url: &str,
        credentials: &Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&credentials.basic_auth_value())
            .map_err(|e| invalid(format!("credentials are not a valid header: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| invalid(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `build`: the base URL always has a hierarchical path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON document, failing on any non-2xx status
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.endpoint(segments);
        let response = self.send(&url).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        Self::decode(&url, response).await
    }

    /// GET a JSON document only if the server answers 200 OK
    ///
    /// Any other status yields `Ok(None)`.
    pub async fn get_if_ok<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, ClientError> {
        let url = self.endpoint(segments);
        let response = self.send(&url).await?;

        if response.status() != StatusCode::OK {
            debug!(url = %url, status = %response.status(), "Ignoring non-200 response");
            return Ok(None);
        }

        Self::decode(&url, response).await.map(Some)
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response, ClientError> {
        debug!(url = %url, "GET");
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })
    }

    async fn decode<T: DeserializeOwned>(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
