//! REST client for the marketplace backend.
//!
//! This crate provides a thin Rust client over the backend's HTTP API. It
//! handles:
//! - Base-URL and credential configuration
//! - Building list queries and decoding page envelopes
//! - Proposal lifecycle actions (accept, reject, cancel)
//! - The favorites directory (favorite ids of a user, toggling a favorite)
//! - Mapping transport and decode failures onto `ClientError`
//!
//! Nothing here retries. A failed call is reported once and the caller
//! decides what to do next.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use market_types::{ClientError, Result};

pub mod favorites;
pub mod projects;
pub mod proposals;

pub use projects::{DEFAULT_PAGE_SIZE, MANAGER_PAGE_SIZE};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend, without the `/api` prefix
    pub base_url: String,
    /// Sent as a bearer `Authorization` header when present
    pub access_token: Option<String>,
    /// Keep and resend cookies set by the backend (session cookies)
    pub include_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            include_credentials: true,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Bodies may arrive bare or wrapped as `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Client for the marketplace backend.
///
/// Cheap to clone; clones share the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from `config`.
    ///
    /// No request is made here; an unreachable backend shows up on the
    /// first call as `ClientError::Network`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::invalid_value("access_token", "<redacted>"))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(config.include_credentials)
            .build()
            .map_err(|e| ClientError::Network(format!("building HTTP client: {e}")))?;

        info!("API client configured for {}", config.base_url);
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Get the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Send a request and return the body of a successful response.
    ///
    /// ## Error mapping
    /// - transport failure -> `Network`
    /// - non-2xx status -> `Status` (with whatever body the server sent)
    /// - unreadable body -> `Network`
    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            error!("Request failed to complete: {}", e);
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.map_err(|e| {
            error!("Failed reading response body from {}: {}", url, e);
            ClientError::Network(e.to_string())
        })?;

        if !status.is_success() {
            error!("{} responded with {}", url, status);
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!("{} responded with {} ({} bytes)", url, status, body.len());
        Ok(body)
    }

    /// Send a request and decode the JSON body as `T`.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        decode(&body)
    }

    /// Like `send_json`, but accepts `T` either bare or under a `data` key.
    async fn send_enveloped<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        decode::<Envelope<T>>(&body).map(Envelope::into_inner)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        error!("Response JSON did not match the expected shape: {}", e);
        ClientError::Decode(e.to_string())
    })
}
