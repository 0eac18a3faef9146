//! HTTP transport implementation using `reqwest`.
//!
//! This module provides [`HttpTransport`], a [`Transport`] implementation
//! that talks JSON over HTTP(S) to the game server. Every request carries
//! the client identity header and `application/json` content negotiation.
//!
//! # Feature gate
//!
//! This module is only available when the `transport-http` feature is
//! enabled (it is enabled by default).
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), othello_session_client::OthelloError> {
//! use othello_session_client::{ClientConfig, HttpTransport, SessionClient};
//! use othello_session_client::game::StrategyId;
//!
//! let config = ClientConfig::new("http://localhost:8080");
//! let transport = HttpTransport::from_config(&config)?;
//! let session = SessionClient::from_config(transport, &config)?;
//!
//! let opening = session.start_session(&StrategyId::random()).await?;
//! println!("{}", opening.first().board);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::OthelloError;
use crate::protocol::{Method, CLIENT_ID_HEADER};
use crate::transport::{ApiRequest, ApiResponse, Transport};

const JSON: &str = "application/json";

/// A [`Transport`] backed by a `reqwest` HTTP client.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OthelloError::Network`] if the HTTP client cannot be built
    /// (for example when the TLS backend fails to initialize).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OthelloError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OthelloError::Network(e.to_string()))?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a transport from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, OthelloError> {
        Self::new(config.base_url.clone(), config.request_timeout)
    }

    /// Create a transport around an existing `reqwest` client, for custom
    /// TLS, proxy, or pooling setups. The client's own timeout applies.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The server origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, OthelloError> {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        let builder = builder
            .header(CLIENT_ID_HEADER, request.client_id)
            .header(ACCEPT, JSON);
        // GET carries no body; everything else sends JSON, even if only `{}`.
        let builder = match request.method {
            Method::Get => builder,
            Method::Post | Method::Delete => builder.header(CONTENT_TYPE, JSON).body(request.body),
        };

        tracing::debug!(method = request.method.as_str(), url = %url, "sending request");

        let response = builder.send().await.map_err(to_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(to_transport_error)?;

        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(ApiResponse { status, body })
    }
}

fn to_transport_error(err: reqwest::Error) -> OthelloError {
    if err.is_timeout() {
        OthelloError::Timeout
    } else {
        OthelloError::Network(err.to_string())
    }
}
