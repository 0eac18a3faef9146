//! Transport abstraction for the game session API.
//!
//! The [`Transport`] trait performs one request/response exchange with the
//! game server. The session protocol is JSON over HTTP, but the trait only
//! sees an [`ApiRequest`] (method, path, identity, JSON body) and returns an
//! [`ApiResponse`] (status and raw body), so tests and alternative backends
//! can stand in for the network.
//!
//! # Contract
//!
//! - A response with any status code, including 4xx and 5xx, is `Ok`.
//!   Interpreting the status is the session client's job.
//! - `Err` is reserved for the case where no response arrived at all:
//!   return [`OthelloError::Network`] or [`OthelloError::Timeout`].
//! - Exactly one attempt per call. Retrying a state-changing request
//!   without knowing whether the first one was applied could play a move
//!   twice.
//!
//! # Implementing a Custom Transport
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use othello_session_client::error::OthelloError;
//! use othello_session_client::transport::{ApiRequest, ApiResponse, Transport};
//!
//! struct MyTransport { /* ... */ }
//!
//! #[async_trait]
//! impl Transport for MyTransport {
//!     async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, OthelloError> {
//!         // Send `request.body` to `request.path` with the identity header,
//!         // then hand back whatever status and body came back.
//!         Ok(ApiResponse::new(200, "[]"))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::OthelloError;
use crate::protocol::Method;

/// One outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path, e.g. `/api/v1/games/move`.
    pub path: &'static str,
    /// Value of the client identity header.
    pub client_id: String,
    /// JSON request body.
    pub body: String,
}

/// One response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request/response channel to the game server.
///
/// # Object Safety
///
/// This trait is object-safe, so `Box<dyn Transport>` works for dynamic
/// dispatch. [`SessionClient`](crate::SessionClient) is generic over it for
/// the common case.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Perform one request and return the server's response.
    ///
    /// # Errors
    ///
    /// Returns [`OthelloError::Network`] or [`OthelloError::Timeout`] when no
    /// response was received.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, OthelloError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, OthelloError> {
        (**self).execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(301, "").is_success());
        assert!(!ApiResponse::new(404, "").is_success());
    }
}
