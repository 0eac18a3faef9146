//! Transport implementations for the game session API.
//!
//! This module provides concrete [`Transport`](crate::Transport)
//! implementations behind feature gates. Enable the corresponding Cargo
//! feature to pull in a transport:
//!
//! | Feature          | Transport         |
//! |------------------|-------------------|
//! | `transport-http` | [`HttpTransport`] |
//!
//! # Example
//!
//! ```rust,ignore
//! # async fn example() -> Result<(), othello_session_client::OthelloError> {
//! use othello_session_client::{HttpTransport, Transport};
//! use othello_session_client::protocol::Method;
//! use othello_session_client::transport::ApiRequest;
//! use std::time::Duration;
//!
//! let http = HttpTransport::new("http://localhost:8080", Duration::from_secs(5))?;
//! let response = http
//!     .execute(ApiRequest {
//!         method: Method::Get,
//!         path: "/api/v1/games/state",
//!         client_id: "3f0c...".into(),
//!         body: String::new(),
//!     })
//!     .await?;
//! println!("{} {}", response.status, response.body);
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "transport-http")]
pub mod http;

#[cfg(feature = "transport-http")]
pub use http::HttpTransport;
