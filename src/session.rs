//! Session client for the game server API.
//!
//! [`SessionClient`] performs one logical remote operation per call and
//! returns either a decoded [`Sequence`] or a classified
//! [`OthelloError`]. It holds no game state of its own beyond the client
//! identity sent with every request, and it never retries.
//!
//! # Example
//!
//! ```rust,ignore
//! let config = ClientConfig::new("http://localhost:8080");
//! let session = SessionClient::from_config(HttpTransport::from_config(&config)?, &config)?;
//!
//! let opening = session.start_session(&StrategyId::greedy()).await?;
//! let reply = session.submit_move(2, 3).await?;
//! for frame in reply.frames() {
//!     println!("{}", frame.board);
//! }
//! session.end_session().await?;
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::board::BOARD_SIZE;
use crate::config::ClientConfig;
use crate::error::{OthelloError, Result};
use crate::game::{MoveFrame, Sequence, StrategyId};
use crate::identity::ClientIdentity;
use crate::protocol::{EmptyBody, Endpoint, ErrorBody, MoveRequest, NewGameRequest, WireFrame};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Typed wrapper over the game session API.
pub struct SessionClient<T> {
    transport: T,
    identity: ClientIdentity,
}

impl<T: Transport> SessionClient<T> {
    /// Create a client that identifies itself with `identity`.
    pub fn new(transport: T, identity: ClientIdentity) -> Self {
        Self {
            transport,
            identity,
        }
    }

    /// Create a client using the identity policy from `config`: a persistent
    /// identity at `identity_path`, or an ephemeral one.
    ///
    /// # Errors
    ///
    /// Returns [`OthelloError::Io`] if the identity file cannot be created.
    pub fn from_config(transport: T, config: &ClientConfig) -> Result<Self> {
        let identity = match &config.identity_path {
            Some(path) => ClientIdentity::load_or_create(path)?,
            None => ClientIdentity::ephemeral(),
        };
        Ok(Self::new(transport, identity))
    }

    /// The identity sent with every request.
    pub fn identity(&self) -> ClientIdentity {
        self.identity
    }

    /// Start a new session against the given opponent strategy.
    ///
    /// Returns a one-frame sequence holding the opening board.
    ///
    /// # Errors
    ///
    /// [`OthelloError::SessionExists`] if the server still holds a game for
    /// this identity, or any failure described on [`OthelloError`].
    pub async fn start_session(&self, strategy: &StrategyId) -> Result<Sequence> {
        let body = NewGameRequest {
            strategy: strategy.as_str().to_string(),
        };
        let text = self.call(Endpoint::NewGame, &body).await?;
        decode_single(&text)
    }

    /// Fetch the current frame of an existing session.
    ///
    /// # Errors
    ///
    /// [`OthelloError::NoActiveSession`] if the server has no game for this
    /// identity, or any failure described on [`OthelloError`].
    pub async fn current_state(&self) -> Result<Sequence> {
        let text = self.call(Endpoint::State, &()).await?;
        decode_single(&text)
    }

    /// Submit the human's move at zero-based `(row, column)`.
    ///
    /// Legality is the server's call; only the board range is checked here.
    ///
    /// # Errors
    ///
    /// [`OthelloError::InvalidCoordinate`] if the square is off the board
    /// (no request is sent), or any failure described on [`OthelloError`].
    pub async fn submit_move(&self, row: u8, column: u8) -> Result<Sequence> {
        if usize::from(row) >= BOARD_SIZE || usize::from(column) >= BOARD_SIZE {
            return Err(OthelloError::InvalidCoordinate { row, column });
        }
        let text = self.call(Endpoint::Move, &MoveRequest { row, column }).await?;
        decode_sequence(&text)
    }

    /// Undo the last move pair.
    ///
    /// # Errors
    ///
    /// Any failure described on [`OthelloError`].
    pub async fn undo(&self) -> Result<Sequence> {
        let text = self.call(Endpoint::Undo, &EmptyBody {}).await?;
        decode_sequence(&text)
    }

    /// Redo the last undone move pair.
    ///
    /// # Errors
    ///
    /// Any failure described on [`OthelloError`].
    pub async fn redo(&self) -> Result<Sequence> {
        let text = self.call(Endpoint::Redo, &EmptyBody {}).await?;
        decode_sequence(&text)
    }

    /// End the session on the server.
    ///
    /// # Errors
    ///
    /// Any failure described on [`OthelloError`].
    pub async fn end_session(&self) -> Result<()> {
        self.call(Endpoint::End, &EmptyBody {}).await.map(|_| ())
    }

    // ── Internal helpers ────────────────────────────────────────────

    /// Send one request and return the body of a success response.
    async fn call<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<String> {
        let body = match endpoint {
            Endpoint::State => String::new(),
            _ => serde_json::to_string(body)?,
        };
        let request = ApiRequest {
            method: endpoint.method(),
            path: endpoint.path(),
            client_id: self.identity.to_string(),
            body,
        };

        debug!(method = request.method.as_str(), path = request.path, "session request");
        let response = self.transport.execute(request).await.inspect_err(|e| {
            warn!(path = endpoint.path(), "no response from server: {e}");
        })?;

        if response.is_success() {
            return Ok(response.body);
        }
        let err = classify_failure(&response);
        warn!(
            path = endpoint.path(),
            status = response.status,
            kind = ?err.kind(),
            "request failed: {err}"
        );
        Err(err)
    }
}

impl<T> std::fmt::Debug for SessionClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Turn a non-success response into a classified error.
///
/// The message comes from a `{message}` payload when one decodes, else it is
/// `"HTTP <status>"`. A missing session is a 404 or a message mentioning
/// "not found"; a stale session blocking a new one is a 409 or a message
/// mentioning "already exists".
pub fn classify_failure(response: &ApiResponse) -> OthelloError {
    let status = response.status;
    let message = ErrorBody::message_from(&response.body)
        .unwrap_or_else(|| format!("HTTP {status}"));
    let lowered = message.to_ascii_lowercase();

    if status == 404 || lowered.contains("not found") {
        OthelloError::NoActiveSession { message }
    } else if status == 409 || lowered.contains("already exists") {
        OthelloError::SessionExists { message }
    } else {
        OthelloError::Server { status, message }
    }
}

fn decode_single(text: &str) -> Result<Sequence> {
    let wire: WireFrame = serde_json::from_str(text)
        .map_err(|e| OthelloError::Protocol(format!("undecodable frame: {e}")))?;
    Sequence::new(vec![MoveFrame::try_from(wire)?])
}

fn decode_sequence(text: &str) -> Result<Sequence> {
    let wire: Vec<WireFrame> = serde_json::from_str(text)
        .map_err(|e| OthelloError::Protocol(format!("undecodable frame sequence: {e}")))?;
    Sequence::from_wire(wire)
}
