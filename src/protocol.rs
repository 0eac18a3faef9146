//! Wire-compatible request and response types for the game session API.
//!
//! Every type here produces the same JSON the game server reads and writes
//! under `/api/v1/games`. Decoding into the richer model types in
//! [`crate::game`] happens in [`crate::session`], not here; these structs
//! stay a faithful mirror of the wire.

use serde::{Deserialize, Serialize};

// ── Constants ───────────────────────────────────────────────────────

/// Header carrying the client identity on every request.
pub const CLIENT_ID_HEADER: &str = "X-User-ID";

/// Wire character for an empty cell.
pub const EMPTY_MARKER: char = ' ';

/// Wire character for the human side (moves first).
pub const HUMAN_MARKER: char = 'X';

/// Wire character for the server-side opponent.
pub const OPPONENT_MARKER: char = 'O';

/// Common prefix of every endpoint path.
pub const API_PREFIX: &str = "/api/v1/games";

// ── Endpoints ───────────────────────────────────────────────────────

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// The remote operations of the session API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /api/v1/games/new`: start a session.
    NewGame,
    /// `GET /api/v1/games/state`: current frame of an existing session.
    State,
    /// `POST /api/v1/games/move`: submit the human's move.
    Move,
    /// `POST /api/v1/games/undo`.
    Undo,
    /// `POST /api/v1/games/redo`.
    Redo,
    /// `DELETE /api/v1/games`: end the session.
    End,
}

impl Endpoint {
    /// HTTP method used by this endpoint.
    pub fn method(self) -> Method {
        match self {
            Self::State => Method::Get,
            Self::End => Method::Delete,
            Self::NewGame | Self::Move | Self::Undo | Self::Redo => Method::Post,
        }
    }

    /// Absolute path of this endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::NewGame => "/api/v1/games/new",
            Self::State => "/api/v1/games/state",
            Self::Move => "/api/v1/games/move",
            Self::Undo => "/api/v1/games/undo",
            Self::Redo => "/api/v1/games/redo",
            Self::End => API_PREFIX,
        }
    }
}

// ── Request bodies ──────────────────────────────────────────────────

/// Body of a new-game request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    /// Identifier of the opponent strategy, e.g. `"Random"`.
    pub strategy: String,
}

/// Body of a move request. Coordinates are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub row: u8,
    pub column: u8,
}

/// The `{}` body sent by undo, redo, and end-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyBody {}

// ── Response bodies ─────────────────────────────────────────────────

/// One board snapshot as sent by the server.
///
/// `new` and `state` return a single object; `move`, `undo`, and `redo`
/// return an array of them in the order the server applied them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFrame {
    /// Whether the server accepted the step. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Whose turn is next: `'X'`, `'O'`, or `' '` when nobody can move.
    pub next_turn: char,
    /// Eight rows of eight cell characters.
    pub board: Vec<String>,
    /// Set when the game has ended as of this frame.
    #[serde(default)]
    pub game_over: bool,
    /// `[human, opponent]` piece counts. Derived from the board when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pieces_count: Option<[u32; 2]>,
}

/// Structured error payload of a non-success response.
///
/// Every field is optional: servers may return an empty body, a body
/// without `message`, or something that is not JSON at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse a response body, returning the non-blank `message` if any.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_routes() {
        assert_eq!(Endpoint::NewGame.method(), Method::Post);
        assert_eq!(Endpoint::State.method(), Method::Get);
        assert_eq!(Endpoint::End.method(), Method::Delete);
        assert_eq!(Endpoint::End.path(), "/api/v1/games");
        assert_eq!(Endpoint::Redo.path(), "/api/v1/games/redo");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(
            ErrorBody::message_from(r#"{"message":"Game already exists."}"#).as_deref(),
            Some("Game already exists.")
        );
        assert_eq!(ErrorBody::message_from(r#"{"message":"   "}"#), None);
        assert_eq!(ErrorBody::message_from(r#"{"status":500}"#), None);
        assert_eq!(ErrorBody::message_from("<html>oops</html>"), None);
        assert_eq!(ErrorBody::message_from(""), None);
    }
}
