//! Error types for the Othello session client.

use thiserror::Error;

use crate::board::BoardError;
use crate::failure::FailureKind;

/// Errors that can occur while talking to the game server or replaying its
/// responses.
#[derive(Debug, Error)]
pub enum OthelloError {
    /// No response reached the client.
    #[error("network failure: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server returned a non-success status.
    #[error("server error: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error payload, or `"HTTP <status>"`.
        message: String,
    },

    /// The server holds no session for this client identity.
    #[error("no active session: {message}")]
    NoActiveSession {
        /// Message from the error payload, or `"HTTP <status>"`.
        message: String,
    },

    /// The server refused to start a session because one already exists.
    #[error("session already exists: {message}")]
    SessionExists {
        /// Message from the error payload, or `"HTTP <status>"`.
        message: String,
    },

    /// A success response carried a payload that does not match the protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A frame carried a board that could not be decoded.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    /// A state-changing action returned no frames.
    #[error("server returned an empty move sequence")]
    EmptySequence,

    /// Failed to serialize or deserialize a JSON payload.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A move coordinate lies outside the board.
    #[error("coordinate ({row}, {column}) is outside the board")]
    InvalidCoordinate { row: u8, column: u8 },

    /// An I/O error occurred (identity persistence).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OthelloError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) | Self::Timeout => FailureKind::NetworkFailure,
            Self::Server { .. } => FailureKind::ServerError,
            Self::NoActiveSession { .. } => FailureKind::NoActiveSession,
            Self::SessionExists { .. } => FailureKind::SessionConflict,
            Self::Protocol(_)
            | Self::InvalidBoard(_)
            | Self::EmptySequence
            | Self::Serialization(_) => FailureKind::ProtocolError,
            Self::InvalidCoordinate { .. } | Self::Io(_) => FailureKind::Local,
        }
    }
}

/// A specialized [`Result`] type for session client operations.
pub type Result<T> = std::result::Result<T, OthelloError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_taxonomy() {
        assert_eq!(
            OthelloError::Network("refused".into()).kind(),
            FailureKind::NetworkFailure
        );
        assert_eq!(OthelloError::Timeout.kind(), FailureKind::NetworkFailure);
        assert_eq!(
            OthelloError::Server {
                status: 500,
                message: "HTTP 500".into()
            }
            .kind(),
            FailureKind::ServerError
        );
        assert_eq!(
            OthelloError::NoActiveSession {
                message: "Game not found".into()
            }
            .kind(),
            FailureKind::NoActiveSession
        );
        assert_eq!(
            OthelloError::SessionExists {
                message: "Game already exists.".into()
            }
            .kind(),
            FailureKind::SessionConflict
        );
        assert_eq!(
            OthelloError::InvalidBoard(BoardError::RowCount { found: 3 }).kind(),
            FailureKind::ProtocolError
        );
        assert_eq!(
            OthelloError::EmptySequence.kind(),
            FailureKind::ProtocolError
        );
        assert_eq!(
            OthelloError::InvalidCoordinate { row: 9, column: 0 }.kind(),
            FailureKind::Local
        );
    }

    #[test]
    fn server_error_displays_message() {
        let err = OthelloError::Server {
            status: 400,
            message: "Invalid move".into(),
        };
        assert_eq!(err.to_string(), "server error: Invalid move");
    }
}
