//! Failure classification for session operations.
//!
//! Every [`OthelloError`](crate::OthelloError) maps onto one [`FailureKind`].
//! The controller decides what to do with a failure by its kind alone:
//! recoverable session kinds lead to the recovery prompt, everything else
//! is shown to the user as a notification and leaves state untouched.

use std::fmt;

/// The class of a failed session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No response reached the client (connection refused, reset, timed out).
    NetworkFailure,
    /// The server answered with a non-success status.
    ServerError,
    /// The server answered with success but the payload could not be decoded.
    ProtocolError,
    /// The server holds no session for this client identity.
    NoActiveSession,
    /// The server refused to start a session because a stale one still exists.
    SessionConflict,
    /// The request never left the client (bad arguments, local I/O).
    Local,
}

impl FailureKind {
    /// Returns `true` if this kind should trigger the session recovery prompt.
    pub fn triggers_recovery(self) -> bool {
        matches!(self, Self::NoActiveSession | Self::SessionConflict)
    }

    /// Returns a human-readable description of this kind.
    ///
    /// Suitable for the blocking notification a presenter shows when an
    /// action fails.
    pub fn description(self) -> &'static str {
        match self {
            Self::NetworkFailure => {
                "The game server could not be reached. Check your connection and try again."
            }
            Self::ServerError => "The game server rejected the request.",
            Self::ProtocolError => {
                "The game server sent a response that could not be understood."
            }
            Self::NoActiveSession => {
                "The game server has no active game for you. It may have been restarted."
            }
            Self::SessionConflict => {
                "The game server still holds an earlier game for you. End it to start a new one."
            }
            Self::Local => "The request could not be prepared.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_session_kinds_trigger_recovery() {
        assert!(FailureKind::NoActiveSession.triggers_recovery());
        assert!(FailureKind::SessionConflict.triggers_recovery());
        assert!(!FailureKind::NetworkFailure.triggers_recovery());
        assert!(!FailureKind::ServerError.triggers_recovery());
        assert!(!FailureKind::ProtocolError.triggers_recovery());
        assert!(!FailureKind::Local.triggers_recovery());
    }

    #[test]
    fn display_matches_description() {
        let kind = FailureKind::NetworkFailure;
        assert_eq!(kind.to_string(), kind.description());
    }
}
