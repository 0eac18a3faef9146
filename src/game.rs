//! Game model: frames, sequences, scores, and controller phases.
//!
//! A [`Sequence`] is what one controller action produces: the ordered list of
//! [`MoveFrame`]s the server applied, ready to be replayed. Nothing here is
//! retained after playback; the client keeps no game history of its own.

use std::fmt;

use crate::board::{self, Board, Cell};
use crate::error::{OthelloError, Result};
use crate::protocol::{WireFrame, EMPTY_MARKER, HUMAN_MARKER, OPPONENT_MARKER};

// ── Strategy ────────────────────────────────────────────────────────

/// Identifier of the server-side opponent strategy.
///
/// Opaque to the client; only the server interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrategyId(String);

impl StrategyId {
    /// Wrap an arbitrary strategy identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The opponent that picks a uniformly random legal move.
    pub fn random() -> Self {
        Self::new("Random")
    }

    /// The opponent that maximizes pieces flipped by each move.
    pub fn greedy() -> Self {
        Self::new("Greedy")
    }

    /// The raw identifier sent to the server.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StrategyId {
    fn default() -> Self {
        Self::random()
    }
}

impl From<&str> for StrategyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Turn / Score / Outcome ──────────────────────────────────────────

/// Whose turn is next after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Human,
    Opponent,
    /// Neither side can move.
    Nobody,
}

impl Turn {
    /// Map a wire marker to a turn, or `None` for an unrecognized marker.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            HUMAN_MARKER => Some(Self::Human),
            OPPONENT_MARKER => Some(Self::Opponent),
            EMPTY_MARKER => Some(Self::Nobody),
            _ => None,
        }
    }
}

/// Piece counts for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    pub human: u32,
    pub opponent: u32,
}

impl Score {
    pub fn new(human: u32, opponent: u32) -> Self {
        Self { human, opponent }
    }

    /// Count the pieces on a board.
    pub fn of_board(board: &Board) -> Self {
        Self::new(board.count(Cell::Human), board.count(Cell::Opponent))
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    HumanWins,
    OpponentWins,
    Draw,
}

impl Outcome {
    /// Decide the winner from final piece counts.
    pub fn from_score(score: Score) -> Self {
        use std::cmp::Ordering;
        match score.human.cmp(&score.opponent) {
            Ordering::Greater => Self::HumanWins,
            Ordering::Less => Self::OpponentWins,
            Ordering::Equal => Self::Draw,
        }
    }

    /// Banner text for the game-over screen.
    pub fn banner(self) -> &'static str {
        match self {
            Self::HumanWins => "You Win",
            Self::OpponentWins => "You Lose",
            Self::Draw => "Draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.banner())
    }
}

// ── MoveFrame ───────────────────────────────────────────────────────

/// One decoded board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFrame {
    pub board: Board,
    pub next_turn: Turn,
    pub score: Score,
    /// The game has ended as of this frame.
    pub terminal: bool,
}

impl TryFrom<WireFrame> for MoveFrame {
    type Error = OthelloError;

    fn try_from(wire: WireFrame) -> Result<Self> {
        let board = board::decode(&wire.board)?;
        let next_turn = Turn::from_marker(wire.next_turn).ok_or_else(|| {
            OthelloError::Protocol(format!("unrecognized turn marker {:?}", wire.next_turn))
        })?;
        let score = match wire.pieces_count {
            Some([human, opponent]) => Score::new(human, opponent),
            None => Score::of_board(&board),
        };
        Ok(Self {
            board,
            next_turn,
            score,
            terminal: wire.game_over,
        })
    }
}

// ── Sequence ────────────────────────────────────────────────────────

/// A non-empty, ordered list of frames produced by one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    head: MoveFrame,
    tail: Vec<MoveFrame>,
}

impl Sequence {
    /// Build a sequence, rejecting an empty frame list.
    ///
    /// # Errors
    ///
    /// Returns [`OthelloError::EmptySequence`] if `frames` is empty.
    pub fn new(frames: Vec<MoveFrame>) -> Result<Self> {
        let mut frames = frames.into_iter();
        let head = frames.next().ok_or(OthelloError::EmptySequence)?;
        Ok(Self {
            head,
            tail: frames.collect(),
        })
    }

    /// Decode a server response into a sequence.
    ///
    /// # Errors
    ///
    /// Fails on the first frame that does not decode, or if `wire` is empty.
    pub fn from_wire(wire: Vec<WireFrame>) -> Result<Self> {
        let frames = wire
            .into_iter()
            .map(MoveFrame::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(frames)
    }

    /// Frames in server order.
    pub fn frames(&self) -> impl Iterator<Item = &MoveFrame> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always `false`: a sequence holds at least one frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The frame to show immediately.
    pub fn first(&self) -> &MoveFrame {
        &self.head
    }

    /// The last frame in server order.
    pub fn last(&self) -> &MoveFrame {
        self.tail.last().unwrap_or(&self.head)
    }

    /// The most recent frame carrying the terminal flag, with its index.
    ///
    /// Scans from the end, so a trailing non-terminal frame after the
    /// terminal one does not hide it.
    pub fn terminal_frame(&self) -> Option<(usize, &MoveFrame)> {
        self.tail
            .iter()
            .enumerate()
            .rev()
            .find(|(_, frame)| frame.terminal)
            .map(|(index, frame)| (index + 1, frame))
            .or_else(|| self.head.terminal.then_some((0, &self.head)))
    }
}

// ── SessionPhase ────────────────────────────────────────────────────

/// The controller's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    /// No game; the start screen is shown.
    #[default]
    NoSession,
    /// The board is shown and the user may act.
    AwaitingInput,
    /// An action is in flight or its sequence is being replayed.
    Animating,
    /// The game ended; only a new game is accepted.
    GameOver,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoSession => "no-session",
            Self::AwaitingInput => "awaiting-input",
            Self::Animating => "animating",
            Self::GameOver => "game-over",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    fn wire(next_turn: char, game_over: bool, counts: Option<[u32; 2]>) -> WireFrame {
        WireFrame {
            success: Some(true),
            next_turn,
            board: board::encode(&Board::opening()),
            game_over,
            pieces_count: counts,
        }
    }

    #[test]
    fn winner_from_counts() {
        assert_eq!(Outcome::from_score(Score::new(34, 30)), Outcome::HumanWins);
        assert_eq!(
            Outcome::from_score(Score::new(28, 36)),
            Outcome::OpponentWins
        );
        assert_eq!(Outcome::from_score(Score::new(32, 32)), Outcome::Draw);
        assert_eq!(Outcome::HumanWins.banner(), "You Win");
    }

    #[test]
    fn frame_uses_sent_counts() {
        let frame = MoveFrame::try_from(wire('O', false, Some([40, 24]))).unwrap();
        assert_eq!(frame.score, Score::new(40, 24));
        assert_eq!(frame.next_turn, Turn::Opponent);
        assert!(!frame.terminal);
    }

    #[test]
    fn frame_derives_counts_from_board_when_absent() {
        let frame = MoveFrame::try_from(wire('X', false, None)).unwrap();
        assert_eq!(frame.score, Score::new(2, 2));
    }

    #[test]
    fn blank_turn_marker_means_nobody() {
        let frame = MoveFrame::try_from(wire(' ', true, None)).unwrap();
        assert_eq!(frame.next_turn, Turn::Nobody);
        assert!(frame.terminal);
    }

    #[test]
    fn unknown_turn_marker_is_protocol_error() {
        let err = MoveFrame::try_from(wire('Z', false, None)).unwrap_err();
        assert!(matches!(err, OthelloError::Protocol(_)));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(matches!(
            Sequence::from_wire(vec![]),
            Err(OthelloError::EmptySequence)
        ));
    }

    #[test]
    fn terminal_frame_is_found_behind_trailing_frame() {
        let seq = Sequence::from_wire(vec![
            wire('O', false, None),
            wire(' ', true, Some([40, 24])),
            wire(' ', false, Some([40, 24])),
        ])
        .unwrap();
        let (index, frame) = seq.terminal_frame().unwrap();
        assert_eq!(index, 1);
        assert_eq!(frame.score, Score::new(40, 24));
    }

    #[test]
    fn terminal_opening_frame_is_found() {
        let seq = Sequence::from_wire(vec![wire(' ', true, Some([0, 64]))]).unwrap();
        assert_eq!(seq.terminal_frame().map(|(i, _)| i), Some(0));
        assert_eq!(seq.first(), seq.last());
    }

    #[test]
    fn non_terminal_sequence_has_no_terminal_frame() {
        let seq = Sequence::from_wire(vec![wire('O', false, None), wire('X', false, None)]).unwrap();
        assert_eq!(seq.len(), 2);
        assert!(seq.terminal_frame().is_none());
    }

    #[test]
    fn strategy_identifiers() {
        assert_eq!(StrategyId::random().as_str(), "Random");
        assert_eq!(StrategyId::greedy().to_string(), "Greedy");
        assert_eq!(StrategyId::default(), StrategyId::random());
        assert_eq!(StrategyId::from("Minimax").as_str(), "Minimax");
    }
}
