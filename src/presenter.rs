//! Presentation adapter interface.
//!
//! The controller pushes everything the user sees through a [`Presenter`]:
//! board renders, the turn label, piece counts, the evaluation indicator,
//! the game-over banner, and the start screen. A presenter owns no game
//! logic. Implementations wrap a terminal, a GUI toolkit, a web page, or a
//! test recorder.
//!
//! The evaluation indicator is fed by an [`Evaluator`]. No evaluation signal
//! exists yet, so the default [`NeutralEvaluator`] never produces one and the
//! indicator simply stays at its neutral position.

use async_trait::async_trait;

use crate::board::Board;
use crate::error::OthelloError;
use crate::game::{MoveFrame, Outcome, Turn};

/// Receives display updates from the controller.
///
/// All methods except [`confirm_recovery`](Presenter::confirm_recovery) are
/// synchronous: they are called between playback frames and must not block
/// for long. Use interior mutability for any state a presenter keeps.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Draw the board.
    fn render_board(&self, board: &Board);

    /// Show whose turn is next.
    fn set_turn_label(&self, turn: Turn);

    /// Show the piece counts.
    fn set_scores(&self, human: u32, opponent: u32);

    /// Move the evaluation indicator. `value` is in `[-1.0, 1.0]`; negative
    /// favours the human, positive the opponent.
    fn set_evaluation(&self, value: f32);

    /// Show the game-over banner.
    fn show_game_over(&self, outcome: Outcome);

    /// Hide the board and show the start screen.
    fn show_start_screen(&self);

    /// Show a blocking notification for a failed action.
    fn notify_error(&self, error: &OthelloError);

    /// Ask whether to discard the server-side session after a session
    /// failure. Returns `true` to end it and go back to the start screen.
    async fn confirm_recovery(&self, error: &OthelloError) -> bool;
}

/// Source of the evaluation indicator value for a frame.
pub trait Evaluator: Send + Sync {
    /// Evaluation for `frame` in `[-1.0, 1.0]`, or `None` if no signal is
    /// available (the indicator is left where it is).
    fn evaluate(&self, frame: &MoveFrame) -> Option<f32>;
}

/// An [`Evaluator`] with no signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralEvaluator;

impl Evaluator for NeutralEvaluator {
    fn evaluate(&self, _frame: &MoveFrame) -> Option<f32> {
        None
    }
}

impl<F> Evaluator for F
where
    F: Fn(&MoveFrame) -> Option<f32> + Send + Sync,
{
    fn evaluate(&self, frame: &MoveFrame) -> Option<f32> {
        self(frame)
    }
}
