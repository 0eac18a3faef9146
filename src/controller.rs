//! Game session controller.
//!
//! [`GameController`] ties user input, the [`SessionClient`], the
//! [`PlaybackEngine`], and a [`Presenter`] together. It owns the current
//! [`SessionPhase`] and enforces the phase rules:
//!
//! | Phase           | Accepted input                           |
//! |-----------------|------------------------------------------|
//! | `NoSession`     | `start`, `resume`, `show_start_screen`   |
//! | `AwaitingInput` | `click`, `undo`, `redo`, `new_game`      |
//! | `Animating`     | nothing                                  |
//! | `GameOver`      | `start`, `new_game`                      |
//!
//! Input outside its phase is ignored: no request is sent and the phase
//! does not change. An accepted action moves the controller to
//! `Animating` before its request goes out and keeps it there until the
//! resulting sequence has been replayed, so at most one state-changing
//! action is ever outstanding. A failed action restores the phase it
//! started from and commits nothing.
//!
//! # Example
//!
//! ```rust,ignore
//! let config = ClientConfig::new("http://localhost:8080");
//! let session = SessionClient::from_config(HttpTransport::from_config(&config)?, &config)?;
//! let controller = GameController::new(session, MyPresenter::default(), &config);
//!
//! controller.show_start_screen().await;
//! controller.start(&StrategyId::greedy()).await;
//! match controller.click(2, 3).await {
//!     ActionOutcome::Settled(SessionPhase::GameOver) => println!("game over"),
//!     ActionOutcome::Failed(kind) => println!("{kind}"),
//!     _ => {}
//! }
//! ```

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{OthelloError, Result};
use crate::failure::FailureKind;
use crate::game::{MoveFrame, Outcome, Sequence, SessionPhase, StrategyId};
use crate::playback::PlaybackEngine;
use crate::presenter::{Evaluator, NeutralEvaluator, Presenter};
use crate::session::SessionClient;
use crate::transport::Transport;

/// Evaluation shown on the start screen and at the start of a game.
const NEUTRAL_EVALUATION: f32 = 0.0;

/// What became of one user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action is not accepted in the current phase; nothing happened.
    Ignored,
    /// The action completed and the controller settled in this phase.
    Settled(SessionPhase),
    /// The action failed. The failure has already been shown to the user.
    Failed(FailureKind),
}

// ── Shared state ────────────────────────────────────────────────────

struct ControllerState {
    phase: SessionPhase,
    /// Last frame of the last completed playback.
    displayed: Option<MoveFrame>,
}

// ── Controller ──────────────────────────────────────────────────────

/// State machine driving one client's game.
///
/// All methods take `&self`; the controller can be shared between the
/// input handler and anything else that inspects it. Phase checks and
/// transitions happen under one lock, so two inputs racing each other can
/// never both be accepted.
pub struct GameController<T, P> {
    session: SessionClient<T>,
    presenter: P,
    playback: PlaybackEngine,
    evaluator: Box<dyn Evaluator>,
    default_strategy: StrategyId,
    state: Mutex<ControllerState>,
}

impl<T: Transport, P: Presenter> GameController<T, P> {
    /// Create a controller in the `NoSession` phase.
    pub fn new(session: SessionClient<T>, presenter: P, config: &ClientConfig) -> Self {
        Self {
            session,
            presenter,
            playback: PlaybackEngine::new(config.frame_delay),
            evaluator: Box::new(NeutralEvaluator),
            default_strategy: config.default_strategy.clone(),
            state: Mutex::new(ControllerState {
                phase: SessionPhase::NoSession,
                displayed: None,
            }),
        }
    }

    /// Drive the evaluation indicator from `evaluator`.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn session(&self) -> &SessionClient<T> {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The strategy used by [`start_default`](Self::start_default).
    pub fn default_strategy(&self) -> &StrategyId {
        &self.default_strategy
    }

    /// The current phase.
    pub async fn phase(&self) -> SessionPhase {
        self.state.lock().await.phase
    }

    /// The frame currently on screen, as of the last completed playback.
    pub async fn displayed_frame(&self) -> Option<MoveFrame> {
        self.state.lock().await.displayed
    }

    // ── Actions ─────────────────────────────────────────────────────

    /// Draw the start screen. Accepted in `NoSession` only.
    pub async fn show_start_screen(&self) -> ActionOutcome {
        if self.phase().await != SessionPhase::NoSession {
            return ActionOutcome::Ignored;
        }
        self.presenter.show_start_screen();
        self.presenter.set_evaluation(NEUTRAL_EVALUATION);
        ActionOutcome::Settled(SessionPhase::NoSession)
    }

    /// Start a game against `strategy`. Accepted in `NoSession` and `GameOver`.
    pub async fn start(&self, strategy: &StrategyId) -> ActionOutcome {
        let Some(previous) = self
            .begin(&[SessionPhase::NoSession, SessionPhase::GameOver], "start")
            .await
        else {
            return ActionOutcome::Ignored;
        };

        info!(strategy = %strategy, "starting game");
        match self.session.start_session(strategy).await {
            Ok(sequence) => {
                self.presenter.set_evaluation(NEUTRAL_EVALUATION);
                self.replay(previous, sequence).await
            }
            Err(err) => self.fail(previous, err).await,
        }
    }

    /// Start a game against the configured default strategy.
    pub async fn start_default(&self) -> ActionOutcome {
        let strategy = self.default_strategy.clone();
        self.start(&strategy).await
    }

    /// Reattach to a game the server still holds for this client.
    /// Accepted in `NoSession`.
    pub async fn resume(&self) -> ActionOutcome {
        let Some(previous) = self.begin(&[SessionPhase::NoSession], "resume").await else {
            return ActionOutcome::Ignored;
        };
        let result = self.session.current_state().await;
        self.settle(previous, result).await
    }

    /// Play the human's move at zero-based `(row, column)`.
    /// Accepted in `AwaitingInput`.
    pub async fn click(&self, row: u8, column: u8) -> ActionOutcome {
        let Some(previous) = self.begin(&[SessionPhase::AwaitingInput], "click").await else {
            return ActionOutcome::Ignored;
        };
        debug!(row, column, "submitting move");
        let result = self.session.submit_move(row, column).await;
        self.settle(previous, result).await
    }

    /// Undo the last move pair. Accepted in `AwaitingInput`.
    pub async fn undo(&self) -> ActionOutcome {
        let Some(previous) = self.begin(&[SessionPhase::AwaitingInput], "undo").await else {
            return ActionOutcome::Ignored;
        };
        let result = self.session.undo().await;
        self.settle(previous, result).await
    }

    /// Redo the last undone move pair. Accepted in `AwaitingInput`.
    pub async fn redo(&self) -> ActionOutcome {
        let Some(previous) = self.begin(&[SessionPhase::AwaitingInput], "redo").await else {
            return ActionOutcome::Ignored;
        };
        let result = self.session.redo().await;
        self.settle(previous, result).await
    }

    /// Leave the current game for the start screen.
    ///
    /// Accepted in `GameOver` and `AwaitingInput`. Leaving a game that is
    /// still running ends it on the server first (best effort).
    pub async fn new_game(&self) -> ActionOutcome {
        let Some(previous) = self
            .begin(
                &[SessionPhase::AwaitingInput, SessionPhase::GameOver],
                "new game",
            )
            .await
        else {
            return ActionOutcome::Ignored;
        };

        if previous == SessionPhase::AwaitingInput {
            info!("abandoning running game");
            self.end_session_best_effort().await;
        }
        self.enter_start_screen().await;
        ActionOutcome::Settled(SessionPhase::NoSession)
    }

    // ── Internal helpers ────────────────────────────────────────────

    /// Take the `Animating` lock if the current phase is one of `accepted`.
    /// Returns the phase held before.
    async fn begin(&self, accepted: &[SessionPhase], action: &'static str) -> Option<SessionPhase> {
        let mut state = self.state.lock().await;
        if !accepted.contains(&state.phase) {
            debug!(phase = %state.phase, action, "input ignored");
            return None;
        }
        let previous = state.phase;
        state.phase = SessionPhase::Animating;
        debug!(from = %previous, action, "phase -> animating");
        Some(previous)
    }

    async fn set_phase(&self, phase: SessionPhase) {
        let mut state = self.state.lock().await;
        debug!(from = %state.phase, to = %phase, "phase change");
        state.phase = phase;
    }

    async fn settle(&self, previous: SessionPhase, result: Result<Sequence>) -> ActionOutcome {
        match result {
            Ok(sequence) => self.replay(previous, sequence).await,
            Err(err) => self.fail(previous, err).await,
        }
    }

    /// Replay a successful action's sequence, then settle on `AwaitingInput`
    /// or, if the sequence ended the game, on `GameOver`.
    async fn replay(&self, previous: SessionPhase, sequence: Sequence) -> ActionOutcome {
        let played = self
            .playback
            .play(&sequence, |_, frame| self.render_frame(frame))
            .await;
        let report = match played {
            Ok(report) => report,
            Err(busy) => {
                // The phase lock admits one action at a time, so the engine
                // is never held by anyone else here.
                warn!("{busy}");
                self.set_phase(previous).await;
                return ActionOutcome::Ignored;
            }
        };

        let phase = match report.terminal {
            Some((index, terminal)) => {
                let outcome = Outcome::from_score(terminal.score);
                info!(
                    frame = index,
                    human = terminal.score.human,
                    opponent = terminal.score.opponent,
                    outcome = %outcome,
                    "game over"
                );
                self.end_session_best_effort().await;
                self.presenter.show_game_over(outcome);
                SessionPhase::GameOver
            }
            None => SessionPhase::AwaitingInput,
        };

        let mut state = self.state.lock().await;
        state.displayed = Some(report.last);
        debug!(to = %phase, "phase change");
        state.phase = phase;
        ActionOutcome::Settled(phase)
    }

    /// Surface a failure. Session failures go through the recovery prompt
    /// and land on the start screen; all others restore `previous`.
    async fn fail(&self, previous: SessionPhase, err: OthelloError) -> ActionOutcome {
        let kind = err.kind();

        if kind.triggers_recovery() {
            warn!(kind = ?kind, "session lost: {err}");
            if self.presenter.confirm_recovery(&err).await {
                info!("recovery confirmed, ending server session");
                self.end_session_best_effort().await;
            } else {
                info!("recovery declined");
            }
            self.enter_start_screen().await;
        } else {
            warn!(kind = ?kind, "action failed: {err}");
            self.presenter.notify_error(&err);
            self.set_phase(previous).await;
        }
        ActionOutcome::Failed(kind)
    }

    async fn enter_start_screen(&self) {
        {
            let mut state = self.state.lock().await;
            debug!(from = %state.phase, "phase -> no-session");
            state.phase = SessionPhase::NoSession;
            state.displayed = None;
        }
        self.presenter.show_start_screen();
        self.presenter.set_evaluation(NEUTRAL_EVALUATION);
    }

    async fn end_session_best_effort(&self) {
        if let Err(e) = self.session.end_session().await {
            warn!("ending server session failed, ignoring: {e}");
        }
    }

    fn render_frame(&self, frame: &MoveFrame) {
        self.presenter.render_board(&frame.board);
        self.presenter.set_turn_label(frame.next_turn);
        self.presenter
            .set_scores(frame.score.human, frame.score.opponent);
        if let Some(value) = self.evaluator.evaluate(frame) {
            self.presenter.set_evaluation(value.clamp(-1.0, 1.0));
        }
    }
}

impl<T, P> std::fmt::Debug for GameController<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("playback", &self.playback)
            .field("default_strategy", &self.default_strategy)
            .finish_non_exhaustive()
    }
}
