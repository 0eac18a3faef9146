#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing,
    dead_code
)]
//! Shared test utilities for the session client integration tests.
//!
//! Provides a scripted [`MockTransport`], a [`RecordingPresenter`] that logs
//! every display call with its (virtual) timestamp, and helpers for building
//! server response JSON.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use othello_session_client::board::{self, Board, Cell};
use othello_session_client::game::{Outcome, Turn};
use othello_session_client::transport::{ApiRequest, ApiResponse};
use othello_session_client::{FailureKind, OthelloError, Presenter, Transport};
use serde_json::{json, Value};
use tokio::time::Instant;

// ── MockTransport ───────────────────────────────────────────────────

/// A scripted transport for integration testing.
///
/// Scripted replies are consumed in order, one per request. Every request
/// the client sends is recorded in `requests`. Once the script runs out,
/// requests fail with a network error.
pub struct MockTransport {
    replies: StdMutex<VecDeque<Result<ApiResponse, OthelloError>>>,
    /// Recorded outgoing requests.
    pub requests: Arc<StdMutex<Vec<ApiRequest>>>,
    /// Simulated round-trip time, slept before answering.
    latency: Duration,
}

impl MockTransport {
    /// Create a mock transport with the given scripted replies.
    ///
    /// Returns the transport plus a shared handle on the recorded requests.
    pub fn new(replies: Vec<Result<ApiResponse, OthelloError>>) -> (Self, Arc<StdMutex<Vec<ApiRequest>>>) {
        let requests = Arc::new(StdMutex::new(Vec::new()));
        let transport = Self {
            replies: StdMutex::new(VecDeque::from(replies)),
            requests: Arc::clone(&requests),
            latency: Duration::ZERO,
        };
        (transport, requests)
    }

    /// Answer every request only after `latency` has passed.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, OthelloError> {
        self.requests.lock().unwrap().push(request);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(OthelloError::Network("script exhausted".into())))
    }
}

/// Paths of all recorded requests, in order.
pub fn paths(requests: &Arc<StdMutex<Vec<ApiRequest>>>) -> Vec<&'static str> {
    requests.lock().unwrap().iter().map(|r| r.path).collect()
}

// ── RecordingPresenter ──────────────────────────────────────────────

/// One call made on the presenter.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Board(Board),
    Turn(Turn),
    Scores(u32, u32),
    Evaluation(f32),
    GameOver(Outcome),
    StartScreen,
    Error(FailureKind),
    RecoveryPrompt(FailureKind),
}

/// A presenter that records every call with the time it was made.
pub struct RecordingPresenter {
    log: StdMutex<Vec<(Instant, Shown)>>,
    confirm: AtomicBool,
    prompts: AtomicUsize,
}

impl RecordingPresenter {
    /// A presenter that answers every recovery prompt with `confirm`.
    pub fn new(confirm: bool) -> Self {
        Self {
            log: StdMutex::new(Vec::new()),
            confirm: AtomicBool::new(confirm),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn set_confirm(&self, confirm: bool) {
        self.confirm.store(confirm, Ordering::SeqCst);
    }

    /// Everything shown so far, without timestamps.
    pub fn shown(&self) -> Vec<Shown> {
        self.log.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }

    /// Everything shown so far, with timestamps.
    pub fn timeline(&self) -> Vec<(Instant, Shown)> {
        self.log.lock().unwrap().clone()
    }

    /// Boards rendered so far, in order, with their timestamps.
    pub fn boards(&self) -> Vec<(Instant, Board)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(at, s)| match s {
                Shown::Board(b) => Some((*at, *b)),
                _ => None,
            })
            .collect()
    }

    pub fn last_scores(&self) -> Option<(u32, u32)> {
        self.shown().into_iter().rev().find_map(|s| match s {
            Shown::Scores(h, o) => Some((h, o)),
            _ => None,
        })
    }

    pub fn count(&self, wanted: &Shown) -> usize {
        self.shown().iter().filter(|s| *s == wanted).count()
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }

    fn push(&self, shown: Shown) {
        self.log.lock().unwrap().push((Instant::now(), shown));
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    fn render_board(&self, board: &Board) {
        self.push(Shown::Board(*board));
    }

    fn set_turn_label(&self, turn: Turn) {
        self.push(Shown::Turn(turn));
    }

    fn set_scores(&self, human: u32, opponent: u32) {
        self.push(Shown::Scores(human, opponent));
    }

    fn set_evaluation(&self, value: f32) {
        self.push(Shown::Evaluation(value));
    }

    fn show_game_over(&self, outcome: Outcome) {
        self.push(Shown::GameOver(outcome));
    }

    fn show_start_screen(&self) {
        self.push(Shown::StartScreen);
    }

    fn notify_error(&self, error: &OthelloError) {
        self.push(Shown::Error(error.kind()));
    }

    async fn confirm_recovery(&self, error: &OthelloError) -> bool {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.push(Shown::RecoveryPrompt(error.kind()));
        self.confirm.load(Ordering::SeqCst)
    }
}

// ── Board helpers ───────────────────────────────────────────────────

/// The opening board with extra pieces placed at `(row, column, cell)`.
pub fn board_with(cells: &[(usize, usize, Cell)]) -> Board {
    let mut b = Board::opening();
    for &(row, column, cell) in cells {
        assert!(b.set(row, column, cell), "({row}, {column}) is off the board");
    }
    b
}

// ── JSON helper functions ───────────────────────────────────────────

/// One frame as the server encodes it. `counts` of `None` omits
/// `piecesCount`, as the state and new-game endpoints do.
pub fn frame(board: &Board, next_turn: char, game_over: bool, counts: Option<[u32; 2]>) -> Value {
    let mut value = json!({
        "success": true,
        "nextTurn": next_turn.to_string(),
        "board": board::encode(board),
        "gameOver": game_over,
    });
    if let Some(counts) = counts {
        value["piecesCount"] = json!(counts);
    }
    value
}

/// A 200 reply carrying one frame.
pub fn single(frame: Value) -> Result<ApiResponse, OthelloError> {
    Ok(ApiResponse::new(200, frame.to_string()))
}

/// A 200 reply carrying a frame sequence.
pub fn sequence(frames: Vec<Value>) -> Result<ApiResponse, OthelloError> {
    Ok(ApiResponse::new(200, Value::Array(frames).to_string()))
}

/// A 200 reply carrying the opening frame, human to move.
pub fn opening() -> Result<ApiResponse, OthelloError> {
    single(frame(&Board::opening(), 'X', false, None))
}

/// A reply with `status` and a `{message}` payload.
pub fn failure(status: u16, message: &str) -> Result<ApiResponse, OthelloError> {
    Ok(ApiResponse::new(status, json!({ "message": message }).to_string()))
}

/// A 200 reply with an empty body, as the end-session endpoint sends.
pub fn ended() -> Result<ApiResponse, OthelloError> {
    Ok(ApiResponse::new(200, ""))
}
