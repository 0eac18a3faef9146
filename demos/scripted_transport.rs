//! # Scripted Transport Example
//!
//! Shows how to implement the [`Transport`] trait without a network. The
//! transport below answers from a fixed script, which is handy for:
//!
//! - **Testing**: drive the controller through a whole game offline
//! - **Custom backends**: the same trait wraps any request/response channel
//!
//! ## Running
//!
//! ```sh
//! cargo run --example scripted_transport
//! RUST_LOG=othello_session_client=debug cargo run --example scripted_transport
//! ```

use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use async_trait::async_trait;
use othello_session_client::board::{self, Board, Cell};
use othello_session_client::game::{Outcome, StrategyId, Turn};
use othello_session_client::protocol::WireFrame;
use othello_session_client::transport::{ApiRequest, ApiResponse};
use othello_session_client::{
    ClientConfig, ClientIdentity, GameController, OthelloError, Presenter, SessionClient,
    Transport,
};

// ─────────────────────────────────────────────────────────────────────
// Step 1: A transport that replays canned responses
// ─────────────────────────────────────────────────────────────────────

/// Answers each request with the next scripted response.
struct ScriptedTransport {
    script: StdMutex<VecDeque<ApiResponse>>,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, OthelloError> {
        println!("  -> {} {} {}", request.method.as_str(), request.path, request.body);
        let next = self
            .script
            .lock()
            .map_err(|_| OthelloError::Network("script lock poisoned".into()))?
            .pop_front();
        next.ok_or_else(|| OthelloError::Network("script exhausted".into()))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Step 2: A presenter that logs what a UI would draw
// ─────────────────────────────────────────────────────────────────────

struct LogPresenter;

#[async_trait]
impl Presenter for LogPresenter {
    fn render_board(&self, board: &Board) {
        print!("{board}");
    }

    fn set_turn_label(&self, turn: Turn) {
        println!("  turn: {turn:?}");
    }

    fn set_scores(&self, human: u32, opponent: u32) {
        println!("  score: {human}-{opponent}");
    }

    fn set_evaluation(&self, value: f32) {
        println!("  evaluation: {value:+.2}");
    }

    fn show_game_over(&self, outcome: Outcome) {
        println!("== {outcome} ==");
    }

    fn show_start_screen(&self) {
        println!("== start screen ==");
    }

    fn notify_error(&self, error: &OthelloError) {
        println!("  error: {error}");
    }

    async fn confirm_recovery(&self, _error: &OthelloError) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────
// Step 3: Script a short game
// ─────────────────────────────────────────────────────────────────────

fn frame(board: &Board, next_turn: char, game_over: bool) -> WireFrame {
    WireFrame {
        success: Some(true),
        next_turn,
        board: board::encode(board),
        game_over,
        pieces_count: None,
    }
}

fn script() -> Result<VecDeque<ApiResponse>, OthelloError> {
    let opening = Board::opening();

    let mut after_move = opening;
    after_move.set(2, 3, Cell::Human);
    after_move.set(3, 3, Cell::Human);

    let mut after_reply = after_move;
    after_reply.set(2, 2, Cell::Opponent);
    after_reply.set(3, 3, Cell::Opponent);

    // Every remaining square goes to the human.
    let mut finished = after_reply;
    for row in 0..board::BOARD_SIZE {
        for column in 0..board::BOARD_SIZE {
            if finished.get(row, column) == Some(Cell::Empty) {
                finished.set(row, column, Cell::Human);
            }
        }
    }

    Ok(VecDeque::from(vec![
        ApiResponse::new(200, serde_json::to_string(&frame(&opening, 'X', false))?),
        ApiResponse::new(
            200,
            serde_json::to_string(&[frame(&after_move, 'O', false), frame(&after_reply, 'X', false)])?,
        ),
        ApiResponse::new(200, serde_json::to_string(&[frame(&finished, ' ', true)])?),
        ApiResponse::new(200, ""),
    ]))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let transport = ScriptedTransport {
        script: StdMutex::new(script()?),
    };
    let session = SessionClient::new(transport, ClientIdentity::ephemeral());
    let config = ClientConfig::new("scripted://").with_frame_delay(Duration::from_millis(300));
    let controller = GameController::new(session, LogPresenter, &config).with_evaluator(
        |frame: &othello_session_client::MoveFrame| {
            let total = frame.score.human + frame.score.opponent;
            // Share of the pieces the opponent leads by; positive favours them.
            let lead = f64::from(frame.score.opponent) - f64::from(frame.score.human);
            (total > 0).then(|| (lead / f64::from(total)) as f32)
        },
    );

    controller.show_start_screen().await;
    println!("start: {:?}", controller.start(&StrategyId::greedy()).await);
    println!("move d3: {:?}", controller.click(2, 3).await);
    println!("move a1: {:?}", controller.click(0, 0).await);
    println!("undo after game over: {:?}", controller.undo().await);
    println!("new game: {:?}", controller.new_game().await);
    Ok(())
}
