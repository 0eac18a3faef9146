//! # Terminal Game Example
//!
//! Plays Othello against a game server from the terminal:
//!
//! 1. Connect to the server over HTTP
//! 2. Start a game (or resume the one the server still holds for you)
//! 3. Enter moves like `d3`; watch your move and the reply replay
//! 4. Undo, redo, or abandon the game at any time
//!
//! ## Running
//!
//! ```sh
//! # Start the game server on localhost:8080, then:
//! cargo run --example terminal_game
//!
//! # Override the server URL:
//! OTHELLO_URL=http://my-server:8080 cargo run --example terminal_game
//! ```
//!
//! The client identity is kept in `.othello-client-id` in the working
//! directory, so a restarted client can `resume` its game.

use std::sync::Arc;

use async_trait::async_trait;
use othello_session_client::board::{Board, BOARD_SIZE};
use othello_session_client::game::{Outcome, StrategyId, Turn};
use othello_session_client::{
    ActionOutcome, ClientConfig, GameController, HttpTransport, OthelloError, Presenter,
    SessionClient,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Default server URL when `OTHELLO_URL` is not set.
const DEFAULT_URL: &str = "http://localhost:8080";

const HELP: &str = "commands: start [Random|Greedy] | resume | <a-h><1-8> | undo | redo | new | quit";

type Input = Arc<Mutex<Lines<BufReader<Stdin>>>>;

// ─────────────────────────────────────────────────────────────────────
// Presenter
// ─────────────────────────────────────────────────────────────────────

/// Prints everything to stdout and asks recovery questions on stdin.
struct TerminalPresenter {
    input: Input,
}

#[async_trait]
impl Presenter for TerminalPresenter {
    fn render_board(&self, board: &Board) {
        println!();
        println!("  a b c d e f g h");
        for (index, line) in board.to_string().lines().enumerate() {
            let spaced: Vec<String> = line.chars().map(String::from).collect();
            println!("{} {}", index + 1, spaced.join(" "));
        }
    }

    fn set_turn_label(&self, turn: Turn) {
        match turn {
            Turn::Human => println!("Your turn (X)"),
            Turn::Opponent => println!("Opponent's turn (O)"),
            Turn::Nobody => println!("No moves left"),
        }
    }

    fn set_scores(&self, human: u32, opponent: u32) {
        println!("X {human} : {opponent} O");
    }

    fn set_evaluation(&self, value: f32) {
        tracing::debug!(value, "evaluation");
    }

    fn show_game_over(&self, outcome: Outcome) {
        println!();
        println!("*** {} ***", outcome.banner());
        println!("type `new` or `start` to play again");
    }

    fn show_start_screen(&self) {
        println!();
        println!("Othello");
        println!("{HELP}");
    }

    fn notify_error(&self, error: &OthelloError) {
        println!("! {} ({error})", error.kind().description());
    }

    async fn confirm_recovery(&self, error: &OthelloError) -> bool {
        println!("! {error}");
        println!("End the game stored on the server and start over? [y/N]");
        let answer = self.input.lock().await.next_line().await;
        matches!(answer, Ok(Some(line)) if line.trim().eq_ignore_ascii_case("y"))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Input parsing
// ─────────────────────────────────────────────────────────────────────

/// Parse `d3`-style coordinates into zero-based `(row, column)`.
fn parse_square(text: &str) -> Option<(u8, u8)> {
    let mut chars = text.chars();
    let file = chars.next()?.to_ascii_lowercase();
    let rank = chars.next()?.to_digit(10)?;
    if chars.next().is_some() || !file.is_ascii_lowercase() {
        return None;
    }
    let column = u8::try_from(u32::from(file).checked_sub(u32::from('a'))?).ok()?;
    let row = u8::try_from(rank.checked_sub(1)?).ok()?;
    let size = u8::try_from(BOARD_SIZE).ok()?;
    (row < size && column < size).then_some((row, column))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Logging ─────────────────────────────────────────────────────
    // Set `RUST_LOG=debug` to see every request and phase change.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // ── Configuration ───────────────────────────────────────────────
    let url = std::env::var("OTHELLO_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let config = ClientConfig::new(url).with_identity_path(".othello-client-id");
    tracing::info!(url = %config.base_url, "using game server");

    let transport = HttpTransport::from_config(&config)?;
    let session = SessionClient::from_config(transport, &config)?;
    tracing::info!(identity = %session.identity(), "client identity");

    let input: Input = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let presenter = TerminalPresenter {
        input: Arc::clone(&input),
    };
    let controller = GameController::new(session, presenter, &config);

    controller.show_start_screen().await;

    // ── Command loop ────────────────────────────────────────────────
    loop {
        let line = input.lock().await.next_line().await?;
        let Some(line) = line else {
            break;
        };
        let mut words = line.split_whitespace();
        let outcome = match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("quit" | "exit"), _) => break,
            (Some("start"), None) => controller.start_default().await,
            (Some("start"), Some(strategy)) => controller.start(&StrategyId::from(strategy)).await,
            (Some("resume"), _) => controller.resume().await,
            (Some("undo"), _) => controller.undo().await,
            (Some("redo"), _) => controller.redo().await,
            (Some("new"), _) => controller.new_game().await,
            (Some(square), _) => match parse_square(square) {
                Some((row, column)) => controller.click(row, column).await,
                None => {
                    println!("{HELP}");
                    continue;
                }
            },
        };
        if outcome == ActionOutcome::Ignored {
            println!("(not now: {})", controller.phase().await);
        }
    }

    tracing::info!("bye");
    Ok(())
}
