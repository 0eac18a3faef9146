//! # Othello Session Client
//!
//! Client-side session control and animated move playback for an Othello
//! (Reversi) game hosted on a server.
//!
//! The server owns the rules, the opponent, and the game history. This crate
//! owns everything between the user and that server: it sends actions,
//! decodes the board snapshots that come back, replays them at a fixed
//! cadence, and enforces which input is accepted at which moment.
//!
//! ## Layers
//!
//! - [`SessionClient`]: one typed call per remote operation over any
//!   [`Transport`]. [`HttpTransport`] is built in behind the default
//!   `transport-http` feature.
//! - [`board`]: the eight-row text codec for board snapshots.
//! - [`PlaybackEngine`]: timed, non-interruptible replay of a frame sequence.
//! - [`GameController`]: the session state machine.
//! - [`Presenter`]: the interface a UI implements to show all of the above.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use othello_session_client::{ClientConfig, GameController, HttpTransport, SessionClient};
//! use othello_session_client::game::StrategyId;
//!
//! let config = ClientConfig::new("http://localhost:8080")
//!     .with_identity_path("othello-client-id");
//! let transport = HttpTransport::from_config(&config)?;
//! let session = SessionClient::from_config(transport, &config)?;
//! let controller = GameController::new(session, MyPresenter::default(), &config);
//!
//! controller.show_start_screen().await;
//! controller.start(&StrategyId::greedy()).await;
//! controller.click(2, 3).await;
//! ```

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod failure;
pub mod game;
pub mod identity;
pub mod playback;
pub mod presenter;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod transports;

// Re-export primary types for ergonomic imports.
pub use board::Board;
pub use config::ClientConfig;
pub use controller::{ActionOutcome, GameController};
pub use error::OthelloError;
pub use failure::FailureKind;
pub use game::{MoveFrame, Sequence, SessionPhase};
pub use identity::ClientIdentity;
pub use playback::PlaybackEngine;
pub use presenter::{Evaluator, NeutralEvaluator, Presenter};
pub use session::SessionClient;
pub use transport::Transport;

#[cfg(feature = "transport-http")]
pub use transports::HttpTransport;
