#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Integration tests for `SessionClient`.
//!
//! Uses the shared `MockTransport` from `tests/common` to script server
//! replies and verify the requests the client builds, how replies decode,
//! and how failures are classified.

mod common;

use othello_session_client::board::{Board, Cell};
use othello_session_client::game::{Score, StrategyId, Turn};
use othello_session_client::identity::ClientIdentity;
use othello_session_client::protocol::{Method, CLIENT_ID_HEADER};
use othello_session_client::transport::{ApiRequest, ApiResponse};
use othello_session_client::{ClientConfig, FailureKind, OthelloError, SessionClient};
use tokio_test::{assert_err, assert_ok};

use common::{board_with, ended, failure, frame, opening, paths, sequence, single, MockTransport};

#[allow(clippy::type_complexity)]
fn client(
    replies: Vec<Result<ApiResponse, OthelloError>>,
) -> (
    SessionClient<MockTransport>,
    std::sync::Arc<std::sync::Mutex<Vec<ApiRequest>>>,
) {
    let (transport, requests) = MockTransport::new(replies);
    let identity = ClientIdentity::from_uuid(uuid::Uuid::from_u128(7));
    (SessionClient::new(transport, identity), requests)
}

// ════════════════════════════════════════════════════════════════════
// Request shape
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn start_session_posts_strategy_and_identity() {
    let (session, requests) = client(vec![opening()]);

    let seq = assert_ok!(session.start_session(&StrategyId::greedy()).await);
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.first().board, Board::opening());
    assert_eq!(seq.first().next_turn, Turn::Human);
    assert_eq!(seq.first().score, Score::new(2, 2));

    let requests = requests.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/api/v1/games/new");
    assert_eq!(request.client_id, "00000000-0000-0000-0000-000000000007");
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, serde_json::json!({ "strategy": "Greedy" }));
}

#[tokio::test]
async fn every_request_carries_the_same_identity() {
    let (session, requests) = client(vec![
        opening(),
        sequence(vec![frame(&Board::opening(), 'X', false, Some([2, 2]))]),
        sequence(vec![frame(&Board::opening(), 'X', false, Some([2, 2]))]),
        ended(),
    ]);

    assert_ok!(session.start_session(&StrategyId::random()).await);
    assert_ok!(session.undo().await);
    assert_ok!(session.redo().await);
    assert_ok!(session.end_session().await);

    let expected = session.identity().to_string();
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 4);
    assert!(requests.iter().all(|r| r.client_id == expected));
    assert_eq!(CLIENT_ID_HEADER, "X-User-ID");
}

#[tokio::test]
async fn submit_move_sends_zero_based_coordinates() {
    let after = board_with(&[(2, 3, Cell::Human), (3, 3, Cell::Human)]);
    let (session, requests) = client(vec![sequence(vec![
        frame(&after, 'O', false, Some([4, 1])),
        frame(&after, 'X', false, Some([3, 3])),
    ])]);

    let seq = assert_ok!(session.submit_move(2, 3).await);
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.first().score, Score::new(4, 1));
    assert_eq!(seq.last().next_turn, Turn::Human);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "/api/v1/games/move");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body, serde_json::json!({ "row": 2, "column": 3 }));
}

#[tokio::test]
async fn off_board_move_is_rejected_without_a_request() {
    let (session, requests) = client(vec![]);

    let err = assert_err!(session.submit_move(8, 0).await);
    assert!(matches!(err, OthelloError::InvalidCoordinate { row: 8, column: 0 }));
    assert_eq!(err.kind(), FailureKind::Local);
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn current_state_is_a_bodyless_get() {
    let (session, requests) = client(vec![opening()]);

    assert_ok!(session.current_state().await);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].path, "/api/v1/games/state");
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn undo_redo_and_end_hit_their_endpoints() {
    let seq = || sequence(vec![frame(&Board::opening(), 'X', false, None)]);
    let (session, requests) = client(vec![seq(), seq(), ended()]);

    assert_ok!(session.undo().await);
    assert_ok!(session.redo().await);
    assert_ok!(session.end_session().await);

    assert_eq!(
        paths(&requests),
        vec!["/api/v1/games/undo", "/api/v1/games/redo", "/api/v1/games"]
    );
    let requests = requests.lock().unwrap();
    assert_eq!(requests[2].method, Method::Delete);
    assert_eq!(requests[2].body, "{}");
}

#[tokio::test]
async fn from_config_persists_identity() {
    let path = std::env::temp_dir().join(format!(
        "othello-session-test-{}/client-id",
        uuid::Uuid::new_v4()
    ));
    let config = ClientConfig::new("http://localhost:8080").with_identity_path(&path);

    let (first, _) = MockTransport::new(vec![]);
    let (second, _) = MockTransport::new(vec![]);
    let a = SessionClient::from_config(first, &config).unwrap();
    let b = SessionClient::from_config(second, &config).unwrap();
    assert_eq!(a.identity(), b.identity());

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

// ════════════════════════════════════════════════════════════════════
// Decoding
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn counts_fall_back_to_board_when_absent() {
    let board = board_with(&[(2, 3, Cell::Human), (3, 3, Cell::Human), (2, 2, Cell::Opponent)]);
    let (session, _) = client(vec![single(frame(&board, 'X', false, None))]);

    let seq = assert_ok!(session.current_state().await);
    assert_eq!(seq.first().score, Score::new(4, 3));
}

#[tokio::test]
async fn terminal_frame_is_flagged() {
    let (session, _) = client(vec![sequence(vec![
        frame(&Board::opening(), 'O', false, Some([30, 30])),
        frame(&Board::opening(), ' ', true, Some([34, 30])),
    ])]);

    let seq = assert_ok!(session.submit_move(0, 0).await);
    let (index, last) = seq.terminal_frame().unwrap();
    assert_eq!(index, 1);
    assert_eq!(last.next_turn, Turn::Nobody);
    assert_eq!(last.score, Score::new(34, 30));
}

#[tokio::test]
async fn empty_sequence_is_a_protocol_error() {
    let (session, _) = client(vec![sequence(vec![])]);

    let err = assert_err!(session.undo().await);
    assert!(matches!(err, OthelloError::EmptySequence));
    assert_eq!(err.kind(), FailureKind::ProtocolError);
}

#[tokio::test]
async fn malformed_board_is_a_protocol_error() {
    let body = serde_json::json!([{
        "success": true,
        "nextTurn": "X",
        "board": ["        ", "        ", "   XO   "],
        "gameOver": false,
    }]);
    let (session, _) = client(vec![Ok(ApiResponse::new(200, body.to_string()))]);

    let err = assert_err!(session.redo().await);
    assert!(matches!(err, OthelloError::InvalidBoard(_)));
    assert_eq!(err.kind(), FailureKind::ProtocolError);
}

#[tokio::test]
async fn unknown_board_symbol_is_a_protocol_error() {
    let mut rows = othello_session_client::board::encode(&Board::opening());
    rows[0] = "   Q    ".into();
    let body = serde_json::json!({ "nextTurn": "X", "board": rows, "gameOver": false });
    let (session, _) = client(vec![Ok(ApiResponse::new(200, body.to_string()))]);

    let err = assert_err!(session.current_state().await);
    assert_eq!(err.kind(), FailureKind::ProtocolError);
}

#[tokio::test]
async fn non_json_success_body_is_a_protocol_error() {
    let (session, _) = client(vec![Ok(ApiResponse::new(200, "<html>oops</html>"))]);

    let err = assert_err!(session.submit_move(3, 2).await);
    assert!(matches!(err, OthelloError::Protocol(_)));
}

// ════════════════════════════════════════════════════════════════════
// Failure classification
// ════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn illegal_move_is_a_server_error() {
    let (session, _) = client(vec![failure(400, "Invalid move")]);

    let err = assert_err!(session.submit_move(0, 0).await);
    assert_eq!(err.kind(), FailureKind::ServerError);
    assert_eq!(err.to_string(), "server error: Invalid move");
}

#[tokio::test]
async fn missing_game_is_no_active_session() {
    let (session, _) = client(vec![failure(404, "Game not found")]);

    let err = assert_err!(session.current_state().await);
    assert_eq!(err.kind(), FailureKind::NoActiveSession);
    assert!(err.kind().triggers_recovery());
}

#[tokio::test]
async fn existing_game_is_a_session_conflict() {
    let (session, _) = client(vec![failure(400, "Game already exists.")]);

    let err = assert_err!(session.start_session(&StrategyId::random()).await);
    assert_eq!(err.kind(), FailureKind::SessionConflict);
    assert!(err.kind().triggers_recovery());
}

#[tokio::test]
async fn transport_failure_is_a_network_failure() {
    let (session, _) = client(vec![Err(OthelloError::Timeout)]);

    let err = assert_err!(session.undo().await);
    assert_eq!(err.kind(), FailureKind::NetworkFailure);
}

#[tokio::test]
async fn failed_end_session_reports_the_failure() {
    let (session, _) = client(vec![failure(500, "boom")]);

    let err = assert_err!(session.end_session().await);
    assert!(matches!(err, OthelloError::Server { status: 500, .. }));
}
