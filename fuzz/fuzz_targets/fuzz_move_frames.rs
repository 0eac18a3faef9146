#![no_main]

use libfuzzer_sys::fuzz_target;
use othello_session_client::game::{MoveFrame, Sequence};
use othello_session_client::protocol::WireFrame;

fuzz_target!(|data: &[u8]| {
    // Sequence replies (move, undo, redo).
    if let Ok(wire) = serde_json::from_slice::<Vec<WireFrame>>(data) {
        if let Ok(seq) = Sequence::from_wire(wire) {
            if let Some((index, frame)) = seq.terminal_frame() {
                assert!(index < seq.len());
                assert!(frame.terminal);
            }
        }
    }

    // Single-frame replies (new game, state).
    if let Ok(wire) = serde_json::from_slice::<WireFrame>(data) {
        let _ = MoveFrame::try_from(wire);
    }
});
