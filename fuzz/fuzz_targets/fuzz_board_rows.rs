#![no_main]

use libfuzzer_sys::fuzz_target;
use othello_session_client::board;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let rows: Vec<&str> = text.split('\n').collect();

    // Anything that decodes must encode back to the same rows.
    if let Ok(decoded) = board::decode(&rows) {
        assert_eq!(board::encode(&decoded), rows);
    }
});
