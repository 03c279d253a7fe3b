#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use shashki::draughts::position::Position;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Lenient decoding never fails.
        let _ = Position::decode(s);
        if let Ok(position) = Position::from_encoding(s) {
            assert_eq!(position.to_string(), s);
        }
    }
});
