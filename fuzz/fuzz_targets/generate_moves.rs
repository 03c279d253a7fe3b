#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use shashki::draughts::position::Position;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(position) = Position::from_encoding(input) else {
        return;
    };
    let moves = position.generate_moves();
    assert_eq!(moves.is_empty(), position.is_terminal() || !position.has_legal_moves(position.side_to_move()));
    for next_move in moves {
        assert!(position.legal_destinations(next_move.from()).contains(next_move.to()));
        let next = position
            .make_move(next_move)
            .expect("generated moves should be accepted");
        assert_eq!(next.side_to_move(), position.side_to_move().opponent());
        assert!(next.board().len() <= position.board().len());
        assert_eq!(Position::decode(&next.to_string()), next);
    }
});
