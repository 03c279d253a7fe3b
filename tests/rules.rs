use pretty_assertions::assert_eq;
use shashki::draughts::core::{Move, Piece, PieceKind, Player, Square};
use shashki::draughts::position::{GameStatus, Position};
use shashki::draughts::MoveRejected;

fn setup(input: &str) -> Position {
    Position::try_from(input).unwrap_or_else(|e| panic!("parsing legal position {input}: {e}"))
}

fn play(position: &Position, next_move: &str) -> Position {
    position
        .make_move(Move::try_from(next_move).unwrap())
        .unwrap_or_else(|e| panic!("playing {next_move} in {position}: {e}"))
}

const WHITE_MAN: Piece = Piece::new(Player::White, PieceKind::Man);
const WHITE_KING: Piece = Piece::new(Player::White, PieceKind::King);

#[test]
fn setup_invariant() {
    let position = Position::starting();
    assert_eq!(position.board().len(), 24);
    for player in [Player::White, Player::Black] {
        assert_eq!(position.board().pieces(player).count(), 12);
        assert!(position
            .board()
            .pieces(player)
            .all(|(square, piece)| square.is_dark() && piece.kind == PieceKind::Man));
    }
}

#[test]
fn opening_move() {
    let before = Position::starting();
    let after = play(&before, "d3-c4");
    assert_eq!(after.side_to_move(), Player::Black);
    assert!(after.to_string().ends_with(" b 0"));
    assert_eq!(after.board().at(Square::D3), None);
    assert_eq!(after.board().at(Square::C4), Some(WHITE_MAN));
    assert!(!after.is_terminal());
    // The original position is untouched.
    assert_eq!(before, Position::starting());
}

#[test]
fn reject_move_from_empty_square() {
    let position = Position::starting();
    assert_eq!(
        position.make_move(Move::new(Square::A1, Square::B2)),
        Err(MoveRejected {
            from: Square::A1,
            to: Square::B2
        })
    );
}

#[test]
fn reject_ignoring_mandatory_capture() {
    let position = setup("b-b-b-b-/-b-b-b-b/b-b---b-/---b----/--w-----/-w---w-w/w-w-w-w-/-w-w-w-w w 0");
    assert!(position.make_move(Move::new(Square::F3, Square::E4)).is_err());
    assert!(position.make_move(Move::new(Square::C4, Square::B5)).is_err());
    let position = play(&position, "c4-e6");
    assert_eq!(position.board().at(Square::D5), None);
    assert_eq!(position.board().at(Square::E6), Some(WHITE_MAN));
}

#[test]
fn promotion_timing() {
    // Passing through e8 in the middle of the chain does not promote.
    let position = play(
        &setup("b-------/---b-b--/--w-----/--------/--------/--------/--------/-------- w 0"),
        "c6-g6",
    );
    assert_eq!(position.board().at(Square::G6), Some(WHITE_MAN));
    // Ending the chain on the last rank does.
    let position = play(
        &setup("--------/-----b--/b---w---/--------/--------/--------/--------/-------- w 0"),
        "e6-g8",
    );
    assert_eq!(position.board().at(Square::G8), Some(WHITE_KING));
    // Simple moves too.
    let position = play(
        &setup("--------/-w------/--------/--------/--------/-------b/--------/-------- w 0"),
        "b7-a8",
    );
    assert_eq!(position.board().at(Square::A8), Some(WHITE_KING));
}

#[test]
fn ambiguous_king_capture_plays_first_chain() {
    // Both d1-f3-c6-a4 (over e2, e4, b5) and d1-h5-e8-a4 (over e2, f7, b5)
    // end on a4.
    let position = setup("--------/-----b--/--------/-b------/----b---/--------/----b---/---W---- w 0");
    let position = play(&position, "d1-a4");
    assert_eq!(
        position.to_string(),
        "--------/-----b--/--------/--------/W-------/--------/--------/-------- b 0"
    );
}

#[test]
fn terminal_win() {
    let position = play(
        &setup("--------/--------/--------/--------/----b---/---w----/--------/-------- w 0"),
        "d3-f5",
    );
    assert!(position.board().pieces(Player::Black).next().is_none());
    assert!(position.is_terminal());
    assert_eq!(position.winner(), Some(Player::White));
    assert_eq!(position.status(), GameStatus::WhiteWon);

    // Black wins by leaving White without pieces.
    let position = setup("b-----b-/-b-b---b/----b---/--------/--------/--------/----b-b-/-B------ w 1");
    assert_eq!(position.winner(), Some(Player::Black));
    assert_eq!(position.status(), GameStatus::BlackWon);
}

#[test]
fn blocked_side_loses() {
    let position = play(
        &setup("--------/--------/--------/--------/--------/---w----/--------/-------b w 0"),
        "d3-c4",
    );
    assert!(position.is_terminal());
    assert_eq!(position.winner(), Some(Player::White));
}

#[test]
fn round_trip_through_games() {
    // Walks through deterministic games picking moves by a simple pattern and
    // checks that every position survives encoding and decoding.
    for seed in 0..8 {
        let mut position = Position::starting();
        for ply in 0..200 {
            let encoded = position.to_string();
            let decoded = Position::decode(&encoded);
            assert_eq!(decoded, position, "{encoded}");
            assert_eq!(decoded.is_terminal(), position.is_terminal());
            assert_eq!(decoded.winner(), position.winner());
            let moves = position.generate_moves();
            if moves.is_empty() {
                assert!(position.is_terminal());
                break;
            }
            let next_move = moves[(seed * 7 + ply * 3) % moves.len()];
            position = position.make_move(next_move).unwrap();
        }
    }
}
