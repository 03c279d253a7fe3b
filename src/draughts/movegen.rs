//! Legal move generation.
//!
//! Draughts rules make capturing mandatory: if any piece of the side to move
//! can capture, only the capture chains of maximal length are legal and all
//! other pieces are frozen for the turn. Otherwise men step one square
//! diagonally forward and kings slide along the diagonals until they hit the
//! edge of the board or another piece.
//!
//! A legal move is identified by its source and final square only. For
//! captures, the final square is the destination of the whole chain (see
//! [`crate::draughts::captures`]).

use crate::draughts::bitboard::{Bitboard, Board};
use crate::draughts::captures::{can_capture, capture_sequences};
use crate::draughts::core::{Direction, Move, Piece, PieceKind, Player, Square};

/// Checks whether any piece of the `player` can capture, which makes
/// capturing mandatory for the whole turn.
#[must_use]
pub fn has_mandatory_capture(board: &Board, player: Player) -> bool {
    board
        .pieces(player)
        .any(|(square, piece)| can_capture(board, square, piece))
}

/// Final squares of the maximal capture chains of the piece on `square`.
#[must_use]
pub fn capture_destinations(board: &Board, square: Square, piece: Piece) -> Bitboard {
    capture_sequences(board, square, piece)
        .iter()
        .map(|sequence| sequence.destination())
        .collect()
}

/// Non-capturing moves of the piece on `square`.
#[must_use]
pub fn quiet_destinations(board: &Board, square: Square, piece: Piece) -> Bitboard {
    let occupied = board.occupied();
    match piece.kind {
        PieceKind::Man => piece
            .owner
            .forward()
            .into_iter()
            .filter_map(|direction| square.shift(direction))
            .filter(|&target| !occupied.contains(target))
            .collect(),
        PieceKind::King => Direction::ALL
            .into_iter()
            .flat_map(|direction| {
                square
                    .ray(direction)
                    .take_while(move |&target| !occupied.contains(target))
            })
            .collect(),
    }
}

/// Returns the set of squares the piece on `square` can legally move to when
/// `player` is to move. The set is empty if the square is empty, holds a piece
/// of the other player or if the piece is frozen because another piece has to
/// capture.
#[must_use]
pub fn legal_destinations(board: &Board, player: Player, square: Square) -> Bitboard {
    let Some(piece) = board.at(square) else {
        return Bitboard::empty();
    };
    if piece.owner != player {
        return Bitboard::empty();
    }
    if has_mandatory_capture(board, player) {
        return capture_destinations(board, square, piece);
    }
    quiet_destinations(board, square, piece)
}

/// Calculates the list of all legal moves of the `player`: pieces in the order
/// of their squares, destinations of each piece in the same order.
#[must_use]
pub fn generate_moves(board: &Board, player: Player) -> Vec<Move> {
    let destinations: fn(&Board, Square, Piece) -> Bitboard =
        if has_mandatory_capture(board, player) {
            capture_destinations
        } else {
            quiet_destinations
        };
    // The branching factor in draughts is much lower than in chess: 16 covers
    // the vast majority of positions.
    let mut moves = Vec::with_capacity(16);
    for (from, piece) in board.pieces(player) {
        moves.extend(
            destinations(board, from, piece)
                .iter()
                .map(|to| Move::new(from, to)),
        );
    }
    moves
}

/// Checks whether the `player` can move at all. A player without pieces has
/// no moves either.
#[must_use]
pub fn has_legal_moves(board: &Board, player: Player) -> bool {
    board.pieces(player).any(|(square, piece)| {
        can_capture(board, square, piece) || quiet_destinations(board, square, piece).has_any()
    })
}
