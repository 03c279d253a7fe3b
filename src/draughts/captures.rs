//! Recursive search of capture chains.
//!
//! Starting from a square, every diagonal is checked for an enemy piece that can
//! be jumped. Each successful jump is explored as a separate branch from its
//! landing square until no further jump is possible, at which point the chain
//! is recorded. Only the chains capturing the largest number of pieces are
//! legal.
//!
//! The board is never modified during the search. Instead, the search threads
//! two pieces of state through the recursion:
//!
//! - The square the moving piece started on is treated as empty: the piece has
//!   left it, so a chain may pass over or land on it again.
//! - Squares of already captured pieces. A captured piece is gone for the rest
//!   of the chain: its square is empty, so later jumps may pass over it or
//!   land on it, and the piece is never captured twice.
//!
//! The kind of the moving piece is fixed for the whole chain. A man passing
//! through the promotion rank keeps capturing as a man and is only promoted if
//! the chain ends there.

use arrayvec::ArrayVec;

use crate::draughts::bitboard::{Bitboard, Board};
use crate::draughts::core::{Direction, Piece, PieceKind, Square};

/// Upper bound for the number of squares in a capture path: a chain can not
/// visit more squares than there are dark squares on the board.
pub const MAX_PATH: usize = 32;

/// A complete capture chain found by the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureSequence {
    /// Squares visited by the moving piece, starting with its original square
    /// and ending with [`CaptureSequence::destination`].
    pub path: ArrayVec<Square, MAX_PATH>,
    /// Squares of the captured pieces in the order they were jumped over.
    pub captured: ArrayVec<Square, MAX_PATH>,
}

impl CaptureSequence {
    /// The square the moving piece ends the chain on.
    #[must_use]
    pub fn destination(&self) -> Square {
        // The path always starts with the origin square.
        self.path[self.path.len() - 1]
    }

    /// The square the moving piece starts the chain on.
    #[must_use]
    pub fn origin(&self) -> Square {
        self.path[0]
    }

    /// Number of pieces captured by the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captured.len()
    }

    /// Returns true if the chain has not captured anything yet. Sequences
    /// returned by [`capture_sequences`] are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    /// Returns `(from, to, captured)` for every individual jump of the chain.
    pub fn jumps(&self) -> impl Iterator<Item = (Square, Square, Square)> + '_ {
        self.path
            .windows(2)
            .zip(self.captured.iter())
            .map(|(step, &captured)| (step[0], step[1], captured))
    }
}

/// Snapshot of the board for the duration of a single capture search.
struct Search {
    piece: Piece,
    /// Occupied squares with the moving piece lifted from its origin.
    occupied: Bitboard,
    enemies: Bitboard,
}

impl Search {
    /// Finds the square of the piece that can be jumped from `from` in given
    /// direction together with all the squares the moving piece can land on
    /// after jumping over it.
    fn jump(
        &self,
        from: Square,
        direction: Direction,
        captured: Bitboard,
    ) -> Option<(Square, Bitboard)> {
        let occupied = self.occupied - captured;
        let mut ray = from.ray(direction);
        let victim = match self.piece.kind {
            PieceKind::Man => ray.next()?,
            // The first piece on the diagonal is the only candidate: the king
            // can not jump over two pieces at once.
            PieceKind::King => ray.find(|&square| occupied.contains(square))?,
        };
        if !self.enemies.contains(victim) || captured.contains(victim) {
            return None;
        }
        let beyond = victim.ray(direction).take_while(|&square| !occupied.contains(square));
        let landings: Bitboard = match self.piece.kind {
            PieceKind::Man => beyond.take(1).collect(),
            PieceKind::King => beyond.collect(),
        };
        if landings.is_empty() {
            return None;
        }
        Some((victim, landings))
    }

    fn explore(
        &self,
        current: Square,
        captured: Bitboard,
        chain: &mut CaptureSequence,
        sequences: &mut Vec<CaptureSequence>,
    ) {
        let mut extended = false;
        for direction in Direction::ALL {
            let Some((victim, landings)) = self.jump(current, direction, captured) else {
                continue;
            };
            // Landings are visited in the order of distance from the victim.
            let mut landings = landings.iter().collect::<ArrayVec<Square, 8>>();
            if matches!(direction, Direction::DownLeft | Direction::DownRight) {
                landings.reverse();
            }
            for landing in landings {
                extended = true;
                chain.path.push(landing);
                chain.captured.push(victim);
                self.explore(
                    landing,
                    captured | Bitboard::from(victim),
                    chain,
                    sequences,
                );
                let _ = chain.path.pop();
                let _ = chain.captured.pop();
            }
        }
        if !extended && !chain.captured.is_empty() {
            sequences.push(chain.clone());
        }
    }
}

/// Returns all capture chains of maximal length available to the `piece`
/// standing on `square`. The result is empty if the piece can not capture
/// anything.
///
/// Chains are listed in discovery order: directions in the order of
/// [`Direction::ALL`], nearer landing squares before farther ones.
#[must_use]
pub fn capture_sequences(board: &Board, square: Square, piece: Piece) -> Vec<CaptureSequence> {
    let search = Search::new(board, square, piece);
    let mut chain = CaptureSequence {
        path: ArrayVec::new(),
        captured: ArrayVec::new(),
    };
    chain.path.push(square);
    let mut sequences = Vec::new();
    search.explore(square, Bitboard::empty(), &mut chain, &mut sequences);
    let longest = sequences.iter().map(CaptureSequence::len).max().unwrap_or(0);
    sequences.retain(|sequence| sequence.len() == longest);
    sequences
}

/// Checks whether the `piece` standing on `square` has at least one capture.
/// This is cheaper than [`capture_sequences`] because it only looks at the
/// first jump of each chain.
#[must_use]
pub fn can_capture(board: &Board, square: Square, piece: Piece) -> bool {
    let search = Search::new(board, square, piece);
    Direction::ALL
        .into_iter()
        .any(|direction| search.jump(square, direction, Bitboard::empty()).is_some())
}

impl Search {
    fn new(board: &Board, origin: Square, piece: Piece) -> Self {
        Self {
            piece,
            occupied: board.occupied() - Bitboard::from(origin),
            enemies: board.player_pieces(piece.owner.opponent()).all(),
        }
    }
}
