//! Provides fully-specified draughts [`Position`]: the board, the side to move
//! and whether the game is over. Every accepted move produces a new
//! [`Position`]; existing positions are never modified.
//!
//! The textual encoding of the position is used both for storage and for
//! exchanging positions with the engine:
//!
//! ```text
//! b-b-b-b-/-b-b-b-b/b-b-b-b-/--------/--------/-w-w-w-w/w-w-w-w-/-w-w-w-w w 0
//! ```
//!
//! Eight rows from the eighth rank down to the first one, eight symbols each
//! (`-` for an empty square, `w`/`b` for men and `W`/`B` for kings), followed
//! by the side to move and the game over flag.

use std::fmt::{self, Write};

use anyhow::{bail, Context};
use tracing::{debug, warn};

use crate::draughts::bitboard::{Bitboard, Board};
use crate::draughts::captures::capture_sequences;
use crate::draughts::core::{File, Move, Player, Rank, Square, BOARD_WIDTH};
use crate::draughts::error::MoveRejected;
use crate::draughts::movegen;

/// Outcome of the game as seen from the position. There are no draws: a
/// position without progress may repeat indefinitely.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    WhiteWon,
    BlackWon,
}

/// State of the draughts game. It has 1:1 relationship with the textual
/// encoding (see module documentation).
///
/// The winner is not stored: once the game is over, the side that is *not* to
/// move is the one that made the last move and has won.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Player,
    over: bool,
}

impl Position {
    /// Creates the starting position: 12 men per side, White to move.
    ///
    /// ```
    /// use shashki::draughts::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     &starting_position.to_string(),
    ///     "b-b-b-b-/-b-b-b-b/b-b-b-b-/--------/--------/-w-w-w-w/w-w-w-w-/-w-w-w-w w 0"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Player::White,
            over: false,
        }
    }

    /// Creates an empty board with White to move, to be filled by the parser.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Player::White,
            over: false,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// The game is over: the side to move has no pieces or no legal moves.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.over
    }

    /// The side that made the last move of a finished game.
    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        if self.over {
            Some(self.side_to_move.opponent())
        } else {
            None
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        match self.winner() {
            None => GameStatus::InProgress,
            Some(Player::White) => GameStatus::WhiteWon,
            Some(Player::Black) => GameStatus::BlackWon,
        }
    }

    /// Checks whether the side to move is obliged to capture.
    #[must_use]
    pub fn has_mandatory_capture(&self) -> bool {
        movegen::has_mandatory_capture(&self.board, self.side_to_move)
    }

    /// Checks whether the `player` would have any legal move if it was their
    /// turn.
    #[must_use]
    pub fn has_legal_moves(&self, player: Player) -> bool {
        movegen::has_legal_moves(&self.board, player)
    }

    /// Returns the squares the piece on `square` can move to. Empty if the
    /// square does not hold a piece of the side to move or the piece can not
    /// move this turn.
    ///
    /// A finished game has no legal moves at all. Positions reached by play
    /// only get the flag when the side to move is stuck, but a decoded
    /// position carries whatever flag it was given and the flag wins over the
    /// board.
    #[must_use]
    pub fn legal_destinations(&self, square: Square) -> Bitboard {
        if self.over {
            return Bitboard::empty();
        }
        movegen::legal_destinations(&self.board, self.side_to_move, square)
    }

    /// Calculates the list of legal moves of the side to move. Empty once the
    /// game is over, see [`Position::legal_destinations`].
    #[must_use]
    pub fn generate_moves(&self) -> Vec<Move> {
        if self.over {
            return Vec::new();
        }
        movegen::generate_moves(&self.board, self.side_to_move)
    }

    /// Plays the move and returns the resulting position. The side to move is
    /// flipped and the game is marked as over if the opponent is left without
    /// pieces or moves.
    ///
    /// For captures the destination is the final square of the chain. If
    /// several maximal chains end on the same square, the first one found by
    /// the capture search is played.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejected`] if the move is not legal in this position.
    pub fn make_move(&self, next_move: Move) -> Result<Self, MoveRejected> {
        let (from, to) = (next_move.from(), next_move.to());
        let reject = |reason: &str| {
            debug!(%next_move, position = %self, "rejected move: {reason}");
            MoveRejected::from(next_move)
        };
        if self.over {
            return Err(reject("the game is over"));
        }
        let Some(piece) = self.board.at(from) else {
            return Err(reject("no piece on the source square"));
        };
        if piece.owner != self.side_to_move {
            return Err(reject("the piece belongs to the opponent"));
        }

        let mut board = self.board;
        let _ = board.take(from);
        if self.has_mandatory_capture() {
            let sequences = capture_sequences(&self.board, from, piece);
            let Some(sequence) = sequences
                .iter()
                .find(|sequence| sequence.destination() == to)
            else {
                return Err(reject("the destination is not reachable by a capture"));
            };
            // The piece keeps its kind while jumping: promotion happens only
            // at the end of the chain.
            for (_, _, captured) in sequence.jumps() {
                let _ = board.take(captured);
            }
        } else if !movegen::quiet_destinations(&self.board, from, piece).contains(to) {
            return Err(reject("the destination is not reachable"));
        }
        board.insert(to, piece.promoted_on(to));

        let opponent = self.side_to_move.opponent();
        let over = !movegen::has_legal_moves(&board, opponent);
        Ok(Self {
            board,
            side_to_move: opponent,
            over,
        })
    }

    /// Parses the position from its encoding.
    ///
    /// NOTE: This expects properly-formatted input: no extra symbols or
    /// whitespace. Use [`Position::try_from`] to clean up the input first or
    /// [`Position::decode`] to fall back to the starting position.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem with the input.
    pub fn from_encoding(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        let mut result = Self::empty();
        let placement = match parts.next() {
            Some(placement) if !placement.is_empty() => placement,
            _ => bail!("incorrect encoding: missing pieces placement"),
        };
        let mut ranks = Rank::iter().rev();
        for row in placement.split('/') {
            let Some(rank) = ranks.next() else {
                bail!("incorrect encoding: expected 8 rows, got {placement}");
            };
            if row.chars().count() != BOARD_WIDTH as usize {
                bail!("incorrect encoding: row should be exactly {BOARD_WIDTH} symbols, got {row}");
            }
            for (symbol, file) in row.chars().zip(File::iter()) {
                if symbol == '-' {
                    continue;
                }
                let square = Square::new(file, rank);
                result
                    .board
                    .put(square, symbol.try_into()?)
                    .with_context(|| format!("incorrect encoding: row {row}"))?;
            }
        }
        if ranks.next().is_some() {
            bail!("incorrect encoding: there should be 8 rows, got {placement}");
        }
        result.side_to_move = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect encoding: missing side to move"),
        };
        result.over = match parts.next() {
            Some("0") => false,
            Some("1") => true,
            Some(value) => bail!("game over flag should be '0' or '1', got '{value}'"),
            None => bail!("incorrect encoding: missing game over flag"),
        };
        match parts.next() {
            None => Ok(result),
            Some(_) => bail!("trailing symbols are not allowed in the encoding"),
        }
    }

    /// Restores the position from storage. Unlike [`Position::try_from`],
    /// this never fails: an empty or malformed input yields the starting
    /// position.
    #[must_use]
    pub fn decode(input: &str) -> Self {
        if input.trim().is_empty() {
            return Self::starting();
        }
        match Self::try_from(input) {
            Ok(position) => position,
            Err(e) => {
                warn!("falling back to the starting position: {e:#}");
                Self::starting()
            },
        }
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Trims whitespace around the input and parses the encoding.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_encoding(input.trim())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    /// Prints the position encoding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.board.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}")?,
                    None => f.write_char('-')?,
                }
            }
            if rank != Rank::One {
                f.write_char('/')?;
            }
        }
        write!(f, " {} {}", self.side_to_move, u8::from(self.over))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Player to move: {:?}", &self.side_to_move)?;
        writeln!(f, "Status: {:?}", self.status())?;
        writeln!(f, "Encoding: {self}")?;
        Ok(())
    }
}
