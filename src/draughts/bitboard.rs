//! [`Bitboard`]-based representation for
//! [`crate::draughts::position::Position`]. Bitboard utilizes the fact that
//! modern processors operate on 64 bit integers: a draughts board has 32
//! playable squares, so the whole material of a player fits into a couple of
//! machine words and copying a [`Board`] to produce the successor state is
//! cheap.
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt::{self, Write};
use std::ops::{BitAnd, BitOr, BitOrAssign, Not, Sub, SubAssign};

use itertools::Itertools;

use crate::draughts::core::{
    File,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};

/// Represents a set of squares and provides common operations (e.g. AND, OR,
/// XOR) over these sets. Each bit corresponds to one of 64 squares of the
/// board.
///
/// Mirroring [`Square`] semantics, the least significant bit corresponds to
/// A1, and the most significant bit - to H8.
///
/// Bitboard is a thin wrapper around [u64].
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// All dark (playable) squares: `b1`, `d1`, ..., `a2`, `c2`, ..., `g8`.
    pub const DARK_SQUARES: Self = Self::from_bits(0x55AA_55AA_55AA_55AA);

    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Returns a pre-calculated bitboard mask with 1s set for squares of the
    /// given rank.
    #[must_use]
    pub const fn rank_mask(rank: Rank) -> Self {
        Self::from_bits(0xFF << (rank as u8 * BOARD_WIDTH))
    }

    /// Returns true if this bitboard contains given square.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square as u8)) != 0
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Returns true if no square is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn has_any(self) -> bool {
        !self.is_empty()
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }

    /// Adds the square to the set.
    pub fn insert(&mut self, square: Square) {
        *self |= Self::from(square);
    }

    /// Removes the square from the set.
    pub fn remove(&mut self, square: Square) {
        *self -= Self::from(square);
    }
}

impl fmt::Debug for Bitboard {
    /// Dumps the set as an 8x8 grid ('1' for set squares, '.' otherwise) with
    /// the eighth rank on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            Rank::iter()
                .rev()
                .map(|rank| File::iter()
                    .map(|file| if self.contains(Square::new(file, rank)) {
                        '1'
                    } else {
                        '.'
                    })
                    .join(SQUARE_SEPARATOR))
                .join(LINE_SEPARATOR)
        )
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitor(rhs.bits))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits.bitor_assign(rhs.bits);
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitand(rhs.bits))
    }
}

impl Sub for Bitboard {
    type Output = Self;

    /// [Relative component], i.e. Result = LHS \ RHS.
    ///
    /// [Relative component]: https://en.wikipedia.org/wiki/Complement_%28set_theory%29#Relative_complement
    fn sub(self, rhs: Self) -> Self::Output {
        self & !rhs
    }
}

impl SubAssign for Bitboard {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Not for Bitboard {
    type Output = Self;

    /// Returns [complement
    /// set](https://en.wikipedia.org/wiki/Complement_%28set_theory%29) of Self,
    /// i.e. flipping the set squares to unset and vice versa.
    fn not(self) -> Self::Output {
        Self::from_bits(!self.bits)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square as u8)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut result = Self::empty();
        for square in iter {
            result.insert(square);
        }
        result
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates over set squares in a given [Bitboard] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B) through implementing
/// [`BitScan`] forward operation.
///
/// [BitScan]: https://www.chessprogramming.org/BitScan
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        // trailing_zeros() of a non-zero u64 is always within 0..64.
        Square::try_from(next_index as u8).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitboardIterator {}

/// Piece-centric representation of all material owned by one player. Uses
/// [Bitboard] to store a set of squares occupied by each kind of piece. The
/// main user is [`crate::draughts::position::Position`], [Bitboard] is not very
/// useful on its own.
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Pieces {
    pub(super) men: Bitboard,
    pub(super) kings: Bitboard,
}

impl Pieces {
    pub(super) const fn empty() -> Self {
        Self {
            men: Bitboard::empty(),
            kings: Bitboard::empty(),
        }
    }

    /// Men on the three dark rows closest to the player's own side.
    pub(super) fn starting(player: Player) -> Self {
        let ranks = match player {
            Player::White => [Rank::One, Rank::Two, Rank::Three],
            Player::Black => [Rank::Six, Rank::Seven, Rank::Eight],
        };
        let home = ranks
            .into_iter()
            .fold(Bitboard::empty(), |mask, rank| mask | Bitboard::rank_mask(rank));
        Self {
            men: home & Bitboard::DARK_SQUARES,
            kings: Bitboard::empty(),
        }
    }

    /// Squares occupied by any piece of the player.
    #[must_use]
    pub fn all(self) -> Bitboard {
        self.men | self.kings
    }

    pub(super) fn bitboard_for(&mut self, kind: PieceKind) -> &mut Bitboard {
        match kind {
            PieceKind::Man => &mut self.men,
            PieceKind::King => &mut self.kings,
        }
    }

    /// Kind of the player's piece standing on the square, if any.
    #[must_use]
    pub fn at(self, square: Square) -> Option<PieceKind> {
        if self.men.contains(square) {
            return Some(PieceKind::Man);
        }
        if self.kings.contains(square) {
            return Some(PieceKind::King);
        }
        None
    }
}

/// Piece-centric implementation of the draughts board. Holds at most one
/// piece per square and only ever stores pieces on dark squares:
/// [`Board::put`] refuses to place a piece on a light or occupied square.
///
/// The board is `Copy`: the rules engine never mutates a board it was given
/// and produces a fresh copy for every successor state instead.
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct Board {
    pub(super) white_pieces: Pieces,
    pub(super) black_pieces: Pieces,
}

impl Board {
    /// Standard Russian draughts setup: 12 men per side on the three rows
    /// closest to each player.
    #[must_use]
    pub fn starting() -> Self {
        Self {
            white_pieces: Pieces::starting(Player::White),
            black_pieces: Pieces::starting(Player::Black),
        }
    }

    /// Constructs an empty Board to be filled by the position builder.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            white_pieces: Pieces::empty(),
            black_pieces: Pieces::empty(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn player_pieces(&self, player: Player) -> &Pieces {
        match player {
            Player::White => &self.white_pieces,
            Player::Black => &self.black_pieces,
        }
    }

    fn player_pieces_mut(&mut self, player: Player) -> &mut Pieces {
        match player {
            Player::White => &mut self.white_pieces,
            Player::Black => &mut self.black_pieces,
        }
    }

    /// Squares occupied by pieces of both players.
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.white_pieces.all() | self.black_pieces.all()
    }

    /// Total number of pieces on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied().count() as usize
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied().is_empty()
    }

    /// Returns the piece standing on the square.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        if let Some(kind) = self.white_pieces.at(square) {
            return Some(Piece::new(Player::White, kind));
        }
        if let Some(kind) = self.black_pieces.at(square) {
            return Some(Piece::new(Player::Black, kind));
        }
        None
    }

    /// Places the piece on an empty dark square.
    ///
    /// # Errors
    ///
    /// Returns an error if the square is light or already occupied.
    pub fn put(&mut self, square: Square, piece: Piece) -> anyhow::Result<()> {
        if !square.is_dark() {
            anyhow::bail!("pieces can only be placed on dark squares, got {square}");
        }
        if self.occupied().contains(square) {
            anyhow::bail!("square {square} is already occupied");
        }
        self.insert(square, piece);
        Ok(())
    }

    /// Places the piece without validation: the caller guarantees the square
    /// is dark and empty.
    pub(super) fn insert(&mut self, square: Square, piece: Piece) {
        debug_assert!(square.is_dark() && !self.occupied().contains(square));
        self.player_pieces_mut(piece.owner)
            .bitboard_for(piece.kind)
            .insert(square);
    }

    /// Removes whatever piece stands on the square and returns it.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.at(square)?;
        self.player_pieces_mut(piece.owner)
            .bitboard_for(piece.kind)
            .remove(square);
        Some(piece)
    }

    /// Iterates over all pieces of the given player.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.player_pieces(player)
            .all()
            .iter()
            .filter_map(move |square| self.at(square).map(|piece| (square, piece)))
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, encoding
    /// symbol for piece) with the eighth rank on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != Rank::One {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

const _: () = assert!(BOARD_SIZE as u32 == u64::BITS);

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Bitboard, Board, Pieces};
    use crate::draughts::core::{Piece, PieceKind, Player, Rank, Square};

    #[test]
    fn basics() {
        assert_eq!(std::mem::size_of::<Bitboard>(), 8);
        assert_eq!(Bitboard::empty().bits, u64::MIN);

        assert_eq!(Bitboard::from(Square::A1).bits, 1);
        assert_eq!(Bitboard::from(Square::B1).bits, 2);
        assert_eq!(Bitboard::from(Square::D1).bits, 8);
        assert_eq!(Bitboard::from(Square::H8).bits, 1u64 << 63);

        assert_eq!(
            Bitboard::from(Square::D1) | Bitboard::from(Square::B1),
            Bitboard::from_bits(0b10 | 0b1000)
        );
        assert_eq!(
            Bitboard::rank_mask(Rank::Two),
            Bitboard::from_bits(0x0000_0000_0000_FF00)
        );
        assert_eq!(
            Bitboard::rank_mask(Rank::Eight),
            Bitboard::from_bits(0xFF00_0000_0000_0000)
        );
    }

    #[test]
    fn dark_squares() {
        assert_eq!(Bitboard::DARK_SQUARES.count(), 32);
        for square in Square::iter() {
            assert_eq!(
                Bitboard::DARK_SQUARES.contains(square),
                square.is_dark(),
                "{square}"
            );
        }
        assert_eq!(
            format!("{:?}", Bitboard::DARK_SQUARES),
            "1 . 1 . 1 . 1 .\n\
             . 1 . 1 . 1 . 1\n\
             1 . 1 . 1 . 1 .\n\
             . 1 . 1 . 1 . 1\n\
             1 . 1 . 1 . 1 .\n\
             . 1 . 1 . 1 . 1\n\
             1 . 1 . 1 . 1 .\n\
             . 1 . 1 . 1 . 1"
        );
    }

    #[test]
    fn set_ops() {
        let mut bitboard = [Square::B1, Square::C2, Square::D3]
            .into_iter()
            .collect::<Bitboard>();
        assert_eq!(bitboard.count(), 3);
        assert!(bitboard.contains(Square::C2));
        bitboard.remove(Square::C2);
        assert!(!bitboard.contains(Square::C2));
        bitboard.insert(Square::H8);
        assert_eq!(
            bitboard.iter().collect::<Vec<_>>(),
            vec![Square::B1, Square::D3, Square::H8]
        );
        assert_eq!(bitboard.iter().len(), 3);
        assert_eq!(
            bitboard - Bitboard::from(Square::D3),
            Bitboard::from(Square::B1) | Bitboard::from(Square::H8)
        );
        assert_eq!(!!bitboard, bitboard);
        assert_eq!(bitboard - !bitboard, bitboard);
        assert_eq!(
            [Square::H8, Square::B1, Square::D3]
                .into_iter()
                .collect::<Bitboard>(),
            bitboard
        );
        assert!(Bitboard::empty().is_empty());
        assert!(bitboard.has_any());
    }

    #[test]
    fn bitboard_dump() {
        assert_eq!(
            format!("{:?}", Bitboard::empty()),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ."
        );
        assert_eq!(
            format!(
                "{:?}",
                Bitboard::from(Square::G5) | Bitboard::from(Square::B8)
            ),
            ". 1 . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . 1 .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ."
        );
    }

    #[test]
    fn starting_board() {
        let board = Board::starting();
        assert_eq!(board.len(), 24);
        assert_eq!(board.white_pieces.men.count(), 12);
        assert_eq!(board.black_pieces.men.count(), 12);
        assert!(board.white_pieces.kings.is_empty());
        assert!(board.black_pieces.kings.is_empty());
        assert_eq!(board.occupied() - Bitboard::DARK_SQUARES, Bitboard::empty());
        assert_eq!(
            format!("{board:?}"),
            "b . b . b . b .\n\
             . b . b . b . b\n\
             b . b . b . b .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . w . w . w . w\n\
             w . w . w . w .\n\
             . w . w . w . w"
        );
        assert_eq!(
            Pieces::starting(Player::White).all(),
            [
                Square::B1,
                Square::D1,
                Square::F1,
                Square::H1,
                Square::A2,
                Square::C2,
                Square::E2,
                Square::G2,
                Square::B3,
                Square::D3,
                Square::F3,
                Square::H3,
            ]
            .into_iter()
            .collect::<Bitboard>()
        );
    }

    #[test]
    fn put_and_take() {
        let mut board = Board::empty();
        assert!(board.is_empty());
        let king = Piece::new(Player::Black, PieceKind::King);
        assert!(board.put(Square::C4, king).is_ok());
        assert_eq!(board.at(Square::C4), Some(king));
        // Light square.
        assert!(board.put(Square::C3, king).is_err());
        // Occupied square.
        assert!(board
            .put(Square::C4, Piece::new(Player::White, PieceKind::Man))
            .is_err());
        assert_eq!(board.pieces(Player::Black).collect::<Vec<_>>(), vec![(Square::C4, king)]);
        assert_eq!(board.pieces(Player::White).count(), 0);
        assert_eq!(board.take(Square::C4), Some(king));
        assert_eq!(board.take(Square::C4), None);
        assert!(board.is_empty());
    }
}
