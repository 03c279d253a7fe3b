//! Draughts primitives commonly used within [`crate::draughts`].

use std::fmt::{self, Write};
use std::mem;

use anyhow::{bail, Context};
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Represents a legal draughts move: the square a piece starts on and the
/// square it ends up on. For captures, the destination is the final square of
/// the whole capture chain: intermediate landing squares are not part of the
/// move because the rules engine re-derives them from the position.
///
/// The textual representation is `<from>-<to>`, e.g. `d3-c4`, which is also
/// the format the game history is stored in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub(super) from: Square,
    pub(super) to: Square,
}

impl Move {
    /// Connects source and destination squares.
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Square the moving piece starts on.
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Final square of the moving piece.
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Parses a move in either `d3-c4` or the compact `d3c4` notation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not consist of two valid squares.
    pub fn from_notation(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let (from, to) = match input.split_once(['-', ':']) {
            Some((from, to)) => (from, to),
            None if input.len() == 4 && input.is_char_boundary(2) => input.split_at(2),
            None => bail!("move should be in <from>-<to> format, got '{input}'"),
        };
        Ok(Self::new(
            Square::try_from(from).with_context(|| format!("incorrect source in '{input}'"))?,
            Square::try_from(to).with_context(|| format!("incorrect destination in '{input}'"))?,
        ))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_notation(input)
    }
}

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use shashki::draughts::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Only half of the squares are playable (see [`Square::is_dark`]), but the
/// light ones are kept so that the index maps directly onto the
/// [`Bitboard`](crate::draughts::bitboard::Bitboard) bits and onto the encoding columns.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        // SAFETY: file and rank are both within 0..BOARD_WIDTH, the sum is
        // within 0..BOARD_SIZE.
        unsafe { mem::transmute(file as u8 + (rank as u8) * BOARD_WIDTH) }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        // SAFETY: the remainder is always within 0..BOARD_WIDTH.
        unsafe { mem::transmute(self as u8 % BOARD_WIDTH) }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        // SAFETY: the quotient is always within 0..BOARD_WIDTH.
        unsafe { mem::transmute(self as u8 / BOARD_WIDTH) }
    }

    /// Dark squares are the only ones that can hold pieces. Rank 1 starts
    /// with a light square (`a1` is light, `b1` is dark), which is the
    /// layout stored game records use.
    ///
    /// ```
    /// use shashki::draughts::core::Square;
    ///
    /// assert!(!Square::A1.is_dark());
    /// assert!(Square::B1.is_dark());
    /// assert!(Square::A2.is_dark());
    /// assert!(Square::H8.is_dark() == false);
    /// ```
    #[must_use]
    pub const fn is_dark(self) -> bool {
        is_dark(self.rank() as u8, self.file() as u8)
    }

    /// Returns the neighbouring square in given direction or `None` if it
    /// would fall off the board. Diagonal neighbours of a dark square are
    /// always dark.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (file_delta, rank_delta) = direction.delta();
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if !is_on_board(rank, file) {
            return None;
        }
        // Both coordinates were checked to be within the board.
        Self::try_from((rank * BOARD_WIDTH as i8 + file) as u8).ok()
    }

    /// Iterates over squares along the diagonal, excluding the square itself.
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Self> {
        std::iter::successors(self.shift(direction), move |square| square.shift(direction))
    }

    /// Iterates over all squares of the board in index order.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).filter_map(|index| Self::try_from(index).ok())
    }
}

/// Pure parity check over zero-based coordinates. Never fails: coordinates
/// are expected to be validated by [`is_on_board`] first.
#[must_use]
pub const fn is_dark(rank: u8, file: u8) -> bool {
    (rank + file) % 2 == 1
}

/// Checks that zero-based coordinates are within the 8x8 board.
#[must_use]
pub const fn is_on_board(rank: i8, file: i8) -> bool {
    0 <= rank && rank < BOARD_WIDTH as i8 && 0 <= file && file < BOARD_WIDTH as i8
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            // SAFETY: the index was checked to be within the enum range.
            0..=MAX_INDEX => Ok(unsafe { mem::transmute::<u8, Self>(square_index) }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got '{square}' with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the board. In draughts notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Iterates over the files from `a` to `h`.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..BOARD_WIDTH).filter_map(|column| Self::try_from(column).ok())
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Self::try_from(file as u8 - b'a'),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            // SAFETY: the value was checked to be within the enum range.
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(column) }),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the board. In draughts notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// Iterates over the ranks from the first to the eighth.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..BOARD_WIDTH).filter_map(|row| Self::try_from(row).ok())
    }

    /// The rank on which men of given player are promoted to kings.
    #[must_use]
    pub const fn promotion(player: Player) -> Self {
        match player {
            Player::White => Self::Eight,
            Player::Black => Self::One,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Self::try_from(rank as u8 - b'1'),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            // SAFETY: the value was checked to be within the enum range.
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(row) }),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// Pieces only ever travel along the diagonals. "Up" is towards the eighth
/// rank (Black's side), "left" is towards the `a` file.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All four diagonals. The order defines the order in which capture
    /// chains are discovered.
    pub const ALL: [Self; 4] = [Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];

    /// (file, rank) increments.
    const fn delta(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, 1),
            Self::UpRight => (1, 1),
            Self::DownLeft => (-1, -1),
            Self::DownRight => (1, -1),
        }
    }
}

/// A game of draughts is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Directions in which men of this player advance. White moves towards
    /// the eighth rank, Black towards the first one.
    #[must_use]
    pub const fn forward(self) -> [Direction; 2] {
        match self {
            Self::White => [Direction::UpLeft, Direction::UpRight],
            Self::Black => [Direction::DownLeft, Direction::DownRight],
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Men move one square forward and are promoted to kings upon reaching the
/// farthest rank. Kings slide along the diagonals in any direction.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Man,
    King,
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Returns the piece this one becomes after finishing a move on `square`.
    /// Only men reaching the farthest rank change.
    #[must_use]
    pub fn promoted_on(self, square: Square) -> Self {
        match self.kind {
            PieceKind::Man if square.rank() == Rank::promotion(self.owner) => Self {
                kind: PieceKind::King,
                ..self
            },
            _ => self,
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol {
            'w' => Ok(Self::new(Player::White, PieceKind::Man)),
            'W' => Ok(Self::new(Player::White, PieceKind::King)),
            'b' => Ok(Self::new(Player::Black, PieceKind::Man)),
            'B' => Ok(Self::new(Player::Black, PieceKind::King)),
            _ => bail!("piece symbol should be within \"wWbB\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match (&self.owner, &self.kind) {
            (Player::White, PieceKind::Man) => 'w',
            (Player::White, PieceKind::King) => 'W',
            (Player::Black, PieceKind::Man) => 'b',
            (Player::Black, PieceKind::King) => 'B',
        })
    }
}
