//! Implementation of Russian draughts rules: board representation, legal move
//! generation with mandatory maximal captures, move execution and game end
//! detection.

pub mod bitboard;
pub mod captures;
pub mod core;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod position;

pub use self::core::Move;
pub use self::error::MoveRejected;
pub use self::position::{GameStatus, Position};
