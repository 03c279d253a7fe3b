//! Errors produced by the rules engine.

use thiserror::Error;

use crate::draughts::core::{Move, Square};

/// The move can not be played in the given position.
///
/// There is deliberately a single kind of rejection: an empty source square,
/// a piece of the wrong color and a destination outside of the legal set
/// (including ignoring a mandatory capture) are all reported the same way.
/// Rejection never modifies the position it was attempted on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("illegal move: {from}-{to}")]
pub struct MoveRejected {
    /// Square the move was attempted from.
    pub from: Square,
    /// Requested destination.
    pub to: Square,
}

impl From<Move> for MoveRejected {
    fn from(rejected: Move) -> Self {
        Self {
            from: rejected.from(),
            to: rejected.to(),
        }
    }
}
