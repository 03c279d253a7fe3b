//! [Perft] (*per*formance *t*esting) is a technique for checking correctness of
//! move generation: it counts the leaf nodes of the game tree to a fixed depth
//! and compares them against known values.
//!
//! [Perft]: https://www.chessprogramming.org/Perft

use tracing::trace;

use crate::draughts::core::Move;
use crate::draughts::position::Position;

/// Counts the positions reachable from `position` in exactly `depth` moves.
/// Finished games are leaves: they contribute nothing past their last move.
#[must_use]
pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .filter_map(|next_move| position.make_move(next_move).ok())
        .map(|next| perft(&next, depth - 1))
        .sum()
}

/// Splits [`perft`] by the first move: returns the node count of the subtree
/// of every legal move, which helps to locate move generation bugs.
#[must_use]
pub fn divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    position
        .generate_moves()
        .into_iter()
        .filter_map(|next_move| {
            let next = position.make_move(next_move).ok()?;
            let nodes = perft(&next, depth - 1);
            trace!(%next_move, nodes, "divide");
            Some((next_move, nodes))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_position() {
        let position = Position::starting();
        assert_eq!(perft(&position, 0), 1);
        assert_eq!(perft(&position, 1), 7);
        assert_eq!(perft(&position, 2), 49);
        assert_eq!(perft(&position, 3), 302);
    }

    #[test]
    fn divide_sums_up() {
        let position = Position::starting();
        let split = divide(&position, 3);
        assert_eq!(split.len(), 7);
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 302);
        assert!(divide(&position, 0).is_empty());
    }

    #[test]
    fn finished_game() {
        let position = Position::try_from(
            "--------/--------/--------/-----w--/--------/--------/--------/-------- b 1",
        )
        .unwrap();
        assert_eq!(perft(&position, 1), 0);
        assert_eq!(perft(&position, 3), 0);
    }
}
