//! MoveList types used in the checkers engine.
//!
//! A single piece never has more than one destination per diagonal, so a
//! fixed capacity list is enough and avoids allocating on every click.

use arrayvec::ArrayVec;

use crate::coretypes::{Move, Square, MAX_MOVES};

/// MoveList is a container that can hold at most `MAX_MOVES`, the most destinations for one piece.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// A move paired with the square of the piece making it.
pub type Action = (Square, Move);

/// Returns a string with the displayed moves of a MoveList, space separated.
/// Display cannot be implemented on the external ArrayVec type.
pub fn display(moves: &MoveList) -> String {
    moves
        .iter()
        .map(|move_| move_.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
