//! Functions used to generate the legal moves of a piece.
//!
//! Generation covers one atomic step only. A multi-jump is a sequence of
//! capture steps, each generated from the square the previous one landed on.

use crate::board::Board;
use crate::coretypes::{Direction, Move, Piece, Player, Rank, Square};
use crate::movelist::{Action, MoveList};

/// Enumerate every legal destination of a piece of `owner` and `rank` standing on `from`.
///
/// Men step forward-left then forward-right, kings additionally backward-left
/// then backward-right. Moves are returned in that order.
/// Forced capture is not applied here, see `captures_only`.
pub fn generate_moves(board: &Board, from: Square, owner: Player, rank: Rank) -> MoveList {
    Direction::for_rank(rank)
        .iter()
        .filter_map(|direction| step(board, from, owner, rank, *direction))
        .collect()
}

/// The single move available in one direction, if any.
fn step(board: &Board, from: Square, owner: Player, rank: Rank, direction: Direction) -> Option<Move> {
    let (d_row, d_col) = direction.delta(owner);
    let promotes = |to: Square| rank == Rank::King || to.row() == owner.promotion_row();

    let adjacent = from.offset(d_row, d_col)?;
    let cell = board[adjacent];
    if cell.is_vacant() {
        return Some(Move::Simple {
            to: adjacent,
            king: promotes(adjacent),
        });
    }

    // Only an opposing piece can be jumped, and only onto a vacant square.
    match cell.owner() {
        Some(other) if other != owner => {
            let landing = adjacent.offset(d_row, d_col)?;
            board[landing].is_vacant().then(|| Move::Capture {
                to: landing,
                captured: adjacent,
                king: promotes(landing),
            })
        }
        _ => None,
    }
}

/// If any move in the list is a capture, keep only the captures.
pub fn captures_only(moves: MoveList) -> MoveList {
    if moves.iter().any(Move::is_capture) {
        moves.into_iter().filter(Move::is_capture).collect()
    } else {
        moves
    }
}

/// Moves a piece may actually be given: generated moves with forced capture applied.
pub fn legal_moves(board: &Board, from: Square, piece: Piece) -> MoveList {
    captures_only(generate_moves(board, from, piece.owner(), piece.rank()))
}

/// Every legal move of every piece a player owns, in board order.
pub fn legal_actions(board: &Board, player: Player) -> Vec<Action> {
    board
        .pieces()
        .filter(|(_, piece)| piece.owner() == player)
        .flat_map(|(from, piece)| {
            legal_moves(board, from, piece)
                .into_iter()
                .map(move |move_| (from, move_))
        })
        .collect()
}

/// True if any piece of `player` can move.
pub fn has_any_move(board: &Board, player: Player) -> bool {
    board
        .pieces()
        .filter(|(_, piece)| piece.owner() == player)
        .any(|(from, piece)| !generate_moves(board, from, piece.owner(), piece.rank()).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coretypes::Cell;
    use Player::*;
    use Rank::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board_with(pieces: &[(usize, usize, Player, Rank)]) -> Board {
        let mut board = Board::new();
        for &(row, col, owner, rank) in pieces {
            board.set(row, col, Cell::Piece(Piece::new(owner, rank))).unwrap();
        }
        board
    }

    #[test]
    fn opening_man_has_two_simple_moves() {
        let board = Board::start_position();
        let moves = generate_moves(&board, sq(2, 1), Player1, Man);
        assert_eq!(
            moves.as_slice(),
            &[
                Move::Simple { to: sq(3, 0), king: false },
                Move::Simple { to: sq(3, 2), king: false },
            ]
        );
    }

    #[test]
    fn opening_edge_man_has_one_move() {
        let board = Board::start_position();
        let moves = generate_moves(&board, sq(2, 7), Player1, Man);
        assert_eq!(moves.as_slice(), &[Move::Simple { to: sq(3, 6), king: false }]);

        let moves = generate_moves(&board, sq(5, 0), Player2, Man);
        assert_eq!(moves.as_slice(), &[Move::Simple { to: sq(4, 1), king: false }]);
    }

    #[test]
    fn back_rows_are_blocked_by_own_pieces() {
        let board = Board::start_position();
        assert!(generate_moves(&board, sq(1, 0), Player1, Man).is_empty());
        assert!(generate_moves(&board, sq(6, 1), Player2, Man).is_empty());
        assert!(!has_any_move(&Board::new(), Player1));
        assert!(has_any_move(&board, Player2));
    }

    #[test]
    fn player2_moves_toward_row_zero() {
        let board = board_with(&[(5, 2, Player2, Man)]);
        let moves = generate_moves(&board, sq(5, 2), Player2, Man);
        let destinations: Vec<Square> = moves.iter().map(Move::to).collect();
        assert_eq!(destinations, vec![sq(4, 1), sq(4, 3)]);
    }

    #[test]
    fn capture_over_opposing_piece() {
        let board = board_with(&[(2, 1, Player1, Man), (3, 2, Player2, Man)]);
        let moves = generate_moves(&board, sq(2, 1), Player1, Man);
        assert_eq!(
            moves.as_slice(),
            &[
                Move::Simple { to: sq(3, 0), king: false },
                Move::Capture { to: sq(4, 3), captured: sq(3, 2), king: false },
            ]
        );
        let forced = captures_only(moves);
        assert_eq!(
            forced.as_slice(),
            &[Move::Capture { to: sq(4, 3), captured: sq(3, 2), king: false }]
        );
    }

    #[test]
    fn capture_needs_vacant_landing() {
        let blocked = board_with(&[(2, 1, Player1, Man), (3, 2, Player2, Man), (4, 3, Player2, Man)]);
        let moves = generate_moves(&blocked, sq(2, 1), Player1, Man);
        assert!(moves.iter().all(|move_| !move_.is_capture()));

        // Landing would be off the board.
        let edge = board_with(&[(5, 6, Player1, Man), (6, 7, Player2, Man)]);
        let moves = generate_moves(&edge, sq(5, 6), Player1, Man);
        assert_eq!(moves.as_slice(), &[Move::Simple { to: sq(6, 5), king: false }]);
    }

    #[test]
    fn candidate_markers_count_as_vacant() {
        let mut board = board_with(&[(2, 1, Player1, Man), (3, 2, Player2, Man)]);
        board.set(4, 3, Cell::Candidate(Man)).unwrap();
        board.set(3, 0, Cell::Candidate(Man)).unwrap();
        let moves = generate_moves(&board, sq(2, 1), Player1, Man);
        assert_eq!(moves.len(), 2);
        assert!(moves[1].is_capture());
    }

    #[test]
    fn man_reaching_last_row_results_in_king() {
        let board = board_with(&[(6, 1, Player1, Man)]);
        let moves = generate_moves(&board, sq(6, 1), Player1, Man);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(Move::results_in_king));

        let board = board_with(&[(2, 3, Player2, Man), (1, 2, Player1, Man)]);
        let moves = generate_moves(&board, sq(2, 3), Player2, Man);
        assert_eq!(
            moves.as_slice(),
            &[
                Move::Capture { to: sq(0, 1), captured: sq(1, 2), king: true },
                Move::Simple { to: sq(1, 4), king: false },
            ]
        );
    }

    #[test]
    fn king_moves_in_four_directions() {
        let board = board_with(&[(4, 3, Player1, King), (3, 2, Player2, Man)]);
        let moves = generate_moves(&board, sq(4, 3), Player1, King);
        assert_eq!(
            moves.as_slice(),
            &[
                Move::Simple { to: sq(5, 2), king: true },
                Move::Simple { to: sq(5, 4), king: true },
                Move::Capture { to: sq(2, 1), captured: sq(3, 2), king: true },
                Move::Simple { to: sq(3, 4), king: true },
            ]
        );
    }

    #[test]
    fn legal_actions_apply_forced_capture_per_piece() {
        let board = board_with(&[(2, 1, Player1, Man), (3, 2, Player2, Man), (0, 5, Player1, Man)]);
        let actions = legal_actions(&board, Player1);
        assert_eq!(
            actions,
            vec![
                (sq(0, 5), Move::Simple { to: sq(1, 4), king: false }),
                (sq(0, 5), Move::Simple { to: sq(1, 6), king: false }),
                (sq(2, 1), Move::Capture { to: sq(4, 3), captured: sq(3, 2), king: false }),
            ]
        );
    }
}
