//! Helpers shared by the integration tests.
#![allow(dead_code)]

use checkers_engine::coretypes::{Cell, Square, NUM_DARK_SQUARES};
use checkers_engine::movegen;
use checkers_engine::{Board, GameState, Player, Rank};

pub fn sq(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap()
}

pub fn game_from(diagram: &str, turn: Player) -> GameState {
    let board: Board = diagram.parse().unwrap();
    GameState::from_board(board, turn)
}

/// Assert every invariant a reachable game state must satisfy.
pub fn assert_invariants(game: &GameState) {
    let board = game.board();

    let mut pieces = 0;
    let mut empty = 0;
    let mut candidates = Vec::new();
    let mut selected = Vec::new();
    for square in Square::iter() {
        let cell = board[square];
        if !square.is_dark() {
            assert_eq!(cell, Cell::Unplayable, "light square {square} holds {cell:?}");
            continue;
        }
        match cell {
            Cell::Unplayable => panic!("dark square {square} is unplayable"),
            Cell::Empty => empty += 1,
            Cell::Piece(_) => pieces += 1,
            Cell::Selected(_) => {
                pieces += 1;
                selected.push(square);
            }
            Cell::Candidate(_) => candidates.push(square),
        }
    }
    assert_eq!(pieces + empty + candidates.len(), NUM_DARK_SQUARES);
    for player in Player::iter() {
        assert!(board.count_pieces(player) <= 12);
    }

    match game.selection() {
        None => {
            assert!(selected.is_empty(), "selected pieces without a selection");
            assert!(candidates.is_empty(), "candidates without a selection");
        }
        Some(selection) => {
            assert_eq!(selected, vec![selection.position()]);
            let piece = board[selection.position()].piece().unwrap();
            assert_eq!(piece.owner(), game.current_turn());

            let fresh = movegen::legal_moves(board, selection.position(), piece);
            assert_eq!(selection.legal_moves(), &fresh, "stale legal moves");
            assert!(!fresh.is_empty());

            let mut destinations: Vec<Square> = fresh.iter().map(|move_| move_.to()).collect();
            destinations.sort();
            assert_eq!(candidates, destinations);
            for move_ in fresh.iter() {
                let rank = board[move_.to()].rank().unwrap();
                assert_eq!(rank == Rank::King, move_.results_in_king());
                if let Some(captured) = move_.captured_at() {
                    assert_eq!(selection.position().between(move_.to()), Some(captured));
                }
            }

            if selection.forced() {
                assert!(fresh.iter().all(|move_| move_.is_capture()));
            }
        }
    }
}
