//! Performance Test
//!
//! [Perft](https://www.chessprogramming.org/Perft)
//!
//! A simple debugging and testing function used to count
//! the number of move paths to a specific depth.
//! Each jump of a multi-jump counts as its own step.

use std::ops::{Add, AddAssign};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::coretypes::PlyKind;
use crate::error::{self, ErrorKind};
use crate::game::GameState;
use crate::movelist::Action;

/// Debugging information about results of perft test.
/// nodes: Number of nodes at lowest depth of perft.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PerftInfo {
    pub nodes: u64,
}

impl PerftInfo {
    fn new(nodes: u64) -> Self {
        PerftInfo { nodes }
    }
}

impl Add for PerftInfo {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        PerftInfo {
            nodes: self.nodes + rhs.nodes,
        }
    }
}

impl AddAssign for PerftInfo {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
    }
}

/// Count the number of nodes at a certain depth.
/// This ignores higher terminal nodes.
/// In other words, it counts the number of paths to the given depth.
pub fn perft(state: &GameState, ply: PlyKind) -> error::Result<PerftInfo> {
    match ply {
        0 => Ok(PerftInfo::new(1)),
        _ => perft_recurse(state, ply),
    }
}

/// Same count as `perft`, with the root moves shared out between `threads` workers.
pub fn perft_threaded(state: &GameState, ply: PlyKind, threads: usize) -> error::Result<PerftInfo> {
    // Simple enough to not require threads, or single threaded.
    if ply <= 2 || threads <= 1 {
        return perft(state, ply);
    }

    let actions = Arc::new(Mutex::new(state.legal_actions()));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let state = state.clone();
            let actions = Arc::clone(&actions);
            thread::spawn(move || perft_executor(state, ply, actions))
        })
        .collect();

    let mut total = PerftInfo::new(0);
    for handle in handles {
        total += handle
            .join()
            .map_err(|_| (ErrorKind::InvariantViolation, "perft worker panicked"))??;
    }
    Ok(total)
}

/// Steals one root move at a time from `actions` and counts its subtree,
/// until no moves are left.
fn perft_executor(
    state: GameState,
    ply: PlyKind,
    actions: Arc<Mutex<Vec<Action>>>,
) -> error::Result<PerftInfo> {
    debug_assert!(ply > 1);
    let steal = || actions.lock().ok().and_then(|mut actions| actions.pop());
    let mut perft_info = PerftInfo::new(0);

    while let Some((from, move_)) = steal() {
        let mut child = state.clone();
        child.execute_move(from, move_)?;
        perft_info += perft_recurse(&child, ply - 1)?;
    }
    Ok(perft_info)
}

/// Ply must be non-zero.
fn perft_recurse(state: &GameState, ply: PlyKind) -> error::Result<PerftInfo> {
    debug_assert_ne!(ply, 0);
    let actions = state.legal_actions();
    if ply == 1 {
        // If we reach the depth before the end,
        // return the count of legal moves.
        return Ok(PerftInfo::new(actions.len() as u64));
    }

    let mut perft_info = PerftInfo::new(0);
    for (from, move_) in actions {
        let mut child = state.clone();
        child.execute_move(from, move_)?;
        perft_info += perft_recurse(&child, ply - 1)?;
    }
    Ok(perft_info)
}
