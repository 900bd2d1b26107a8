//! Rules and state engine for two-player checkers on an 8x8 board.
//!
//! The engine is driven by a host application. The host turns raw input into
//! board coordinates and passes them to [`GameState::select_square`], then
//! reads the board back through the query methods to draw it.
//!
//! ```
//! use checkers_engine::{new_game, Player, SelectOutcome};
//!
//! let mut game = new_game();
//! assert!(matches!(game.select_square(2, 1).unwrap(), SelectOutcome::Selected { .. }));
//! assert!(matches!(game.select_square(3, 0).unwrap(), SelectOutcome::Moved(_)));
//! assert_eq!(game.current_turn(), Player::Player2);
//! ```

pub mod board;
pub mod coretypes;
pub mod error;
pub mod game;
pub mod movegen;
pub mod movelist;
pub mod options;
pub mod perft;

pub use board::Board;
pub use coretypes::{Cell, Move, MoveInfo, MoveKind, Piece, Player, Rank, Square};
pub use error::{Error, ErrorKind, Result};
pub use game::{new_game, GameState, SelectOutcome, Selection};
pub use movelist::MoveList;
pub use options::Options;
