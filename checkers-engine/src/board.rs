//! Square-centric representation of a checkers board, in the manner of a
//! [mailbox](https://www.chessprogramming.org/Mailbox).
//!
//! A Board is an array of size Rows x Cols where each index holds a `Cell`.
//! The Board stores and answers queries about cell contents. It knows which
//! squares are playable, but nothing about how pieces move.

use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::ops::Index;
use std::str::FromStr;

use crate::coretypes::{Cell, Piece, Player, Rank, Square, NUM_COLS, NUM_ROWS, NUM_SQUARES};
use crate::error::{self, ErrorKind};

/// Classic 8x8 board, row-major.
/// Row 0 is Player1's back rank.
/// (0,0) = idx 0
/// (0,1) = idx 1
/// (1,0) = idx 8
/// (7,7) = idx 63
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    board: [Cell; Self::SIZE],
}

impl Board {
    pub const ROWS: usize = NUM_ROWS;
    pub const COLS: usize = NUM_COLS;
    pub const SIZE: usize = NUM_SQUARES;

    /// Creates a Board with no pieces. Light squares are Unplayable, dark squares Empty.
    pub fn new() -> Self {
        let mut board = [Cell::Unplayable; Self::SIZE];
        for square in Square::dark() {
            board[square.idx()] = Cell::Empty;
        }
        Board { board }
    }

    /// Create Board with pieces arranged in the opening position:
    /// Player1 men on the dark squares of rows 0-2, Player2 men on rows 5-7.
    pub fn start_position() -> Self {
        let mut board = Self::new();
        for square in Square::dark() {
            let owner = Player::iter().find(|player| square.row().abs_diff(player.home_row()) < 3);
            if let Some(owner) = owner {
                board.board[square.idx()] = Cell::Piece(Piece::new(owner, Rank::Man));
            }
        }
        board
    }

    /// Returns the cell at (row, col).
    /// Light squares are always Unplayable.
    pub fn get(&self, row: usize, col: usize) -> error::Result<Cell> {
        Ok(self[Square::new(row, col)?])
    }

    /// Sets the cell at (row, col). See `put`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> error::Result<()> {
        self.put(Square::new(row, col)?, cell)
    }

    /// Writes a cell to a square.
    /// Light squares only ever take Unplayable, and dark squares never do.
    /// Any other combination is an InvariantViolation and the board is left untouched.
    pub fn put(&mut self, square: Square, cell: Cell) -> error::Result<()> {
        if square.is_dark() != cell.is_playable() {
            let msg = format!("cannot place {cell:?} on square {square}");
            return Err((ErrorKind::InvariantViolation, msg).into());
        }
        self.board[square.idx()] = cell;
        Ok(())
    }

    /// Iterates over every piece on the board with its square, selected pieces included.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::dark().filter_map(move |square| self[square].piece().map(|piece| (square, piece)))
    }

    /// Number of pieces a player has on the board.
    pub fn count_pieces(&self, player: Player) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.owner() == player)
            .count()
    }

    /// Clears every Candidate back to Empty and every Selected piece back to a plain Piece.
    pub fn clear_markers(&mut self) {
        for cell in self.board.iter_mut() {
            match *cell {
                Cell::Candidate(_) => *cell = Cell::Empty,
                Cell::Selected(piece) => *cell = Cell::Piece(piece),
                _ => (),
            }
        }
    }

    /// Returns pretty-printed board representation of Self.
    /// Row 7 is on top. The selected piece is bracketed.
    pub fn pretty(&self) -> String {
        const ROW_SEP: &str = "  +---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(666);

        pretty.push_str(ROW_SEP);
        for row in (0..Self::ROWS).rev() {
            pretty.push_str(&row.to_string());
            pretty.push_str(" |");

            for col in 0..Self::COLS {
                let cell = self.board[row * Self::COLS + col];
                let (open, close) = match cell {
                    Cell::Selected(_) => ('[', ']'),
                    _ => (' ', ' '),
                };
                pretty.push(open);
                pretty.push(cell.to_char());
                pretty.push(close);
                pretty.push('|');
            }
            pretty.push('\n');
            pretty.push_str(ROW_SEP);
        }
        pretty.push_str("    0   1   2   3   4   5   6   7\n");

        pretty
    }
}

impl Index<Square> for Board {
    type Output = Cell;
    fn index(&self, square: Square) -> &Self::Output {
        &self.board[square.idx()]
    }
}

/// Default value is the opening position.
impl Default for Board {
    fn default() -> Self {
        Board::start_position()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// Board diagram ::= eight '/'-separated rows, from row 7 down to row 0.
/// Each row is eight chars: x X o O for pieces, '.' or '-' for empty.
/// Markers are not part of the notation.
impl FromStr for Board {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != Self::ROWS {
            let msg = format!("expected {} rows, found {}", Self::ROWS, rows.len());
            return Err((ErrorKind::ParseBoardMalformed, msg).into());
        }

        let mut board = Board::new();
        for (row_str, row) in rows.into_iter().zip((0..Self::ROWS).rev()) {
            let chars: Vec<char> = row_str.trim().chars().collect();
            if chars.len() != Self::COLS {
                let msg = format!("row {row} has {} columns", chars.len());
                return Err((ErrorKind::ParseBoardMalformed, msg).into());
            }
            for (col, ch) in chars.into_iter().enumerate() {
                let square = Square::new(row, col)?;
                match Cell::try_from(ch)? {
                    Cell::Empty => (),
                    cell if square.is_dark() => board.board[square.idx()] = cell,
                    _ => {
                        let msg = format!("piece on light square {square}");
                        return Err((ErrorKind::ParseBoardMalformed, msg).into());
                    }
                }
            }
        }
        Ok(board)
    }
}
