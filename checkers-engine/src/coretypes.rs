//! The fundamental and simple types of `checkers_engine`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::ops::Not;
use std::str::FromStr;

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_ROWS: usize = 8;
pub const NUM_COLS: usize = 8;
pub const NUM_SQUARES: usize = NUM_ROWS * NUM_COLS;

// Only the dark squares can ever hold a piece.
pub const NUM_DARK_SQUARES: usize = NUM_SQUARES / 2;

// Three rows of four men per player in the opening position.
pub const NUM_STARTING_PIECES: usize = 12;

// The most destinations a single piece can have in one step, one per diagonal.
pub const MAX_MOVES: usize = 4;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for the depth of a move-path count.
pub type PlyKind = u8;

/// One of the two sides of a game.
/// Player1 starts on rows 0-2 and moves toward increasing rows,
/// Player2 starts on rows 5-7 and moves toward decreasing rows.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    Player1,
    Player2,
}

/// Whether a piece has been promoted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) owner: Player,
    pub(crate) rank: Rank,
}

/// A coordinate on the 8x8 board. Row 0 is Player1's back rank.
/// A Square is always on the board; construction checks bounds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Square {
    row: u8,
    col: u8,
}

/// The four diagonal step directions, relative to the moving player.
/// Left is always toward column 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

/// Contents of a single square. Every square is in exactly one of these states.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    /// A light square. Never holds a piece or a marker.
    Unplayable,
    /// A dark square with nothing on it.
    Empty,
    /// A dark square holding a piece.
    Piece(Piece),
    /// The piece currently picked up by the player to move.
    Selected(Piece),
    /// A legal destination of the selected piece, tagged with the rank the
    /// piece would have after landing there.
    Candidate(Rank),
}

/// Kind of a move, without its payload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveKind {
    Simple,
    Capture,
}

/// A single legal destination for a piece, one atomic step.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Move {
    /// One square diagonal advance onto an empty square.
    Simple { to: Square, king: bool },
    /// Two square diagonal jump over an opposing piece at `captured`.
    Capture {
        to: Square,
        captured: Square,
        king: bool,
    },
}

/// MoveInfo describes a move after it has been applied to a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoveInfo {
    /// Original square of moving piece.
    pub(crate) from: Square,
    /// The executed move.
    pub(crate) move_: Move,
    /// The piece as it was before moving.
    pub(crate) piece: Piece,
    /// True if a man became a king with this move.
    pub(crate) promoted: bool,
    /// True if the same piece must keep jumping, so the turn did not pass.
    pub(crate) continues: bool,
}

//////////////////////
/// Implementations //
//////////////////////

impl Player {
    pub const fn to_char(&self) -> char {
        match self {
            Player::Player1 => '1',
            Player::Player2 => '2',
        }
    }

    /// Row step toward the opponent's back rank.
    pub const fn forward(&self) -> i8 {
        match self {
            Player::Player1 => 1,
            Player::Player2 => -1,
        }
    }

    /// Row on which this player's men start closest to their own edge.
    pub const fn home_row(&self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => NUM_ROWS - 1,
        }
    }

    /// Row farthest from this player's start, where men are crowned.
    pub const fn promotion_row(&self) -> usize {
        match self {
            Player::Player1 => NUM_ROWS - 1,
            Player::Player2 => 0,
        }
    }

    pub fn iter() -> std::array::IntoIter<Player, 2> {
        [Player::Player1, Player::Player2].into_iter()
    }
}

impl Not for Player {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }
}

impl Not for &Player {
    type Output = Player;
    fn not(self) -> Self::Output {
        Player::not(*self)
    }
}

impl From<Player> for char {
    fn from(player: Player) -> Self {
        player.to_char()
    }
}

impl TryFrom<char> for Player {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            '1' => Ok(Player::Player1),
            '2' => Ok(Player::Player2),
            _ => Err((ErrorKind::ParsePlayerMalformed, "char is not 1|2").into()),
        }
    }
}

impl FromStr for Player {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Player::try_from(ch),
            _ => Err((ErrorKind::ParsePlayerMalformed, "expected a single char").into()),
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player {}", self.to_char())
    }
}

impl Piece {
    pub const fn new(owner: Player, rank: Rank) -> Self {
        Piece { owner, rank }
    }
    /// Immutable Getters.
    pub const fn owner(&self) -> Player {
        self.owner
    }
    pub const fn rank(&self) -> Rank {
        self.rank
    }
    pub const fn is_king(&self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// Returns the same piece with its rank set to King.
    pub const fn crowned(&self) -> Self {
        Piece::new(self.owner, Rank::King)
    }

    /// x/X for Player1 man/king, o/O for Player2 man/king.
    pub const fn to_char(&self) -> char {
        match (self.owner, self.rank) {
            (Player::Player1, Rank::Man) => 'x',
            (Player::Player1, Rank::King) => 'X',
            (Player::Player2, Rank::Man) => 'o',
            (Player::Player2, Rank::King) => 'O',
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'x' => Ok(Piece::new(Player::Player1, Rank::Man)),
            'X' => Ok(Piece::new(Player::Player1, Rank::King)),
            'o' => Ok(Piece::new(Player::Player2, Rank::Man)),
            'O' => Ok(Piece::new(Player::Player2, Rank::King)),
            _ => Err((ErrorKind::ParseCellMalformed, "char is not in xXoO").into()),
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

pub struct SquareIterator {
    idx: usize,
}

impl Square {
    /// Checked constructor. Fails with `OutOfBounds` if row or col is not in 0..8.
    pub fn new(row: usize, col: usize) -> error::Result<Self> {
        if row < NUM_ROWS && col < NUM_COLS {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            let msg = format!("({row}, {col}) is not on the board");
            Err((ErrorKind::OutOfBounds, msg).into())
        }
    }

    /// idx must be less than NUM_SQUARES.
    pub(crate) const fn from_idx(idx: usize) -> Self {
        debug_assert!(idx < NUM_SQUARES);
        Self {
            row: (idx / NUM_COLS) as u8,
            col: (idx % NUM_COLS) as u8,
        }
    }

    /// Iterates over all 64 squares in row-major order.
    pub const fn iter() -> SquareIterator {
        SquareIterator { idx: 0 }
    }

    /// Iterates over the 32 dark squares in row-major order.
    pub fn dark() -> impl Iterator<Item = Square> {
        Self::iter().filter(Square::is_dark)
    }

    pub const fn row(&self) -> usize {
        self.row as usize
    }

    pub const fn col(&self) -> usize {
        self.col as usize
    }

    /// Row-major index, 0-63.
    pub const fn idx(&self) -> usize {
        self.row() * NUM_COLS + self.col()
    }

    /// Dark squares are the playable ones.
    pub const fn is_dark(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Returns the square displaced by (d_row, d_col), or None if off the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        let on_board = (0..NUM_ROWS as i8).contains(&row) && (0..NUM_COLS as i8).contains(&col);
        on_board.then(|| Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Returns the square jumped over when moving diagonally from self to `other`,
    /// or None if the two are not exactly two diagonal steps apart.
    pub fn between(&self, other: Square) -> Option<Self> {
        let d_row = other.row as i8 - self.row as i8;
        let d_col = other.col as i8 - self.col as i8;
        if d_row.abs() == 2 && d_col.abs() == 2 {
            self.offset(d_row / 2, d_col / 2)
        } else {
            None
        }
    }

    /// True if `other` is exactly one diagonal step away.
    pub fn is_adjacent_diagonal(&self, other: Square) -> bool {
        let d_row = other.row as i8 - self.row as i8;
        let d_col = other.col as i8 - self.col as i8;
        d_row.abs() == 1 && d_col.abs() == 1
    }
}

impl Iterator for SquareIterator {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < NUM_SQUARES {
            let square = Square::from_idx(self.idx);
            self.idx += 1;
            Some(square)
        } else {
            None
        }
    }
}

/// Square::= <row digit><col digit>, optionally separated by whitespace or a comma.
impl FromStr for Square {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut digits = s
            .trim()
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != ',');
        let mut next_digit = || -> error::Result<usize> {
            digits
                .next()
                .and_then(|ch| ch.to_digit(10))
                .map(|digit| digit as usize)
                .ok_or_else(|| (ErrorKind::ParseSquareMalformed, "expected a digit").into())
        };
        let row = next_digit()?;
        let col = next_digit()?;
        if digits.next().is_some() {
            return Err((ErrorKind::ParseSquareMalformed, "trailing characters").into());
        }
        Square::new(row, col)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

impl Direction {
    pub const FORWARD: [Direction; 2] = [Direction::ForwardLeft, Direction::ForwardRight];
    pub const ALL: [Direction; 4] = [
        Direction::ForwardLeft,
        Direction::ForwardRight,
        Direction::BackwardLeft,
        Direction::BackwardRight,
    ];

    /// Directions a piece of the given rank may step in, in generation order.
    pub fn for_rank(rank: Rank) -> &'static [Direction] {
        match rank {
            Rank::Man => &Self::FORWARD,
            Rank::King => &Self::ALL,
        }
    }

    /// (d_row, d_col) of a single step in this direction for `owner`.
    pub const fn delta(&self, owner: Player) -> (i8, i8) {
        let forward = owner.forward();
        match self {
            Direction::ForwardLeft => (forward, -1),
            Direction::ForwardRight => (forward, 1),
            Direction::BackwardLeft => (-forward, -1),
            Direction::BackwardRight => (-forward, 1),
        }
    }
}

impl Cell {
    /// Owner of the piece on this cell, selected or not.
    pub const fn owner(&self) -> Option<Player> {
        match self {
            Cell::Piece(piece) | Cell::Selected(piece) => Some(piece.owner),
            _ => None,
        }
    }

    /// Rank of the piece on this cell, or the rank a candidate would result in.
    pub const fn rank(&self) -> Option<Rank> {
        match self {
            Cell::Piece(piece) | Cell::Selected(piece) => Some(piece.rank),
            Cell::Candidate(rank) => Some(*rank),
            _ => None,
        }
    }

    /// The piece on this cell, ignoring selection.
    pub const fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Piece(piece) | Cell::Selected(piece) => Some(*piece),
            _ => None,
        }
    }

    pub const fn is_playable(&self) -> bool {
        !matches!(self, Cell::Unplayable)
    }
    pub const fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
    pub const fn is_selected(&self) -> bool {
        matches!(self, Cell::Selected(_))
    }
    pub const fn is_candidate(&self) -> bool {
        matches!(self, Cell::Candidate(_))
    }

    /// A candidate marker sits on an empty square, so both can be moved onto.
    pub const fn is_vacant(&self) -> bool {
        matches!(self, Cell::Empty | Cell::Candidate(_))
    }

    pub const fn to_char(&self) -> char {
        match self {
            Cell::Unplayable => ' ',
            Cell::Empty => '.',
            Cell::Piece(piece) | Cell::Selected(piece) => piece.to_char(),
            Cell::Candidate(Rank::Man) => '+',
            Cell::Candidate(Rank::King) => '*',
        }
    }
}

/// Parses the plain board contents only: pieces and empty squares.
impl TryFrom<char> for Cell {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            '.' | '-' => Ok(Cell::Empty),
            _ => Piece::try_from(ch).map(Cell::Piece),
        }
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        Cell::Piece(piece)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl Move {
    pub const fn to(&self) -> Square {
        match self {
            Move::Simple { to, .. } | Move::Capture { to, .. } => *to,
        }
    }

    /// Square of the jumped piece, for captures.
    pub const fn captured_at(&self) -> Option<Square> {
        match self {
            Move::Simple { .. } => None,
            Move::Capture { captured, .. } => Some(*captured),
        }
    }

    /// True if the moving piece is a king once it lands.
    pub const fn results_in_king(&self) -> bool {
        match self {
            Move::Simple { king, .. } | Move::Capture { king, .. } => *king,
        }
    }

    pub const fn kind(&self) -> MoveKind {
        match self {
            Move::Simple { .. } => MoveKind::Simple,
            Move::Capture { .. } => MoveKind::Capture,
        }
    }

    pub const fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }
}

/// Simple moves display as their destination, captures as `x<dest>`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Move::Simple { to, .. } => write!(f, "{to}"),
            Move::Capture { to, .. } => write!(f, "x{to}"),
        }?;
        if self.results_in_king() {
            f.write_char('K')?;
        }
        Ok(())
    }
}

impl MoveInfo {
    pub const fn from(&self) -> Square {
        self.from
    }
    pub const fn move_(&self) -> Move {
        self.move_
    }
    pub const fn piece(&self) -> Piece {
        self.piece
    }
    pub const fn promoted(&self) -> bool {
        self.promoted
    }
    pub const fn continues(&self) -> bool {
        self.continues
    }
}

impl Display for MoveInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}-{}", self.piece, self.from, self.move_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Player::*;

    #[test]
    fn logical_not_player() {
        assert_eq!(!Player1, Player2);
        assert_eq!(!Player2, Player1);
        assert_eq!(!&Player1, Player2);
    }

    #[test]
    fn promotion_row_is_opposite_home_row() {
        for player in Player::iter() {
            assert_eq!(player.promotion_row(), (!player).home_row());
        }
        assert_eq!(Player1.promotion_row(), 7);
        assert_eq!(Player2.promotion_row(), 0);
    }

    #[test]
    fn square_bounds() {
        assert!(Square::new(0, 0).is_ok());
        assert!(Square::new(7, 7).is_ok());
        assert_eq!(Square::new(8, 0).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(Square::new(3, 8).unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn square_to_from_string() {
        let s21: Square = "21".parse().unwrap();
        let s21_spaced: Square = "2 1".parse().unwrap();
        let s21_comma: Square = " 2,1 ".parse().unwrap();
        assert_eq!(s21, Square::new(2, 1).unwrap());
        assert_eq!(s21, s21_spaced);
        assert_eq!(s21, s21_comma);
        assert_eq!(s21.to_string(), "21");

        assert_eq!(
            Square::from_str("2").unwrap_err().kind(),
            ErrorKind::ParseSquareMalformed
        );
        assert_eq!(
            Square::from_str("a1").unwrap_err().kind(),
            ErrorKind::ParseSquareMalformed
        );
        assert_eq!(
            Square::from_str("213").unwrap_err().kind(),
            ErrorKind::ParseSquareMalformed
        );
        assert_eq!(Square::from_str("91").unwrap_err().kind(), ErrorKind::OutOfBounds);
    }

    #[test]
    fn dark_squares() {
        assert_eq!(Square::iter().count(), NUM_SQUARES);
        assert_eq!(Square::dark().count(), NUM_DARK_SQUARES);
        assert!(Square::new(0, 1).unwrap().is_dark());
        assert!(Square::new(2, 1).unwrap().is_dark());
        assert!(!Square::new(0, 0).unwrap().is_dark());
    }

    #[test]
    fn offset_and_between() {
        let sq = Square::new(2, 1).unwrap();
        assert_eq!(sq.offset(1, -1), Some(Square::new(3, 0).unwrap()));
        assert_eq!(sq.offset(1, -2), None);
        assert_eq!(sq.offset(-3, 0), None);

        let to = Square::new(4, 3).unwrap();
        assert_eq!(sq.between(to), Some(Square::new(3, 2).unwrap()));
        assert_eq!(to.between(sq), Some(Square::new(3, 2).unwrap()));
        assert_eq!(sq.between(Square::new(3, 2).unwrap()), None);
        assert_eq!(sq.between(Square::new(4, 1).unwrap()), None);
        assert!(sq.is_adjacent_diagonal(Square::new(1, 0).unwrap()));
        assert!(!sq.is_adjacent_diagonal(Square::new(2, 2).unwrap()));
    }

    #[test]
    fn direction_deltas_are_owner_relative() {
        assert_eq!(Direction::ForwardLeft.delta(Player1), (1, -1));
        assert_eq!(Direction::ForwardLeft.delta(Player2), (-1, -1));
        assert_eq!(Direction::BackwardRight.delta(Player1), (-1, 1));
        assert_eq!(Direction::for_rank(Rank::Man).len(), 2);
        assert_eq!(Direction::for_rank(Rank::King).len(), 4);
    }

    #[test]
    fn cell_classification() {
        let man = Piece::new(Player2, Rank::Man);
        assert_eq!(Cell::Piece(man).owner(), Some(Player2));
        assert_eq!(Cell::Selected(man).owner(), Some(Player2));
        assert_eq!(Cell::Candidate(Rank::King).owner(), None);
        assert_eq!(Cell::Candidate(Rank::King).rank(), Some(Rank::King));
        assert_eq!(Cell::Empty.rank(), None);
        assert!(Cell::Candidate(Rank::Man).is_vacant());
        assert!(!Cell::Selected(man).is_vacant());
        assert!(!Cell::Unplayable.is_playable());
    }

    #[test]
    fn cell_to_from_char() {
        for ch in ['x', 'X', 'o', 'O'] {
            assert_eq!(Cell::try_from(ch).unwrap().to_char(), ch);
        }
        assert_eq!(Cell::try_from('-').unwrap(), Cell::Empty);
        assert_eq!(
            Cell::try_from('q').unwrap_err().kind(),
            ErrorKind::ParseCellMalformed
        );
    }

    #[test]
    fn move_accessors() {
        let to = Square::new(4, 3).unwrap();
        let captured = Square::new(3, 2).unwrap();
        let capture = Move::Capture {
            to,
            captured,
            king: false,
        };
        let simple = Move::Simple { to, king: true };

        assert_eq!(capture.to(), to);
        assert_eq!(capture.captured_at(), Some(captured));
        assert_eq!(capture.kind(), MoveKind::Capture);
        assert!(!capture.results_in_king());
        assert_eq!(simple.captured_at(), None);
        assert!(simple.results_in_king());
        assert_eq!(capture.to_string(), "x43");
        assert_eq!(simple.to_string(), "43K");
    }
}
