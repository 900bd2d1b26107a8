//! Game structure.
//!
//! A `GameState` owns the board, whose turn it is, and the piece currently
//! picked up. Player input arrives as a stream of square clicks through
//! `GameState::select_square`. A click either picks up a piece, commits a
//! move to one of the marked candidates, or is ignored.

use std::fmt::{self, Display};

use tracing::{debug, trace};

use crate::board::Board;
use crate::coretypes::{Cell, Move, MoveInfo, Piece, Player, Rank, Square};
use crate::error::{self, ErrorKind};
use crate::movegen;
use crate::movelist::{self, Action, MoveList};
use crate::options::Options;

/// The piece currently picked up and where it may go.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Selection {
    pub(crate) position: Square,
    pub(crate) legal_moves: MoveList,
    pub(crate) forced: bool,
}

/// What a click did to the game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored,
    /// A piece was picked up and its destinations marked.
    Selected { at: Square, moves: MoveList },
    /// The previous selection was dropped. Only with `Options::deselect_on_miss`.
    Deselected,
    /// A move was executed.
    Moved(MoveInfo),
}

/// GameState contains everything about a game in progress:
/// * board - cell contents, including selection and candidate markers.
/// * turn - the player to move.
/// * selection - the picked up piece, if any. Always matches the board markers.
/// * options - rule and interaction options.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) turn: Player,
    pub(crate) selection: Option<Selection>,
    pub(crate) options: Options,
}

/// Create a new game in the opening position with Player1 to move.
pub fn new_game() -> GameState {
    GameState::new()
}

impl Selection {
    pub fn position(&self) -> Square {
        self.position
    }
    pub fn legal_moves(&self) -> &MoveList {
        &self.legal_moves
    }
    /// True while the selected piece must continue a multi-jump.
    pub fn forced(&self) -> bool {
        self.forced
    }

    /// The move landing on `to`, if it is one of the candidates.
    pub fn find(&self, to: Square) -> Option<Move> {
        self.legal_moves.iter().find(|move_| move_.to() == to).copied()
    }
}

impl GameState {
    /// Opening position, Player1 to move, nothing selected.
    pub fn new() -> Self {
        Self::from_board(Board::start_position(), Player::Player1)
    }

    /// Game from an arbitrary position with `turn` to move.
    /// Any markers on the board are cleared.
    pub fn from_board(mut board: Board, turn: Player) -> Self {
        board.clear_markers();
        Self {
            board,
            turn,
            selection: None,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Const getters.
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn current_turn(&self) -> Player {
        self.turn
    }
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Contents of the square at (row, col).
    pub fn cell_at(&self, row: usize, col: usize) -> error::Result<Cell> {
        self.board.get(row, col)
    }

    /// True if the piece at (row, col) is the one picked up.
    pub fn is_selected(&self, row: usize, col: usize) -> error::Result<bool> {
        Ok(self.board.get(row, col)?.is_selected())
    }

    /// Handle a click on (row, col).
    ///
    /// With a piece selected, clicking one of its candidates executes that move.
    /// Otherwise, clicking a piece of the player to move that has at least one
    /// legal move selects it, replacing any previous selection. During a
    /// multi-jump only the candidates of the jumping piece are accepted.
    /// Every other click is ignored and reported as `SelectOutcome::Ignored`.
    ///
    /// Fails only with `OutOfBounds` for coordinates off the board.
    pub fn select_square(&mut self, row: usize, col: usize) -> error::Result<SelectOutcome> {
        let square = Square::new(row, col)?;

        if let Some(selection) = &self.selection {
            if let Some(move_) = selection.find(square) {
                let from = selection.position;
                return self.execute_move(from, move_).map(SelectOutcome::Moved);
            }
            if selection.forced {
                trace!(%square, "ignored click during multi-jump");
                return Ok(SelectOutcome::Ignored);
            }
        }

        let piece = match self.board[square].piece() {
            Some(piece) if piece.owner() == self.turn => piece,
            _ => return Ok(self.miss(square)),
        };
        if self.options.deselect_on_miss && self.board[square].is_selected() {
            return Ok(self.miss(square));
        }

        let moves = movegen::legal_moves(&self.board, square, piece);
        if moves.is_empty() {
            return Ok(self.miss(square));
        }

        self.reset_potentials();
        self.mark_selection(square, moves.clone(), false)?;
        debug!(player = %self.turn, %square, moves = %movelist::display(&moves), "piece selected");
        Ok(SelectOutcome::Selected { at: square, moves })
    }

    /// A click that neither selects nor moves.
    fn miss(&mut self, square: Square) -> SelectOutcome {
        if self.options.deselect_on_miss && self.selection.is_some() {
            self.reset_potentials();
            debug!(%square, "selection cleared");
            SelectOutcome::Deselected
        } else {
            trace!(%square, "ignored click");
            SelectOutcome::Ignored
        }
    }

    /// Clear all candidate markers, put a selected piece back down and forget the selection.
    fn reset_potentials(&mut self) {
        self.board.clear_markers();
        self.selection = None;
    }

    /// Mark the piece at `position` as selected and each move destination as a candidate.
    fn mark_selection(
        &mut self,
        position: Square,
        legal_moves: MoveList,
        forced: bool,
    ) -> error::Result<()> {
        let piece = self.board[position]
            .piece()
            .ok_or((ErrorKind::InvariantViolation, "no piece to select"))?;

        self.board.put(position, Cell::Selected(piece))?;
        for move_ in &legal_moves {
            let rank = match move_.results_in_king() {
                true => Rank::King,
                false => Rank::Man,
            };
            self.board.put(move_.to(), Cell::Candidate(rank))?;
        }

        self.selection = Some(Selection {
            position,
            legal_moves,
            forced,
        });
        Ok(())
    }

    /// Apply a move of the piece on `from`.
    ///
    /// The piece is relocated, a jumped piece is removed, and a piece landing
    /// with `results_in_king` is crowned. After a capture, if the same piece can
    /// capture again it stays selected with only its captures offered, and the
    /// turn does not pass. Otherwise the turn passes to the other player.
    ///
    /// The move must be legal for the piece on `from` in the current position.
    /// Anything else fails with `InvariantViolation` and leaves the game untouched.
    pub fn execute_move(&mut self, from: Square, move_: Move) -> error::Result<MoveInfo> {
        let piece = self.check_move(from, move_)?;
        let to = move_.to();
        let landed = match move_.results_in_king() {
            true => piece.crowned(),
            false => piece,
        };

        self.board.put(from, Cell::Empty)?;
        self.board.put(to, Cell::Piece(landed))?;
        if let Some(captured) = move_.captured_at() {
            self.board.put(captured, Cell::Empty)?;
        }
        self.reset_potentials();

        let mut move_info = MoveInfo {
            from,
            move_,
            piece,
            promoted: !piece.is_king() && landed.is_king(),
            continues: false,
        };

        if move_.is_capture() {
            let follow_ups = movegen::captures_only(movegen::generate_moves(
                &self.board,
                to,
                landed.owner(),
                landed.rank(),
            ));
            if follow_ups.iter().any(Move::is_capture) {
                debug!(%move_info, jumps = %movelist::display(&follow_ups), "multi-jump continues");
                self.mark_selection(to, follow_ups, true)?;
                move_info.continues = true;
                return Ok(move_info);
            }
        }

        self.turn = !self.turn;
        debug!(%move_info, next = %self.turn, "move executed");
        if let Some(winner) = self.winner() {
            debug!(%winner, "game over");
        }
        Ok(move_info)
    }

    /// Validate a move against the current position, returning the moving piece.
    fn check_move(&self, from: Square, move_: Move) -> error::Result<Piece> {
        let violation = |msg: String| -> error::Error { (ErrorKind::InvariantViolation, msg).into() };

        let piece = self.board[from]
            .piece()
            .ok_or_else(|| violation(format!("no piece on origin {from}")))?;
        if piece.owner() != self.turn {
            let msg = format!("{} piece on {from} moved on {}'s turn", piece.owner(), self.turn);
            return Err(violation(msg));
        }
        if let Some(selection) = self.selection.as_ref().filter(|selection| selection.forced) {
            if selection.position != from {
                let msg = format!("piece on {} must keep jumping", selection.position);
                return Err(violation(msg));
            }
        }
        let shape_ok = match move_.captured_at() {
            Some(captured) => from.between(move_.to()) == Some(captured),
            None => from.is_adjacent_diagonal(move_.to()),
        };
        if !shape_ok {
            return Err(violation(format!("{move_} is not a diagonal step from {from}")));
        }
        if !self.board[move_.to()].is_vacant() {
            return Err(violation(format!("destination {} is occupied", move_.to())));
        }
        if !movegen::legal_moves(&self.board, from, piece).contains(&move_) {
            return Err(violation(format!("{move_} is not a legal move from {from}")));
        }
        Ok(piece)
    }

    /// Moves the piece on `square` would be offered if selected now.
    /// Empty for squares without a movable piece of the player to move.
    pub fn legal_moves_for(&self, square: Square) -> MoveList {
        match (&self.selection, self.board[square].piece()) {
            (Some(selection), _) if selection.forced => match selection.position == square {
                true => selection.legal_moves.clone(),
                false => MoveList::new(),
            },
            (_, Some(piece)) if piece.owner() == self.turn => {
                movegen::legal_moves(&self.board, square, piece)
            }
            _ => MoveList::new(),
        }
    }

    /// Every move the player to move may make right now.
    pub fn legal_actions(&self) -> Vec<Action> {
        match &self.selection {
            Some(selection) if selection.forced => selection
                .legal_moves
                .iter()
                .map(|move_| (selection.position, *move_))
                .collect(),
            _ => movegen::legal_actions(&self.board, self.turn),
        }
    }

    /// Squares of the pieces the player to move can select.
    pub fn movable_pieces(&self) -> Vec<Square> {
        let mut squares: Vec<Square> = self.legal_actions().into_iter().map(|(from, _)| from).collect();
        squares.dedup();
        squares
    }

    /// The winner of the game, if it is over.
    ///
    /// A player with no pieces loses. With `Options::blocked_player_loses`, the
    /// player to move also loses if none of their pieces can move.
    /// Computed from the current position on every call.
    pub fn winner(&self) -> Option<Player> {
        let loser = Player::iter()
            .find(|player| self.board.count_pieces(*player) == 0)
            .or_else(|| {
                let blocked = !movegen::has_any_move(&self.board, self.turn);
                (self.options.blocked_player_loses && blocked).then(|| self.turn)
            })?;
        Some(!loser)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }
}

/// Defaults to the opening position.
impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Displays pretty-printed board and the game status.
impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match self.winner() {
            Some(winner) => writeln!(f, "{winner} wins"),
            None => writeln!(f, "{} to move", self.turn),
        }
    }
}
