//! Move application.
//!
//! [`apply_move`] is the only function that mutates a [`Game`]. It drops a
//! disc for the seat to move, then evaluates the result in a fixed order:
//! win first, then draw, and only then hands the turn to the other seat.
//! A move that completes a line while filling the board is a win.

use fourline_types::{Board, COLUMNS, Game, GameStatus, ROWS};

use crate::win::{check_draw, check_win};

/// Result of applying a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mover connected four. The turn does not pass.
    Win,
    /// The board filled up with no line. The turn does not pass.
    Draw,
    /// The disc was placed and the turn passed to the other seat.
    Continued,
    /// The move was refused and the game is unchanged.
    Rejected,
}

impl Outcome {
    /// Whether the move was placed on the board.
    pub const fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected)
    }

    /// Whether the move ended the match.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Draw)
    }
}

/// The row a disc dropped into `column` would land in.
///
/// Returns `None` if the column is full or off the board.
pub fn lowest_empty_row(board: &Board, column: usize) -> Option<usize> {
    if column >= COLUMNS {
        return None;
    }
    (0..ROWS)
        .rev()
        .find(|&row| board.get(row).and_then(|r| r.get(column)).is_some_and(Option::is_none))
}

/// Columns that would currently accept a disc. Empty once the match is over.
pub fn legal_columns(game: &Game) -> Vec<usize> {
    if game.status.is_over() {
        return Vec::new();
    }
    (0..COLUMNS)
        .filter(|&column| lowest_empty_row(&game.board, column).is_some())
        .collect()
}

/// Drop a disc for `game.current_player` into `column`.
///
/// A full column, a column outside `0..COLUMNS`, or a finished game yields
/// [`Outcome::Rejected`] and leaves the game untouched.
pub fn apply_move(game: &mut Game, column: usize) -> Outcome {
    if game.status.is_over() {
        return Outcome::Rejected;
    }
    let Some(row) = lowest_empty_row(&game.board, column) else {
        return Outcome::Rejected;
    };
    let seat = game.current_player;
    let Some(cell) = game.board.get_mut(row).and_then(|r| r.get_mut(column)) else {
        return Outcome::Rejected;
    };
    *cell = Some(seat);

    if check_win(&game.board, row, column) {
        game.status = GameStatus::Won { seat };
        return Outcome::Win;
    }
    if check_draw(&game.board) {
        game.status = GameStatus::Drawn;
        return Outcome::Draw;
    }
    game.current_player = seat.opponent();
    Outcome::Continued
}
