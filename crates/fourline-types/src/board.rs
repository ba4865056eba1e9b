//! Board and game state for a single Connect Four match.
//!
//! The board is a fixed `ROWS x COLUMNS` grid. Row `0` is the top row and
//! row `ROWS - 1` the bottom one, so discs fall toward higher row indices.
//! A [`Game`] pairs the board with the seat whose turn it is and the
//! overall match status. Rule evaluation lives in `fourline-engine`; this
//! module only carries data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLUMNS: usize = 7;

/// Number of contiguous discs needed to win.
pub const CONNECT: usize = 4;

/// A player's position within a room, which fixes turn order.
///
/// Serialized as the integer `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Seat {
    /// The room creator (moves first).
    First,
    /// The second player to join.
    Second,
}

impl Seat {
    /// Both seats in turn order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Return the seat for a position in a room's player list.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    /// Return this seat's position in a room's player list.
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Return the other seat.
    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// A seat number outside `0..=1` was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid seat: {0}")]
pub struct InvalidSeat(pub u8);

impl TryFrom<u8> for Seat {
    type Error = InvalidSeat;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(usize::from(value)).ok_or(InvalidSeat(value))
    }
}

/// A single board cell: empty, or holding a disc owned by a seat.
pub type Cell = Option<Seat>;

/// The full grid, indexed as `board[row][column]`.
pub type Board = [[Cell; COLUMNS]; ROWS];

/// Overall state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum GameStatus {
    /// Moves are still being accepted.
    #[default]
    InProgress,
    /// A seat connected four discs.
    Won {
        /// The winning seat.
        #[ts(type = "0 | 1")]
        seat: Seat,
    },
    /// The board filled up without a winner.
    Drawn,
}

impl GameStatus {
    /// Whether the match has ended.
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A Connect Four match. Owned by exactly one room for the room's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Game {
    /// The grid of cells, top row first.
    #[ts(type = "Array<Array<0 | 1 | null>>")]
    pub board: Board,
    /// The seat expected to move next (frozen once the match ends).
    #[ts(type = "0 | 1")]
    pub current_player: Seat,
    /// Whether the match is still running, and how it ended.
    ///
    /// Older clients that only read `board` and `currentPlayer` may ignore
    /// this field; `gameOver` carries the same result as text.
    pub status: GameStatus,
}

impl Game {
    /// Create an empty board with seat `0` to move.
    pub const fn new() -> Self {
        Self {
            board: [[None; COLUMNS]; ROWS],
            current_player: Seat::First,
            status: GameStatus::InProgress,
        }
    }

    /// Read a cell, returning `None` when the coordinates are off the board.
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.board.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Number of discs currently on the board.
    pub fn disc_count(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
