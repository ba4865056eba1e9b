//! Win and draw detection.
//!
//! Only the disc that was just placed can complete a line, so the win
//! check scans outward from that single cell instead of sweeping the
//! whole board.

use fourline_types::{Board, CONNECT, Cell, Seat};

/// Row/column steps for the four axes: horizontal, vertical, and the two
/// diagonals. Each axis is scanned in both directions.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Discs needed beyond the placed one to complete a line.
const REACH: usize = CONNECT - 1;

/// Read a cell, returning `None` when the coordinates are off the board.
fn cell_at(board: &Board, row: usize, column: usize) -> Option<Cell> {
    board.get(row).and_then(|r| r.get(column)).copied()
}

/// Count contiguous discs owned by `seat`, starting next to `(row, column)`
/// and walking by `(dr, dc)`. Stops at the board edge, an empty cell, or an
/// opponent disc. Never counts more than [`REACH`].
fn run_length(board: &Board, row: usize, column: usize, (dr, dc): (isize, isize), seat: Seat) -> usize {
    std::iter::successors(Some((row, column)), |&(r, c)| {
        Some((r.checked_add_signed(dr)?, c.checked_add_signed(dc)?))
    })
    .skip(1)
    .take(REACH)
    .take_while(|&(r, c)| cell_at(board, r, c) == Some(Some(seat)))
    .count()
}

/// Whether the disc at `(row, column)` is part of a line of at least
/// [`CONNECT`] discs owned by the same seat.
///
/// An empty or off-board origin is never a win.
pub fn check_win(board: &Board, row: usize, column: usize) -> bool {
    let Some(Some(seat)) = cell_at(board, row, column) else {
        return false;
    };

    AXES.iter().any(|&(dr, dc)| {
        let forward = run_length(board, row, column, (dr, dc), seat);
        let backward = run_length(board, row, column, (dr.wrapping_neg(), dc.wrapping_neg()), seat);
        forward.saturating_add(backward) >= REACH
    })
}

/// Whether every cell on the board is occupied.
///
/// Only meaningful once the win check for the latest move has failed.
pub fn check_draw(board: &Board) -> bool {
    board.iter().flatten().all(Option::is_some)
}
