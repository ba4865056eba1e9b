//! Connect Four rules for the Fourline room server.
//!
//! Pure, deterministic functions over [`fourline_types::Game`]. Nothing in
//! this crate performs I/O or holds shared state; the lobby owns every game
//! and calls in here to apply moves.
//!
//! - [`rules`] -- [`apply_move`] and move legality helpers
//! - [`win`] -- [`check_win`] and [`check_draw`]

pub mod rules;
pub mod win;

pub use rules::{Outcome, apply_move, legal_columns, lowest_empty_row};
pub use win::{check_draw, check_win};
