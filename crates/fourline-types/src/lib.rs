//! Shared type definitions for the Fourline room server.
//!
//! This crate is the single source of truth for every type that crosses a
//! crate boundary or the wire. Wire types flow downstream to `TypeScript`
//! via `ts-rs` for the browser client.
//!
//! # Modules
//!
//! - [`ids`] -- Connection identifier
//! - [`board`] -- Seats, cells, board grid, and game state
//! - [`structs`] -- Player entries and room projections
//! - [`protocol`] -- Inbound and outbound `WebSocket` events

pub mod board;
pub mod ids;
pub mod protocol;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use board::{Board, COLUMNS, CONNECT, Cell, Game, GameStatus, InvalidSeat, ROWS, Seat};
pub use ids::ConnectionId;
pub use protocol::{ClientEvent, ServerEvent};
pub use structs::{PlayerEntry, RoomSnapshot, RoomSummary};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the browser client.

    #[test]
    fn export_bindings() {
        // Writes the files to the `bindings/` directory relative to the
        // crate root.
        use ts_rs::TS;

        let _ = crate::ids::ConnectionId::export_all();
        let _ = crate::board::GameStatus::export_all();
        let _ = crate::board::Game::export_all();
        let _ = crate::structs::PlayerEntry::export_all();
        let _ = crate::structs::RoomSnapshot::export_all();
        let _ = crate::structs::RoomSummary::export_all();
        let _ = crate::protocol::ClientEvent::export_all();
        let _ = crate::protocol::ServerEvent::export_all();
    }
}
