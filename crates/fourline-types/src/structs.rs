//! Room-level structs shared between the lobby and the wire protocol.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::board::{Game, GameStatus};
use crate::ids::ConnectionId;

/// A connection seated in a room, as a player or a spectator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerEntry {
    /// The connection occupying this entry.
    pub id: ConnectionId,
    /// Display name supplied when creating or joining the room.
    pub name: String,
}

impl PlayerEntry {
    /// Create an entry from a connection id and a display name.
    pub fn new(id: ConnectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Read-only projection of a room, broadcast as `roomUpdate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RoomSnapshot {
    /// Seated players, index = seat.
    pub players: Vec<PlayerEntry>,
    /// Everyone watching without a seat.
    pub spectators: Vec<PlayerEntry>,
    /// The room's match.
    pub game: Game,
}

/// Compact room description served by the REST listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RoomSummary {
    /// Room name (unique key).
    pub name: String,
    /// Number of seated players (0..=2).
    pub players: usize,
    /// Number of spectators.
    pub spectators: usize,
    /// Match status.
    pub status: GameStatus,
}
