//! Inbound and outbound event envelopes carried over the `WebSocket`.
//!
//! Every frame is a JSON object with an `event` tag. Client events put
//! their positional arguments under `args` (a bare value for one-argument
//! events, an array for two, absent for none):
//!
//! ```json
//! {"event": "newPlayer", "args": "alice"}
//! {"event": "makeMove", "args": ["lobby", 3]}
//! {"event": "getRoomList"}
//! ```
//!
//! Server events put their payload under `data`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::board::Game;
use crate::ids::ConnectionId;
use crate::structs::RoomSnapshot;

/// A message sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "args", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ClientEvent {
    /// Announce a display name for the presence list.
    NewPlayer(String),
    /// Create a room: `(room name, display name)`.
    CreateRoom(String, String),
    /// Join a room as player or spectator: `(room name, display name)`.
    JoinRoom(String, String),
    /// Drop a disc: `(room name, column 0..=6)`.
    MakeMove(String, u8),
    /// Leave a room by name.
    LeaveRoom(String),
    /// Ask for the current room names.
    GetRoomList,
}

impl ClientEvent {
    /// The wire name of this event, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewPlayer(_) => "newPlayer",
            Self::CreateRoom(..) => "createRoom",
            Self::JoinRoom(..) => "joinRoom",
            Self::MakeMove(..) => "makeMove",
            Self::LeaveRoom(_) => "leaveRoom",
            Self::GetRoomList => "getRoomList",
        }
    }
}

/// A message sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ServerEvent {
    /// Display names of every announced connection.
    PlayerList(Vec<String>),
    /// Names of every open room, oldest first.
    RoomList(Vec<String>),
    /// Full room state after a membership change.
    RoomUpdate(RoomSnapshot),
    /// Full game state after an accepted move.
    GameUpdate(Game),
    /// Human-readable end-of-match notice.
    GameOver(String),
    /// Confirmation sent only to a room's creator.
    RoomCreated(String),
    /// A room member's connection dropped.
    PlayerDisconnected(ConnectionId),
    /// Human-readable failure notice for the originating connection.
    Error(String),
}

impl ServerEvent {
    /// The wire name of this event, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlayerList(_) => "playerList",
            Self::RoomList(_) => "roomList",
            Self::RoomUpdate(_) => "roomUpdate",
            Self::GameUpdate(_) => "gameUpdate",
            Self::GameOver(_) => "gameOver",
            Self::RoomCreated(_) => "roomCreated",
            Self::PlayerDisconnected(_) => "playerDisconnected",
            Self::Error(_) => "error",
        }
    }
}
