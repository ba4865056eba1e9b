//! The room registry: every open room and its game.
//!
//! [`RoomRegistry`] is the sole owner of [`Room`] values, and each room owns
//! its [`Game`] outright. Rooms are created on demand and destroyed as soon
//! as their last player or spectator leaves.
//!
//! # Invariants
//!
//! - Room names are unique.
//! - A connection belongs to at most one room, and within that room to
//!   exactly one of `players` or `spectators`.
//! - A room holds at most two players; `players[i]` sits in seat `i`.
//! - No room is ever empty.

use std::collections::{BTreeMap, HashMap};

use fourline_engine::{Outcome, apply_move};
use fourline_types::{COLUMNS, ConnectionId, Game, PlayerEntry, RoomSnapshot, RoomSummary, Seat};
use tracing::{debug, info};

use crate::error::LobbyError;

/// Maximum number of seated players per room.
pub const MAX_PLAYERS: usize = 2;

/// A named room pairing up to two players, any number of spectators, and
/// one game.
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    players: Vec<PlayerEntry>,
    spectators: Vec<PlayerEntry>,
    game: Game,
}

impl Room {
    fn new(name: String, creator: PlayerEntry) -> Self {
        Self {
            name,
            players: vec![creator],
            spectators: Vec::new(),
            game: Game::new(),
        }
    }

    /// The room's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seated players in seat order.
    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    /// Spectators in join order.
    pub fn spectators(&self) -> &[PlayerEntry] {
        &self.spectators
    }

    /// The room's match.
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// The seat held by `id`, if it is a player here.
    pub fn seat_of(&self, id: ConnectionId) -> Option<Seat> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .and_then(Seat::from_index)
    }

    /// Whether `id` is a player or spectator here.
    pub fn contains(&self, id: ConnectionId) -> bool {
        self.players.iter().chain(&self.spectators).any(|p| p.id == id)
    }

    /// Every connection in the room, players first.
    pub fn members(&self) -> Vec<ConnectionId> {
        self.players.iter().chain(&self.spectators).map(|p| p.id).collect()
    }

    fn is_empty(&self) -> bool {
        self.players.is_empty() && self.spectators.is_empty()
    }

    /// Read-only projection broadcast to the room.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            players: self.players.clone(),
            spectators: self.spectators.clone(),
            game: self.game.clone(),
        }
    }

    /// Compact description for listings.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            name: self.name.clone(),
            players: self.players.len(),
            spectators: self.spectators.len(),
            status: self.game.status,
        }
    }
}

/// What remains of a room after a connection leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// Other members are still present.
    Remaining(RoomSnapshot),
    /// The room emptied and was destroyed.
    Closed,
}

/// An accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// `Win`, `Draw`, or `Continued`. Never `Rejected`.
    pub outcome: Outcome,
    /// The game after the move.
    pub game: Game,
    /// The player who moved. On a win, this is the winner.
    pub mover: PlayerEntry,
}

/// Owner of every open room, keyed by name.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
    /// Room names in creation order.
    order: Vec<String>,
    /// Which room each member connection belongs to.
    memberships: BTreeMap<ConnectionId, String>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no rooms are open.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Whether a room with this name is open.
    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Borrow a room by name.
    pub fn get(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    /// The room `id` currently belongs to.
    pub fn room_of(&self, id: ConnectionId) -> Option<&str> {
        self.memberships.get(&id).map(String::as_str)
    }

    /// Open room names, oldest first.
    pub fn room_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Summaries of every open room, oldest first.
    pub fn summaries(&self) -> Vec<RoomSummary> {
        self.order
            .iter()
            .filter_map(|name| self.rooms.get(name))
            .map(Room::summary)
            .collect()
    }

    /// Snapshot of a room for broadcast.
    pub fn snapshot(&self, name: &str) -> Option<RoomSnapshot> {
        self.rooms.get(name).map(Room::snapshot)
    }

    /// Every connection in a room. Empty if the room is not open.
    pub fn members(&self, name: &str) -> Vec<ConnectionId> {
        self.rooms.get(name).map(Room::members).unwrap_or_default()
    }

    /// Open a room with `id` in seat 0 and a fresh game.
    pub fn create_room(
        &mut self,
        name: &str,
        id: ConnectionId,
        display_name: &str,
    ) -> Result<RoomSnapshot, LobbyError> {
        if self.rooms.contains_key(name) {
            return Err(LobbyError::AlreadyExists(name.to_owned()));
        }
        if let Some(current) = self.memberships.get(&id) {
            return Err(LobbyError::InAnotherRoom(current.clone()));
        }

        let room = Room::new(name.to_owned(), PlayerEntry::new(id, display_name));
        let snapshot = room.snapshot();
        self.rooms.insert(name.to_owned(), room);
        self.order.push(name.to_owned());
        self.memberships.insert(id, name.to_owned());

        info!(room = name, connection = %id, player = display_name, "Room created");
        Ok(snapshot)
    }

    /// Add `id` to a room, seating it if a seat is free and otherwise
    /// making it a spectator. Joining a room one is already in changes
    /// nothing.
    pub fn join_room(
        &mut self,
        name: &str,
        id: ConnectionId,
        display_name: &str,
    ) -> Result<RoomSnapshot, LobbyError> {
        let room = self
            .rooms
            .get_mut(name)
            .ok_or_else(|| LobbyError::NotFound(name.to_owned()))?;

        if room.contains(id) {
            debug!(room = name, connection = %id, "Repeated join ignored");
            return Ok(room.snapshot());
        }
        if let Some(current) = self.memberships.get(&id) {
            return Err(LobbyError::InAnotherRoom(current.clone()));
        }

        let entry = PlayerEntry::new(id, display_name);
        if room.players.len() < MAX_PLAYERS {
            room.players.push(entry);
            debug!(room = name, connection = %id, players = room.players.len(), "Player seated");
        } else {
            room.spectators.push(entry);
            debug!(room = name, connection = %id, "Spectator joined");
        }
        let snapshot = room.snapshot();
        self.memberships.insert(id, name.to_owned());
        Ok(snapshot)
    }

    /// Remove `id` from a room, destroying the room if it empties.
    ///
    /// Leaving a room `id` is not in changes nothing and reports the room
    /// as it stands.
    pub fn leave_room(&mut self, name: &str, id: ConnectionId) -> Result<Departure, LobbyError> {
        let room = self
            .rooms
            .get_mut(name)
            .ok_or_else(|| LobbyError::NotFound(name.to_owned()))?;
        if !room.contains(id) {
            debug!(room = name, connection = %id, "Leave from non-member");
            return Ok(Departure::Remaining(room.snapshot()));
        }

        room.players.retain(|p| p.id != id);
        room.spectators.retain(|p| p.id != id);
        self.memberships.remove(&id);

        if room.is_empty() {
            self.rooms.remove(name);
            self.order.retain(|n| n != name);
            info!(room = name, "Room closed");
            return Ok(Departure::Closed);
        }
        Ok(Departure::Remaining(room.snapshot()))
    }

    /// Apply a move for `id` in its room.
    pub fn record_move(
        &mut self,
        name: &str,
        id: ConnectionId,
        column: usize,
    ) -> Result<MoveRecord, LobbyError> {
        let room = self
            .rooms
            .get_mut(name)
            .ok_or_else(|| LobbyError::NotFound(name.to_owned()))?;

        let seat = room.seat_of(id).ok_or(LobbyError::NotYourTurn)?;
        if seat != room.game.current_player {
            return Err(LobbyError::NotYourTurn);
        }
        if room.game.status.is_over() {
            return Err(LobbyError::GameFinished);
        }

        let outcome = apply_move(&mut room.game, column);
        if !outcome.is_accepted() {
            return Err(if column >= COLUMNS {
                LobbyError::InvalidColumn(column)
            } else {
                LobbyError::ColumnFull(column)
            });
        }
        let mover = room
            .players
            .get(seat.index())
            .cloned()
            .ok_or(LobbyError::NotYourTurn)?;

        debug!(room = name, connection = %id, column, outcome = ?outcome, "Move applied");
        Ok(MoveRecord {
            outcome,
            game: room.game.clone(),
            mover,
        })
    }
}
