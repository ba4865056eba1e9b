//! Event routing: inbound client events in, addressed outbound events out.
//!
//! [`EventRouter`] owns the [`SessionDirectory`] and [`RoomRegistry`] and is
//! the only path through which either is mutated. Each call to
//! [`EventRouter::handle`] or [`EventRouter::disconnect`] applies one event
//! in full and returns every resulting [`Dispatch`] in emission order. The
//! router performs no I/O; delivery is the caller's job.
//!
//! # Audiences
//!
//! | Audience | Used for |
//! |----------|----------|
//! | [`Audience::Everyone`] | presence list, room-name list |
//! | [`Audience::Members`] | room state, game state, game over, departures |
//! | [`Audience::Connection`] | direct replies and error notices |
//!
//! Room audiences are resolved at emission time, so a broadcast reaches the
//! members present right after the mutation that produced it.

use fourline_engine::Outcome;
use fourline_types::{ClientEvent, ConnectionId, RoomSnapshot, ServerEvent};
use tracing::{debug, info};

use crate::directory::SessionDirectory;
use crate::error::LobbyError;
use crate::registry::{Departure, RoomRegistry};

/// Message broadcast to a room when a match ends without a winner.
pub const DRAW_MESSAGE: &str = "It's a draw!";

/// The set of connections a [`Dispatch`] is delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every live connection.
    Everyone,
    /// The given room members.
    Members(Vec<ConnectionId>),
    /// A single connection.
    Connection(ConnectionId),
}

impl Audience {
    /// Whether `id` receives events sent to this audience.
    pub fn includes(&self, id: ConnectionId) -> bool {
        match self {
            Self::Everyone => true,
            Self::Members(ids) => ids.contains(&id),
            Self::Connection(target) => *target == id,
        }
    }
}

/// An outbound event and who should receive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Recipients.
    pub audience: Audience,
    /// Payload.
    pub event: ServerEvent,
}

/// Owner of all lobby state and the dispatcher for client events.
#[derive(Debug, Default)]
pub struct EventRouter {
    directory: SessionDirectory,
    registry: RoomRegistry,
}

impl EventRouter {
    /// Create a router with an empty directory and registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the session directory.
    pub const fn directory(&self) -> &SessionDirectory {
        &self.directory
    }

    /// Read access to the room registry.
    pub const fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Apply one inbound event from `from`.
    pub fn handle(&mut self, from: ConnectionId, event: ClientEvent) -> Vec<Dispatch> {
        let mut out = Vec::new();
        match event {
            ClientEvent::NewPlayer(display_name) => {
                self.directory.announce(from, display_name);
                self.broadcast_presence(&mut out);
            }
            ClientEvent::CreateRoom(room, display_name) => {
                self.create_room(from, &room, &display_name, &mut out);
            }
            ClientEvent::JoinRoom(room, display_name) => {
                self.join_room(from, &room, &display_name, &mut out);
            }
            ClientEvent::MakeMove(room, column) => {
                self.make_move(from, &room, usize::from(column), &mut out);
            }
            ClientEvent::LeaveRoom(room) => {
                if let Err(e) = self.depart(from, &room, &mut out) {
                    debug!(room = %room, connection = %from, reason = %e, "Leave ignored");
                }
            }
            ClientEvent::GetRoomList => {
                out.push(Dispatch {
                    audience: Audience::Connection(from),
                    event: ServerEvent::RoomList(self.registry.room_names()),
                });
            }
        }
        out
    }

    /// Clean up after a dropped connection.
    ///
    /// Removes its presence entry and, if it was in a room, tells the other
    /// members before removing it exactly as an explicit leave would.
    pub fn disconnect(&mut self, id: ConnectionId) -> Vec<Dispatch> {
        let mut out = Vec::new();
        self.directory.remove(id);
        self.broadcast_presence(&mut out);

        if let Some(room) = self.registry.room_of(id).map(str::to_owned) {
            let others: Vec<_> = self
                .registry
                .members(&room)
                .into_iter()
                .filter(|&member| member != id)
                .collect();
            push_to_members(&mut out, others, ServerEvent::PlayerDisconnected(id));
            if let Err(e) = self.depart(id, &room, &mut out) {
                debug!(room = %room, connection = %id, reason = %e, "Disconnect cleanup skipped");
            }
        }
        out
    }

    fn broadcast_presence(&self, out: &mut Vec<Dispatch>) {
        out.push(Dispatch {
            audience: Audience::Everyone,
            event: ServerEvent::PlayerList(self.directory.display_names()),
        });
    }

    fn broadcast_room_list(&self, out: &mut Vec<Dispatch>) {
        out.push(Dispatch {
            audience: Audience::Everyone,
            event: ServerEvent::RoomList(self.registry.room_names()),
        });
    }

    fn room_update(&self, room: &str, snapshot: RoomSnapshot, out: &mut Vec<Dispatch>) {
        push_to_members(out, self.registry.members(room), ServerEvent::RoomUpdate(snapshot));
    }

    fn reply_error(from: ConnectionId, error: &LobbyError, out: &mut Vec<Dispatch>) {
        out.push(Dispatch {
            audience: Audience::Connection(from),
            event: ServerEvent::Error(error.to_string()),
        });
    }

    /// Leave whatever room `from` is in, unless it is `next`.
    fn leave_current(&mut self, from: ConnectionId, next: &str, out: &mut Vec<Dispatch>) {
        let Some(current) = self.registry.room_of(from).map(str::to_owned) else {
            return;
        };
        if current == next {
            return;
        }
        debug!(from = %current, to = next, connection = %from, "Switching rooms");
        if let Err(e) = self.depart(from, &current, out) {
            debug!(room = %current, connection = %from, reason = %e, "Implicit leave failed");
        }
    }

    fn create_room(&mut self, from: ConnectionId, room: &str, display_name: &str, out: &mut Vec<Dispatch>) {
        if !self.registry.contains(room) {
            self.leave_current(from, room, out);
        }
        match self.registry.create_room(room, from, display_name) {
            Ok(snapshot) => {
                self.room_update(room, snapshot, out);
                self.broadcast_room_list(out);
                out.push(Dispatch {
                    audience: Audience::Connection(from),
                    event: ServerEvent::RoomCreated(room.to_owned()),
                });
            }
            Err(e) => {
                info!(room, connection = %from, reason = %e, "Failed to create room");
                Self::reply_error(from, &e, out);
            }
        }
    }

    fn join_room(&mut self, from: ConnectionId, room: &str, display_name: &str, out: &mut Vec<Dispatch>) {
        if self.registry.contains(room) {
            self.leave_current(from, room, out);
        }
        match self.registry.join_room(room, from, display_name) {
            Ok(snapshot) => self.room_update(room, snapshot, out),
            Err(e) => {
                debug!(room, connection = %from, reason = %e, "Join refused");
                Self::reply_error(from, &e, out);
            }
        }
    }

    fn make_move(&mut self, from: ConnectionId, room: &str, column: usize, out: &mut Vec<Dispatch>) {
        let record = match self.registry.record_move(room, from, column) {
            Ok(record) => record,
            Err(e) => {
                debug!(room, connection = %from, column, reason = %e, "Move ignored");
                return;
            }
        };

        let members = self.registry.members(room);
        push_to_members(out, members.clone(), ServerEvent::GameUpdate(record.game));
        if record.outcome.is_terminal() {
            let message = if record.outcome == Outcome::Win {
                format!("{} wins!", record.mover.name)
            } else {
                DRAW_MESSAGE.to_owned()
            };
            info!(room, message = %message, "Game over");
            push_to_members(out, members, ServerEvent::GameOver(message));
        }
    }

    /// Remove `id` from `room`, then broadcast the room's new state (if it
    /// survived) and the room-name list. Only an unknown room is an error;
    /// a non-member still triggers both broadcasts.
    fn depart(&mut self, id: ConnectionId, room: &str, out: &mut Vec<Dispatch>) -> Result<(), LobbyError> {
        match self.registry.leave_room(room, id)? {
            Departure::Remaining(snapshot) => self.room_update(room, snapshot, out),
            Departure::Closed => {}
        }
        self.broadcast_room_list(out);
        Ok(())
    }
}

fn push_to_members(out: &mut Vec<Dispatch>, members: Vec<ConnectionId>, event: ServerEvent) {
    if members.is_empty() {
        return;
    }
    out.push(Dispatch {
        audience: Audience::Members(members),
        event,
    });
}

#[cfg(test)]
mod tests {
    use fourline_types::{Game, GameStatus, Seat};

    use super::*;

    /// Events `id` would receive from a batch of dispatches.
    fn received(out: &[Dispatch], id: ConnectionId) -> Vec<ServerEvent> {
        out.iter()
            .filter(|d| d.audience.includes(id))
            .map(|d| d.event.clone())
            .collect()
    }

    fn names(events: &[ServerEvent]) -> Vec<&'static str> {
        events.iter().map(ServerEvent::name).collect()
    }

    fn create(router: &mut EventRouter, id: ConnectionId, room: &str, name: &str) -> Vec<Dispatch> {
        router.handle(id, ClientEvent::CreateRoom(room.into(), name.into()))
    }

    fn join(router: &mut EventRouter, id: ConnectionId, room: &str, name: &str) -> Vec<Dispatch> {
        router.handle(id, ClientEvent::JoinRoom(room.into(), name.into()))
    }

    fn play(router: &mut EventRouter, id: ConnectionId, room: &str, column: u8) -> Vec<Dispatch> {
        router.handle(id, ClientEvent::MakeMove(room.into(), column))
    }

    /// A router with alice (seat 0) and bob (seat 1) in room `x`.
    fn two_player_room() -> (EventRouter, ConnectionId, ConnectionId) {
        let mut router = EventRouter::new();
        let alice = ConnectionId::new();
        let bob = ConnectionId::new();
        create(&mut router, alice, "x", "alice");
        join(&mut router, bob, "x", "bob");
        (router, alice, bob)
    }

    fn current_game(router: &EventRouter, room: &str) -> Option<Game> {
        router.registry().snapshot(room).map(|s| s.game)
    }

    #[test]
    fn new_player_broadcasts_presence() {
        let mut router = EventRouter::new();
        let alice = ConnectionId::new();
        let bob = ConnectionId::new();
        router.handle(alice, ClientEvent::NewPlayer("alice".into()));
        let out = router.handle(bob, ClientEvent::NewPlayer("bob".into()));
        assert_eq!(out.len(), 1);
        assert_eq!(out.first().map(|d| &d.audience), Some(&Audience::Everyone));
        assert_eq!(
            received(&out, alice),
            vec![ServerEvent::PlayerList(vec!["alice".into(), "bob".into()])]
        );
    }

    #[test]
    fn create_room_confirms_and_broadcasts() {
        let mut router = EventRouter::new();
        let alice = ConnectionId::new();
        let watcher = ConnectionId::new();
        let out = create(&mut router, alice, "x", "alice");

        assert_eq!(
            names(&received(&out, alice)),
            vec!["roomUpdate", "roomList", "roomCreated"]
        );
        assert_eq!(
            received(&out, watcher),
            vec![ServerEvent::RoomList(vec!["x".into()])]
        );
    }

    #[test]
    fn duplicate_room_only_notifies_the_sender() {
        let mut router = EventRouter::new();
        create(&mut router, ConnectionId::new(), "x", "alice");
        let bob = ConnectionId::new();
        let out = create(&mut router, bob, "x", "bob");
        assert_eq!(
            out,
            vec![Dispatch {
                audience: Audience::Connection(bob),
                event: ServerEvent::Error("Room already exists".into()),
            }]
        );
    }

    #[test]
    fn join_missing_room_notifies_the_sender() {
        let mut router = EventRouter::new();
        let bob = ConnectionId::new();
        let out = join(&mut router, bob, "nowhere", "bob");
        assert_eq!(
            received(&out, bob),
            vec![ServerEvent::Error("Room does not exist".into())]
        );
    }

    #[test]
    fn third_joiner_spectates_and_everyone_sees_it() {
        let (mut router, alice, bob) = two_player_room();
        let carol = ConnectionId::new();
        let out = join(&mut router, carol, "x", "carol");
        for id in [alice, bob, carol] {
            let events = received(&out, id);
            assert!(matches!(
                events.first(),
                Some(ServerEvent::RoomUpdate(s)) if s.players.len() == 2 && s.spectators.len() == 1
            ));
        }
    }

    #[test]
    fn repeated_join_changes_nothing() {
        let (mut router, _, bob) = two_player_room();
        let before = router.registry().snapshot("x");
        let out = join(&mut router, bob, "x", "bob");
        assert_eq!(names(&received(&out, bob)), vec!["roomUpdate"]);
        assert_eq!(router.registry().snapshot("x"), before);
    }

    #[test]
    fn vertical_win_announces_the_winner_to_the_room() {
        let (mut router, alice, bob) = two_player_room();
        let carol = ConnectionId::new();
        join(&mut router, carol, "x", "carol");

        for (id, column) in [(alice, 3), (bob, 0), (alice, 3), (bob, 0), (alice, 3), (bob, 1)] {
            let out = play(&mut router, id, "x", column);
            assert_eq!(names(&received(&out, carol)), vec!["gameUpdate"]);
        }
        let out = play(&mut router, alice, "x", 3);
        for id in [alice, bob, carol] {
            let events = received(&out, id);
            assert_eq!(names(&events), vec!["gameUpdate", "gameOver"]);
            assert_eq!(events.last(), Some(&ServerEvent::GameOver("alice wins!".into())));
        }
        assert_eq!(
            current_game(&router, "x").map(|g| g.status),
            Some(GameStatus::Won { seat: Seat::First })
        );
        assert!(play(&mut router, alice, "x", 4).is_empty());
    }

    #[test]
    fn filling_the_board_without_a_line_is_a_draw() {
        let (mut router, alice, bob) = two_player_room();
        let mut columns = Vec::new();
        for (a, b) in [(0, 2), (1, 3), (4, 6)] {
            columns.push(a);
            columns.extend([b; 6]);
            columns.extend([a; 5]);
        }
        columns.extend([5; 6]);

        let mut last = Vec::new();
        for (turn, column) in columns.into_iter().enumerate() {
            let mover = if turn % 2 == 0 { alice } else { bob };
            last = play(&mut router, mover, "x", column);
            assert!(!last.is_empty(), "move {turn} was refused");
        }
        assert_eq!(
            received(&last, bob).last(),
            Some(&ServerEvent::GameOver(DRAW_MESSAGE.into()))
        );
    }

    #[test]
    fn out_of_turn_move_is_silent() {
        let (mut router, _, bob) = two_player_room();
        let before = current_game(&router, "x");
        assert!(play(&mut router, bob, "x", 0).is_empty());
        assert_eq!(current_game(&router, "x"), before);
    }

    #[test]
    fn invalid_moves_are_silent() {
        let (mut router, alice, _) = two_player_room();
        assert!(play(&mut router, alice, "x", 7).is_empty());
        assert!(play(&mut router, alice, "nowhere", 0).is_empty());
        assert_eq!(current_game(&router, "x"), Some(Game::new()));
    }

    #[test]
    fn leave_updates_the_room_then_teardown_frees_the_name() {
        let (mut router, alice, bob) = two_player_room();
        let out = router.handle(alice, ClientEvent::LeaveRoom("x".into()));
        assert_eq!(names(&received(&out, bob)), vec!["roomUpdate", "roomList"]);
        assert_eq!(names(&received(&out, alice)), vec!["roomList"]);

        let out = router.handle(bob, ClientEvent::LeaveRoom("x".into()));
        assert_eq!(received(&out, bob), vec![ServerEvent::RoomList(Vec::new())]);

        let out = router.handle(bob, ClientEvent::GetRoomList);
        assert_eq!(received(&out, bob), vec![ServerEvent::RoomList(Vec::new())]);
        let out = create(&mut router, bob, "x", "bob");
        assert_eq!(names(&received(&out, bob)), vec!["roomUpdate", "roomList", "roomCreated"]);
    }

    #[test]
    fn leaving_an_unknown_room_is_silent() {
        let (mut router, _, _) = two_player_room();
        let stranger = ConnectionId::new();
        assert!(router.handle(stranger, ClientEvent::LeaveRoom("y".into())).is_empty());
    }

    #[test]
    fn leaving_a_foreign_room_rebroadcasts_without_change() {
        let (mut router, alice, bob) = two_player_room();
        let stranger = ConnectionId::new();
        let before = router.registry().snapshot("x");
        let out = router.handle(stranger, ClientEvent::LeaveRoom("x".into()));

        assert_eq!(out.len(), 2);
        for id in [alice, bob] {
            assert_eq!(names(&received(&out, id)), vec!["roomUpdate", "roomList"]);
        }
        assert_eq!(received(&out, stranger), vec![ServerEvent::RoomList(vec!["x".into()])]);
        assert_eq!(router.registry().snapshot("x"), before);
        assert_eq!(router.registry().room_of(stranger), None);
    }

    #[test]
    fn empty_room_name_is_accepted() {
        let mut router = EventRouter::new();
        let alice = ConnectionId::new();
        let out = create(&mut router, alice, "", "alice");
        assert_eq!(
            names(&received(&out, alice)),
            vec!["roomUpdate", "roomList", "roomCreated"]
        );
        assert_eq!(router.registry().room_names(), vec![""]);
    }

    #[test]
    fn room_list_query_replies_only_to_sender() {
        let (mut router, alice, bob) = two_player_room();
        let out = router.handle(alice, ClientEvent::GetRoomList);
        assert_eq!(received(&out, alice), vec![ServerEvent::RoomList(vec!["x".into()])]);
        assert!(received(&out, bob).is_empty());
    }

    #[test]
    fn disconnect_notifies_room_and_cleans_up() {
        let (mut router, alice, bob) = two_player_room();
        router.handle(alice, ClientEvent::NewPlayer("alice".into()));
        router.handle(bob, ClientEvent::NewPlayer("bob".into()));

        let out = router.disconnect(alice);
        assert_eq!(
            names(&received(&out, bob)),
            vec!["playerList", "playerDisconnected", "roomUpdate", "roomList"]
        );
        assert_eq!(
            received(&out, bob).get(1),
            Some(&ServerEvent::PlayerDisconnected(alice))
        );
        assert!(!received(&out, alice).contains(&ServerEvent::PlayerDisconnected(alice)));
        assert_eq!(router.directory().display_names(), vec!["bob"]);
        assert_eq!(router.registry().room_of(alice), None);

        let out = router.disconnect(bob);
        assert_eq!(names(&received(&out, bob)), vec!["playerList", "roomList"]);
        assert!(router.registry().is_empty());
    }

    #[test]
    fn disconnect_without_room_only_updates_presence() {
        let mut router = EventRouter::new();
        let alice = ConnectionId::new();
        router.handle(alice, ClientEvent::NewPlayer("alice".into()));
        let out = router.disconnect(alice);
        assert_eq!(received(&out, alice), vec![ServerEvent::PlayerList(Vec::new())]);
    }

    #[test]
    fn creating_a_second_room_leaves_the_first() {
        let (mut router, alice, bob) = two_player_room();
        let out = create(&mut router, alice, "y", "alice");
        assert_eq!(
            names(&received(&out, bob)),
            vec!["roomUpdate", "roomList", "roomList"]
        );
        assert_eq!(router.registry().room_of(alice), Some("y"));
        assert_eq!(router.registry().members("x"), vec![bob]);
        assert_eq!(router.registry().room_names(), vec!["x", "y"]);
    }

    #[test]
    fn failed_create_keeps_current_membership() {
        let (mut router, alice, _) = two_player_room();
        create(&mut router, ConnectionId::new(), "y", "carol");
        let out = create(&mut router, alice, "y", "alice");
        assert_eq!(names(&received(&out, alice)), vec!["error"]);
        assert_eq!(router.registry().room_of(alice), Some("x"));
    }

    #[test]
    fn joining_another_room_moves_the_connection() {
        let (mut router, alice, bob) = two_player_room();
        let carol = ConnectionId::new();
        create(&mut router, carol, "y", "carol");
        let out = join(&mut router, bob, "y", "bob");
        assert_eq!(names(&received(&out, alice)), vec!["roomUpdate", "roomList"]);
        assert_eq!(names(&received(&out, carol)), vec!["roomList", "roomUpdate"]);
        assert_eq!(router.registry().get("y").map(|r| r.players().len()), Some(2));
    }
}
