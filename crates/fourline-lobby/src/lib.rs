//! Lobby state for the Fourline room server.
//!
//! Everything here is plain owned data with no I/O and no locking. The
//! transport wraps one [`EventRouter`] and feeds it events one at a time,
//! so every mutation is observed whole.
//!
//! - [`directory`] -- [`SessionDirectory`], the presence list
//! - [`registry`] -- [`RoomRegistry`], rooms and their games
//! - [`router`] -- [`EventRouter`], the dispatcher tying both together
//! - [`error`] -- [`LobbyError`]

pub mod directory;
pub mod error;
pub mod registry;
pub mod router;

pub use directory::SessionDirectory;
pub use error::LobbyError;
pub use registry::{Departure, MAX_PLAYERS, MoveRecord, Room, RoomRegistry};
pub use router::{Audience, DRAW_MESSAGE, Dispatch, EventRouter};
