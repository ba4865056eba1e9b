//! Error types for the `fourline-lobby` crate.
//!
//! Every variant is recoverable. The [`EventRouter`](crate::EventRouter)
//! either turns one into a single `error` notice for the originating
//! connection or drops it silently, depending on the event. The
//! [`Display`](std::fmt::Display) text is what clients see.

/// Errors returned by room registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LobbyError {
    /// A room with this name is already open.
    #[error("Room already exists")]
    AlreadyExists(String),

    /// No room with this name is open.
    #[error("Room does not exist")]
    NotFound(String),

    /// The connection already belongs to a different room.
    #[error("Already in room {0}")]
    InAnotherRoom(String),

    /// The connection is not seated, or it is the other seat's turn.
    #[error("It is not your turn")]
    NotYourTurn,

    /// The column index is outside the board.
    #[error("Column {0} is out of range")]
    InvalidColumn(usize),

    /// The column has no empty cell left.
    #[error("Column {0} is full")]
    ColumnFull(usize),

    /// The match has already been won or drawn.
    #[error("The game is over")]
    GameFinished,
}
