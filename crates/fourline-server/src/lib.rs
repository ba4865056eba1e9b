//! `WebSocket` room server for Fourline, realtime Connect Four.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) carrying the game protocol: clients
//!   announce themselves, create and join rooms, and play moves; the
//!   server broadcasts presence, room, and game state back
//! - **REST endpoints** for read-only inspection of rooms and players
//!
//! # Architecture
//!
//! All lobby state lives in one [`Hub`] guarded by a single mutex inside
//! [`AppState`]. Each inbound event is applied and its broadcasts are
//! queued while the lock is held, so events are serialized exactly as in a
//! single-threaded event loop. Each connection has its own writer task
//! that drains an unbounded outbound queue.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use config::{CONFIG_FILE, ConfigError, ServerConfig};
pub use router::build_router;
pub use server::{ServerError, shutdown_signal, start_server};
pub use state::{AppState, Hub};
