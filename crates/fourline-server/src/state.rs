//! Shared application state for the room server.
//!
//! [`AppState`] wraps a single [`Hub`] behind a [`Mutex`]. The hub owns the
//! lobby's [`EventRouter`] together with one outbound channel per live
//! connection. Every inbound event takes the lock, mutates the lobby, and
//! enqueues all resulting frames before releasing it, so events are applied
//! strictly one at a time and no client ever sees a half-applied change.
//!
//! Delivery is fire-and-forget: frames go onto an unbounded channel that
//! the connection's writer task drains. A send to a connection whose writer
//! has already gone away is dropped.

use std::collections::BTreeMap;

use fourline_lobby::{Audience, Dispatch, EventRouter};
use fourline_types::{ClientEvent, ConnectionId};
use tokio::sync::{Mutex, MutexGuard, mpsc};
use tracing::{debug, warn};

/// Sender half of a connection's outbound queue of encoded JSON frames.
pub type Outbound = mpsc::UnboundedSender<String>;

/// Receiver half of a connection's outbound queue.
pub type Inbox = mpsc::UnboundedReceiver<String>;

/// Lobby state plus the live connection table.
#[derive(Debug, Default)]
pub struct Hub {
    router: EventRouter,
    connections: BTreeMap<ConnectionId, Outbound>,
}

impl Hub {
    /// Create a hub with no connections and an empty lobby.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the lobby.
    pub const fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Register a connection's outbound queue.
    pub fn connect(&mut self, id: ConnectionId, outbound: Outbound) {
        self.connections.insert(id, outbound);
    }

    /// Apply an inbound event and deliver the results.
    ///
    /// Returns the number of frames enqueued.
    pub fn handle(&mut self, from: ConnectionId, event: ClientEvent) -> usize {
        debug!(connection = %from, event = event.name(), "Client event");
        let dispatches = self.router.handle(from, event);
        self.deliver(dispatches)
    }

    /// Drop a connection and deliver the resulting cleanup broadcasts to
    /// everyone else.
    ///
    /// Returns the number of frames enqueued.
    pub fn disconnect(&mut self, id: ConnectionId) -> usize {
        self.connections.remove(&id);
        let dispatches = self.router.disconnect(id);
        self.deliver(dispatches)
    }

    fn deliver(&self, dispatches: Vec<Dispatch>) -> usize {
        let mut sent = 0_usize;
        for Dispatch { audience, event } in dispatches {
            let json = match serde_json::to_string(&event) {
                Ok(j) => j,
                Err(e) => {
                    warn!(event = event.name(), "Failed to serialize server event: {e}");
                    continue;
                }
            };
            let recipients: Vec<&Outbound> = match &audience {
                Audience::Everyone => self.connections.values().collect(),
                Audience::Members(ids) => ids.iter().filter_map(|id| self.connections.get(id)).collect(),
                Audience::Connection(id) => self.connections.get(id).into_iter().collect(),
            };
            for outbound in recipients {
                if outbound.send(json.clone()).is_ok() {
                    sent = sent.saturating_add(1);
                }
            }
        }
        sent
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Default)]
pub struct AppState {
    hub: Mutex<Hub>,
}

impl AppState {
    /// Create application state with an empty lobby.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the hub for direct inspection.
    pub async fn hub(&self) -> MutexGuard<'_, Hub> {
        self.hub.lock().await
    }

    /// Accept a new connection, returning its id and outbound queue.
    pub async fn connect(&self) -> (ConnectionId, Inbox) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.hub.lock().await.connect(id, tx);
        (id, rx)
    }

    /// Apply one inbound event from `from`.
    pub async fn dispatch(&self, from: ConnectionId, event: ClientEvent) {
        self.hub.lock().await.handle(from, event);
    }

    /// Clean up after `id` has gone away.
    pub async fn disconnect(&self, id: ConnectionId) {
        self.hub.lock().await.disconnect(id);
    }
}
