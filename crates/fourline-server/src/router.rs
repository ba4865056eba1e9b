//! Axum router construction for the room server.
//!
//! Assembles the game `WebSocket` and the read-only REST routes into a
//! single [`Router`] with CORS and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- plain-text status line
/// - `GET /ws` -- game `WebSocket`
/// - `GET /api/rooms` -- room summaries
/// - `GET /api/rooms/{name}` -- single room snapshot
/// - `GET /api/players` -- presence list
///
/// `allowed_origin` is the single origin CORS accepts; `*` accepts any.
pub fn build_router(state: Arc<AppState>, allowed_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(allowed_origin))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(ws::ws_play))
        // REST API
        .route("/api/rooms", get(handlers::list_rooms))
        .route("/api/rooms/{name}", get(handlers::get_room))
        .route("/api/players", get(handlers::list_players))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn allow_origin(origin: &str) -> AllowOrigin {
    if origin == "*" {
        return AllowOrigin::any();
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(e) => {
            warn!(origin, "Invalid allowed origin, accepting any: {e}");
            AllowOrigin::any()
        }
    }
}
