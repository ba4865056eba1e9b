//! Read-only REST endpoint handlers.
//!
//! These expose the same lobby state the `WebSocket` broadcasts, for
//! debugging and for clients that want to poll before connecting.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Plain-text status line |
//! | `GET` | `/api/rooms` | Room summaries, oldest first |
//! | `GET` | `/api/rooms/{name}` | Full room snapshot |
//! | `GET` | `/api/players` | Announced display names |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use fourline_types::{RoomSnapshot, RoomSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// Plain-text status line with live counts.
pub async fn index(State(state): State<Arc<AppState>>) -> String {
    let hub = state.hub().await;
    format!(
        "fourline: {} connections, {} rooms, {} players\n",
        hub.connection_count(),
        hub.router().registry().len(),
        hub.router().directory().len(),
    )
}

/// List every open room.
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummary>> {
    Json(state.hub().await.router().registry().summaries())
}

/// Fetch a single room by name.
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<RoomSnapshot>, ApiError> {
    state
        .hub()
        .await
        .router()
        .registry()
        .snapshot(&name)
        .map(Json)
        .ok_or(ApiError::RoomNotFound(name))
}

/// List announced display names.
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.hub().await.router().directory().display_names())
}
