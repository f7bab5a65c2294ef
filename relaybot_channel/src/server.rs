//! The HTTP surface: one webhook route.
//!
//! Protocol validation and authentication of the envelope are the external
//! adapter's concern; this layer only decodes the JSON body and returns the
//! reply activity.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::Result;
use crate::activity::Activity;
use crate::relay::RelayHandler;

/// Shared state for the webhook route.
pub struct AppState {
    pub handler: RelayHandler,
}

/// Build the router. `POST /api/messages` is the only route.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/messages", post(messages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The chat-platform webhook.
///
/// Malformed envelopes are recovered at this boundary: logged and rejected
/// with 400, never crashing the process.
async fn messages(State(state): State<Arc<AppState>>, body: String) -> Response {
    let activity: Activity = match serde_json::from_str(&body) {
        Ok(activity) => activity,
        Err(e) => {
            warn!("discarding malformed activity: {e}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    match state.handler.handle_activity(&activity).await {
        Some(reply) => axum::Json(Activity::reply(reply)).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

/// Bind the listener and serve until the process is stopped.
pub async fn run(state: Arc<AppState>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("relaybot listening on http://{addr}/api/messages");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
