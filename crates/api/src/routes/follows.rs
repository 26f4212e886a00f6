//! Route definitions for the `/follow-requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::follows;
use crate::state::AppState;

/// Routes mounted at `/follow-requests`.
///
/// ```text
/// POST /                -> create_request
/// GET  /pending         -> list_pending
/// POST /{id}/respond    -> respond (followee only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(follows::create_request))
        .route("/pending", get(follows::list_pending))
        .route("/{id}/respond", post(follows::respond))
}
