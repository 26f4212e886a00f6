//! Route definition for the home feed.

use axum::routing::get;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

/// Routes mounted at `/feed`.
///
/// ```text
/// GET / -> get_feed
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(feed::get_feed))
}
