//! Handler for the home feed.

use axum::extract::State;
use axum::Json;
use connecthub_core::feed::{self, ShowAll};
use connecthub_db::models::post::FeedPost;
use connecthub_db::repositories::PostRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/feed
///
/// Every post, newest first with id as the deterministic tie-break, each
/// carrying author info and the caller's like state. Per-viewer exclusion
/// goes through the [`feed::FeedFilter`] hook; the current policy shows
/// everything.
pub async fn get_feed(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<FeedPost>>>> {
    let posts = PostRepo::list_feed(&state.pool, auth.user_id).await?;
    let composed = feed::compose(posts, auth.user_id, &ShowAll);
    Ok(Json(DataResponse { data: composed }))
}
