//! Handlers for the `/posts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use connecthub_core::error::CoreError;
use connecthub_core::types::DbId;
use connecthub_db::models::post::{CreatePost, Post};
use connecthub_db::repositories::PostRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a like toggle: the new state plus the updated count so the
/// client can re-render the card without a full refetch.
#[derive(Debug, Serialize)]
pub struct ToggleLikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

/// POST /api/v1/posts
///
/// Create a post authored by the caller. A post must carry text content,
/// media references, or both.
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<DataResponse<Post>>)> {
    let content = input.content.trim();
    if content.is_empty() && input.media.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A post needs content or media".into(),
        )));
    }

    let post = PostRepo::create(&state.pool, auth.user_id, content, &input.media).await?;

    tracing::info!(post_id = post.id, author_id = auth.user_id, "Post created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/posts/{id}/like
///
/// Flip the caller's like on a post. Toggling twice returns to the original
/// state; the flip itself is atomic at the database.
pub async fn toggle_like(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ToggleLikeResponse>>> {
    // Resolve the post first so an unknown id is a 404, not a foreign key
    // violation.
    PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    let liked = PostRepo::toggle_like(&state.pool, post_id, auth.user_id).await?;
    let like_count = PostRepo::like_count(&state.pool, post_id).await?;

    Ok(Json(DataResponse {
        data: ToggleLikeResponse { liked, like_count },
    }))
}
