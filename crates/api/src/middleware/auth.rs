//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use connecthub_core::error::CoreError;
use connecthub_core::types::DbId;
use connecthub_db::repositories::SessionRepo;

use crate::auth::session::hash_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from a Bearer session token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The session row backing this request, for targeted revocation.
    pub session_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let session = SessionRepo::find_by_token_hash(&state.pool, &hash_session_token(token))
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthenticated("Session not found".into())))?;

        if session.expires_at <= Utc::now() {
            return Err(AppError::Core(CoreError::Unauthenticated(
                "Session expired".into(),
            )));
        }

        Ok(AuthUser {
            user_id: session.user_id,
            session_id: session.id,
        })
    }
}
