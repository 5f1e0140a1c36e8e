use axum::extract::{FromRef, FromRequestParts};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{error::AppError, session::extract_session_token, state::AppState};

/// Identity resolved once per request from the session cookie. Handlers get
/// this value explicitly; there is no ambient current-user state.
#[derive(Debug, Clone, FromRow)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    /// The session that authenticated this request; logout revokes it.
    pub session_token: Uuid,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = extract_session_token(&parts.headers).ok_or(AppError::Unauthenticated)?;

        // Expired rows are ignored here and swept on the user's next login.
        let user: Option<AuthUser> = sqlx::query_as(
            r#"
            SELECT u.id AS user_id, u.name, u.email, s.token AS session_token
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&state.pool)
        .await?;

        user.ok_or(AppError::Unauthenticated)
    }
}
