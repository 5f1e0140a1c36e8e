use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Redirect,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::properties::PropertyList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/toggle-favorite/{id}", post(toggle_favorite))
        .route("/favorites", get(list_favorites))
}

#[utoipa::path(
    post,
    path = "/toggle-favorite/{id}",
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    responses(
        (status = 303, description = "Membership flipped, back to the list"),
        (status = 404, description = "Unknown property")
    ),
    security(("session_cookie" = [])),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    favorite_service::toggle_favorite(&state.pool, &user, id).await?;
    Ok(Redirect::to("/properties"))
}

#[utoipa::path(
    get,
    path = "/favorites",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List favorited properties", body = ApiResponse<PropertyList>),
        (status = 303, description = "Not signed in, redirected to login")
    ),
    security(("session_cookie" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<PropertyList>>> {
    let resp = favorite_service::list_favorites(&state.pool, &user, pagination).await?;
    Ok(Json(resp))
}
