use axum::{
    Form, Json, Router,
    extract::{Query, State},
    response::Redirect,
    routing::get,
};

use crate::{
    dto::properties::{NewPropertyForm, PropertyList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::PropertyQuery,
    services::property_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties))
        .route("/add-property", get(add_property_form).post(add_property))
}

#[utoipa::path(
    get,
    path = "/properties",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Substring match on title or location"),
        ("min_price" = Option<i64>, Query, description = "Lower price bound"),
        ("max_price" = Option<i64>, Query, description = "Upper price bound"),
        ("sort_by" = Option<String>, Query, description = "created_at | price"),
        ("sort_order" = Option<String>, Query, description = "asc | desc")
    ),
    responses(
        (status = 200, description = "List properties", body = ApiResponse<PropertyList>),
        (status = 303, description = "Not signed in, redirected to login")
    ),
    security(("session_cookie" = [])),
    tag = "Properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<PropertyQuery>,
) -> AppResult<Json<ApiResponse<PropertyList>>> {
    let resp = property_service::list_properties(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/add-property",
    responses(
        (status = 200, description = "Listing form descriptor", body = ApiResponse<serde_json::Value>),
        (status = 303, description = "Not signed in, redirected to login")
    ),
    security(("session_cookie" = [])),
    tag = "Properties"
)]
pub async fn add_property_form(_user: AuthUser) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        "Add property",
        serde_json::json!({ "fields": ["title", "price", "location"] }),
    ))
}

#[utoipa::path(
    post,
    path = "/add-property",
    request_body(content = NewPropertyForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Listing created, back to the list"),
        (status = 400, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Properties"
)]
pub async fn add_property(
    State(state): State<AppState>,
    user: AuthUser,
    Form(payload): Form<NewPropertyForm>,
) -> AppResult<Redirect> {
    let listing = payload.validate()?;
    property_service::create_property(&state, &user, listing).await?;
    Ok(Redirect::to("/properties"))
}
