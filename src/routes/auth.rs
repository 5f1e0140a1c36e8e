use axum::{
    Form, Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect},
    routing::get,
};

use crate::{
    audit::{self, AuditAction},
    dto::auth::{LoginForm, RegisterForm},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::auth_service::{authenticate, establish_session, register_user, revoke_session},
    session::{clear_session_cookie, session_cookie},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Registration form descriptor", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn register_form() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        "Register",
        serde_json::json!({ "fields": ["name", "email", "password"] }),
    ))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, continue to login"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterForm>,
) -> AppResult<Redirect> {
    register_user(&state.pool, payload).await?;
    Ok(Redirect::to("/login"))
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login form descriptor", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn login_form() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        "Login",
        serde_json::json!({ "fields": ["email", "password"] }),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, session cookie set"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    let user = authenticate(&state.pool, payload).await?;
    let session =
        establish_session(&state.pool, user.id, state.config.session_ttl_hours).await?;

    let max_age = state.config.session_ttl_hours * 3600;
    let cookie = session_cookie(session.token, max_age);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to("/properties"),
    ))
}

#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session revoked, back to login")
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<impl IntoResponse> {
    revoke_session(&state.pool, user.session_token).await?;
    audit::record(&state.pool, user.user_id, AuditAction::Logout, None).await;

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login"),
    ))
}
